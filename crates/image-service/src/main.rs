//! Image Service - image uploads over S3-compatible storage

use clap::Parser;
use image_service::{run_server_with_shutdown, shutdown_signal, ServiceConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "image-service")]
#[command(about = "Upload images to and inspect images in an S3-compatible bucket")]
#[command(version)]
struct Args {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "5000", env = "PORT")]
    port: u16,

    /// S3-compatible endpoint URL
    #[arg(
        long,
        default_value = "http://minio.prod-storage.svc.cluster.local:9000",
        env = "S3_ENDPOINT"
    )]
    s3_endpoint: String,

    /// S3 access key id
    #[arg(long, default_value = "minioadmin", env = "S3_ACCESS_KEY")]
    s3_access_key: String,

    /// S3 secret access key
    #[arg(long, default_value = "minioadmin", env = "S3_SECRET_KEY", hide_env_values = true)]
    s3_secret_key: String,

    /// Bucket holding uploaded images
    #[arg(long, default_value = "images", env = "S3_BUCKET")]
    s3_bucket: String,

    /// Signing region
    #[arg(long, default_value = "us-east-1", env = "AWS_REGION")]
    region: String,

    /// Use in-memory storage (for testing, data will not persist)
    #[arg(long, env = "IMAGE_MEMORY_STORE")]
    memory_store: bool,

    /// Enable debug logging
    #[arg(short, long, env = "IMAGE_DEBUG")]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Setup logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("image_service={log_level},image_store={log_level},tower_http=debug").into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting image service on {}:{}", args.host, args.port);
    tracing::info!("S3 endpoint: {}", args.s3_endpoint);

    let config = ServiceConfig {
        host: args.host,
        port: args.port,
        s3_endpoint: args.s3_endpoint,
        s3_access_key: args.s3_access_key,
        s3_secret_key: args.s3_secret_key,
        s3_bucket: args.s3_bucket,
        region: args.region,
        use_memory_store: args.memory_store,
    };

    run_server_with_shutdown(config, shutdown_signal()).await
}
