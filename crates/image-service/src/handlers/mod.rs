//! HTTP request handlers

pub mod health;
pub mod images;
pub mod metrics;

pub use health::*;
pub use images::*;
pub use metrics::*;
