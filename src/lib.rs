//! RFMForge: A Rust CLI application for customer segmentation using quantile-based RFM scoring
//!
//! This library computes RFM (Recency, Frequency, Monetary) profiles from
//! customer transaction data, assigns 1-5 quantile scores per metric, and
//! derives a segment label and a churn-risk label for every customer.

pub mod cli;
pub mod data;
pub mod engine;
pub mod metrics;
pub mod report;

// Re-export public items for easier access
pub use cli::Args;
pub use data::{load_transactions, LoadOutcome, Transaction};
pub use engine::{
    segment_customers, ChurnRisk, RfmProfile, ScoredPoint, Segment, SegmentationError,
    SegmentationModel,
};
pub use metrics::KeyMetrics;

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
