//! Unified chart error types.

use thiserror::Error;

/// Top-level chart error.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Invalid brush range {start}..={end} for {len} point(s)")]
    InvalidBrush { start: usize, end: usize, len: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Feed collaborator errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    #[error("Feed closed")]
    Closed,

    #[error("Subscription rejected: {0}")]
    Rejected(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// OHLC invariant violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },

    #[error("high {high} is below the body top {body_top}")]
    HighBelowBody { high: f64, body_top: f64 },

    #[error("low {low} is above the body bottom {body_bottom}")]
    LowAboveBody { low: f64, body_bottom: f64 },
}
