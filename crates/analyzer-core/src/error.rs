use thiserror::Error;

use crate::MetricId;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Metric {metric} expects a {expected} config")]
    ShapeMismatch { metric: MetricId, expected: &'static str },

    #[error("Missing metric in settings: {0}")]
    MissingMetric(MetricId),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
