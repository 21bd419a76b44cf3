use thiserror::Error;

/// Raised at construction time only; every per-step operation is total once
/// an agent or reward source has been built.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Bandit must have at least one arm")]
    NoArms,
    #[error("Expected {expected} per-arm entries, got {actual}")]
    ArmCountMismatch { expected: usize, actual: usize },
    #[error("Unknown policy {0:?}")]
    UnknownPolicy(String),
    #[error("Missing required parameter {0:?}")]
    MissingParameter(&'static str),
    #[error("Invalid value {value} for {name:?}")]
    InvalidParameter { name: &'static str, value: f64 },
}
