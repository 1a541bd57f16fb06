use thiserror::Error;

/// Configuration-level error type.
/// Raised once at startup when the engine is built; scoring itself never fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Weight for '{name}' must be a finite, non-negative number (got {value})")]
    InvalidWeight { name: String, value: f64 },

    #[error("Category weights must sum to 1.0 (got {sum:.6})")]
    WeightSum { sum: f64 },

    #[error("Multiplier for '{name}' must be positive (got {value})")]
    NonPositiveMultiplier { name: String, value: f64 },

    #[error("Occurrence cap must be at least 1")]
    ZeroOccurrenceCap,

    #[error("Penalty {name} must lie within 0..=100 (got {value})")]
    PenaltyOutOfRange { name: &'static str, value: f64 },

    #[error("Invalid override for {key}: {reason}")]
    InvalidOverride { key: String, reason: String },

    #[error("Alias '{variant}' appears in more than one group")]
    DuplicateAlias { variant: String },

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
