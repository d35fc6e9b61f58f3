use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("provider error ({code}): {description}")]
    Provider { code: String, description: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single monitor tick produced no report.
#[derive(Error, Debug)]
pub enum TickError {
    #[error("insufficient data: have {have} points, need more than {need}")]
    InsufficientData { have: usize, need: usize },

    #[error("{0:#}")]
    Fetch(#[from] anyhow::Error),

    #[error("{0}")]
    Compute(String),
}

impl TickError {
    /// Short-series ticks are skipped with a warning rather than reported as errors.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}
