use thiserror::Error;

/// Errors that can occur while sourcing, scaling or pricing recipes
#[derive(Error, Debug)]
pub enum SourcingError {
    /// Requested serving count is zero or negative
    #[error("Invalid serving count: {0} (must be at least 1)")]
    InvalidServings(i64),

    /// Ingredient line starts with a quantity token that is not a number
    #[error("Malformed ingredient line: {0}")]
    MalformedIngredientLine(String),

    /// A recipe or price source failed, timed out or returned invalid data
    #[error("Upstream source '{source_name}' unavailable: {message}")]
    UpstreamUnavailable {
        source_name: String,
        message: String,
    },

    /// HTTP request to a collaborator failed
    #[error("Failed to fetch: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl SourcingError {
    pub(crate) fn upstream(source_name: &str, message: impl ToString) -> Self {
        SourcingError::UpstreamUnavailable {
            source_name: source_name.to_string(),
            message: message.to_string(),
        }
    }
}
