use thiserror::Error;

/// Any failed attempt to load the tours snapshot: transport error, timeout,
/// non-2xx status or a body that is not a snapshot. Callers treat all of them alike.
#[derive(Debug, Error)]
#[error("failed to load tours: {0}")]
pub struct FetchFailure(#[from] reqwest::Error);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("FAILURE_DISPLAY must be 'replace' or 'overlay', got {0:?}")]
    InvalidFailureDisplay(String),

    #[error("could not build the HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
