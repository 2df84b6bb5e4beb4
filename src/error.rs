use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("Rubrik transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Rubrik API returned HTTP {status} for {path}")]
    HttpStatus { status: u16, path: String },

    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExporterError {
    /// True when the appliance rejected the session token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ExporterError::HttpStatus { status: 401, .. })
    }
}

pub type Result<T> = std::result::Result<T, ExporterError>;
