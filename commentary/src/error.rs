use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommentaryError {
    #[error("API key not configured")]
    MissingApiKey,
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Service answered {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Response had no comment in it")]
    Empty,
}

pub type Result<T> = std::result::Result<T, CommentaryError>;
