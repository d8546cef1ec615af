use thiserror::Error;

pub type Result<T> = std::result::Result<T, GvizError>;

#[derive(Debug, Error)]
pub enum GvizError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed gviz response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for GvizError {
    fn from(err: reqwest::Error) -> Self {
        GvizError::Network(err.to_string())
    }
}
