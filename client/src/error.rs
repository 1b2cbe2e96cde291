use chroma_api::error::{GameError, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// `success: false`; the message comes from the server.
    #[error("{0}")]
    Rejected(String),

    #[error("Unauthorized access. Please log in.")]
    Unauthorized,

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<ResponseError> for ClientError {
    fn from(err: ResponseError) -> Self {
        match err {
            ResponseError::Rejected(message) => ClientError::Rejected(message),
            ResponseError::Invalid(err) => ClientError::Game(err),
        }
    }
}

impl ClientError {
    /// Whether the session is gone and the caller has to log in again.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}
