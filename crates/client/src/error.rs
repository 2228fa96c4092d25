use storage::dto::common::ApiMessage;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Not signed in or session expired")]
    Unauthorized,

    /// The server answered with a `type: "bad"` message
    #[error("{}", .0.message)]
    Rejected(ApiMessage),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
