use thiserror::Error;

/// Failure taxonomy shared by the three view controllers.
///
/// `InvalidInput` is raised before any network call is made and carries the
/// user-visible message. `Service` covers non-2xx responses and transport
/// failures; the flow stays in its current state for manual retry.
/// `Configuration` is terminal for the affected view.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("service error: {0}")]
    Service(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Service(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
