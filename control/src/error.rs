use hyper::StatusCode;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

/// Every way a control call can fail. Nothing is retried or logged by the
/// client, each failure is handed back as one of these.
#[derive(Debug, Error)]
pub enum Error {
    /// The base URL is not an absolute URL usable as a base.
    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connection refused, DNS failure, timeout and other network errors.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The server answered with a non-success status.
    #[error("server responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The body was not JSON of the expected shape.
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_url(url: &str, reason: impl ToString) -> Self {
        Error::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Status code of a `Status` error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Transport(err.into())
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        Error::Transport(Box::new(err))
    }
}
