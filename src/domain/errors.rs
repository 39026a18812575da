use thiserror::Error;

/// Failure of a single fetch against the dashboard backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("{url} answered HTTP {status} {status_text}")]
    Status {
        url: String,
        status: u16,
        status_text: String,
    },

    #[error("malformed response from {url}: {reason}")]
    MalformedBody { url: String, reason: String },
}

impl TransportError {
    pub fn url(&self) -> &str {
        match self {
            TransportError::Unreachable { url, .. }
            | TransportError::Status { url, .. }
            | TransportError::MalformedBody { url, .. } => url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
