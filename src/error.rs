use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Failures of a single search or preview round trip.
///
/// Controllers never hand these to their callers; they end up in the log.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to search service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("search service answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response from search service: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid service url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}
