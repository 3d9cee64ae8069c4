use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport failure for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("malformed JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ApiError {
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
