use std::fmt::Display;

/// Failure of a remote call, rendered inline by the originating view or form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Server unreachable or the request was aborted
    #[error("network error: {0}")]
    Transport(String),
    #[error("server responded with HTTP {status}")]
    Http { status: u16 },
    /// Validation or business-rule rejection reported by the server
    #[error("{}", .0.join("; "))]
    Remote(Vec<String>),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("response for {0} carried no data")]
    MissingData(&'static str),
}

impl ApiError {
    pub(crate) fn transport(e: impl Display) -> Self {
        Self::Transport(e.to_string())
    }
}
