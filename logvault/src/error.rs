use thiserror::Error;

/// Failure talking to the document-search backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The request never produced a response (connect error, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The engine answered with a non-success status.
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("backend connection is closed")]
    Closed,
}

impl BackendError {
    /// True when the backend could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Closed)
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(e) if e.is_timeout() => "timeout",
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Json(_) => "json",
            Self::Closed => "closed",
        }
    }
}

/// Gateway operation failure. Each variant names the operation and keeps the
/// backend error as its source.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("failed to index log")]
    Indexing(#[source] BackendError),

    #[error("failed to search logs")]
    Search(#[source] BackendError),

    #[error("failed to get cluster health")]
    ClusterHealth(#[source] BackendError),

    #[error("failed to get index stats")]
    IndexStats(#[source] BackendError),
}

impl GatewayError {
    /// The underlying backend failure.
    pub fn cause(&self) -> &BackendError {
        match self {
            Self::Indexing(e) | Self::Search(e) | Self::ClusterHealth(e) | Self::IndexStats(e) => e,
        }
    }

    /// True when the backend was unreachable, as opposed to rejecting the request.
    pub fn is_unavailable(&self) -> bool {
        self.cause().is_unreachable()
    }

    pub fn operation(&self) -> &'static str {
        match self {
            Self::Indexing(_) => "index",
            Self::Search(_) => "search",
            Self::ClusterHealth(_) => "cluster_health",
            Self::IndexStats(_) => "index_stats",
        }
    }
}

/// Rejected inbound request, detected before anything reaches the gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("size must be between {min} and {max}, got {actual}")]
    SizeOutOfRange { min: usize, max: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, GatewayError>;
