//! Error types, one enum per layer, wrapped by [`ViewerError`] at the request
//! and batch-item boundary.

use std::path::PathBuf;

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::exitcode;

/// Failures obtaining a serialized tree.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("fetching tree {index} from {url} timed out")]
    Timeout { index: usize, url: String },

    #[error("fetching tree {index} from {url} failed: {source}")]
    Fetch {
        index: usize,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tree data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("encoding tree: {0}")]
    Encode(#[source] serde_json::Error),
}

impl SourceError {
    /// Transport failures may succeed on a later attempt; bad data will not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SourceError::Timeout { .. } | SourceError::Fetch { .. })
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tree {index} is not loaded (registry holds {len})")]
    NotLoaded { index: usize, len: usize },

    #[error("tree index {index} exceeds the maximum of {max}")]
    IndexTooLarge { index: usize, max: usize },

    #[error("registry is full ({len} trees stored, maximum index {max})")]
    Full { len: usize, max: usize },
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("drawing backend: {0}")]
    Backend(String),

    #[error("canvas side {side} is outside 1..={max}")]
    InvalidCanvas { side: u32, max: u32 },
}

impl RenderError {
    pub(crate) fn backend<E: std::error::Error>(err: E) -> Self {
        RenderError::Backend(err.to_string())
    }
}

/// Top-level error, what gets reported to a client or the terminal.
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("invalid tree index {raw:?}: {reason}")]
    InvalidIndex { raw: String, reason: &'static str },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// `Retry-After` value sent with responses to retryable failures.
pub const RETRY_AFTER_SECS: &str = "5";

/// Result type for request and batch-item operations.
pub type ViewerResult<T> = Result<T, ViewerError>;

impl ViewerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ViewerError::InvalidIndex { .. } => StatusCode::BAD_REQUEST,
            ViewerError::Registry(RegistryError::IndexTooLarge { .. }) => StatusCode::BAD_REQUEST,
            ViewerError::Registry(RegistryError::NotLoaded { .. }) => StatusCode::NOT_FOUND,
            ViewerError::Registry(RegistryError::Full { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            ViewerError::Source(SourceError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            ViewerError::Source(SourceError::Fetch { .. }) => StatusCode::BAD_GATEWAY,
            ViewerError::Source(SourceError::Decode(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ViewerError::Source(_)
            | ViewerError::Render(_)
            | ViewerError::Config(_)
            | ViewerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether repeating the same request or batch item may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ViewerError::Source(e) if e.is_retryable())
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ViewerError::Registry(RegistryError::Full { .. }) => exitcode::UNAVAILABLE,
            ViewerError::InvalidIndex { .. } | ViewerError::Registry(_) => exitcode::USAGE,
            ViewerError::Source(SourceError::Decode(_)) => exitcode::DATAERR,
            ViewerError::Source(SourceError::Read { .. }) => exitcode::NOINPUT,
            ViewerError::Source(SourceError::Write { .. }) => exitcode::CANTCREAT,
            ViewerError::Source(SourceError::Timeout { .. } | SourceError::Fetch { .. }) => {
                exitcode::UNAVAILABLE
            }
            ViewerError::Source(SourceError::Encode(_)) | ViewerError::Render(_) => {
                exitcode::SOFTWARE
            }
            ViewerError::Config(_) => exitcode::CONFIG,
            ViewerError::Io(_) => exitcode::IOERR,
        }
    }
}

impl IntoResponse for ViewerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(%status, error = %self, "request failed");
        } else {
            warn!(%status, error = %self, "request rejected");
        }
        let retryable = self.is_retryable();
        let mut response = (status, self.to_string()).into_response();
        if retryable {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from_static(RETRY_AFTER_SECS));
        }
        response
    }
}
