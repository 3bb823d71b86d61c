use nimbusfs_volstatus_api::{
    VS_ERR_INVALID_ARG, VS_ERR_NOT_A_DFS_LINK, VS_ERR_NOT_FOUND, VS_ERR_SYNC, VS_ERR_TOO_BIG,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
    #[error("`{share}:{path}` does not resolve: {details}")]
    NotFound {
        share: String,
        path: String,
        details: String,
    },
    #[error("status synchronization failed: {details}")]
    Sync { details: String },
    #[error("`{path}` is not a DFS link")]
    NotADfsLink { path: String },
    #[error("buffer too small: need {needed} bytes, have {capacity}")]
    TooBig { needed: usize, capacity: usize },
    #[error("handler `{call}` reported code {code}")]
    Plugin { call: &'static str, code: i32 },
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_found(
        share: impl Into<String>,
        path: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            share: share.into(),
            path: path.into(),
            details: details.into(),
        }
    }

    pub fn sync(details: impl Into<String>) -> Self {
        Self::Sync {
            details: details.into(),
        }
    }

    pub fn not_a_dfs_link(share: &str, path: &str) -> Self {
        Self::NotADfsLink {
            path: format!("{share}:{path}"),
        }
    }

    /// Stable status code reported across the handler ABI. Handler-originated
    /// codes pass through unchanged.
    pub fn status_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => VS_ERR_INVALID_ARG,
            Self::NotFound { .. } => VS_ERR_NOT_FOUND,
            Self::Sync { .. } => VS_ERR_SYNC,
            Self::NotADfsLink { .. } => VS_ERR_NOT_A_DFS_LINK,
            Self::TooBig { .. } => VS_ERR_TOO_BIG,
            Self::Plugin { code, .. } => *code,
        }
    }
}
