use thiserror::Error;

/// Failures raised by the rating and bracket core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LeagueError {
    /// Unrecognized event kind, empty roster, malformed score pair.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A rating update that has no defined result (zero score sum).
    #[error("domain error: {0}")]
    DomainError(String),
    #[error("not found: {0}")]
    NotFound(String),
}

impl LeagueError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::DomainError(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

pub type LeagueResult<T> = Result<T, LeagueError>;

/// Add context to state file errors
pub fn storage_context(operation: &str, path: &std::path::Path) -> String {
    format!("Failed to {} league state at {}", operation, path.display())
}
