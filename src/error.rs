use thiserror::Error;

/// Unified error type for csproj-version operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Malformed project file: {0}")]
    Descriptor(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("git command failed: {0}")]
    Vcs(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in csproj-version
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a not-found error (no resolvable project file)
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create a parse error (malformed version text)
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a conflict error (illegal transition or flag combination)
    pub fn conflict(msg: impl Into<String>) -> Self {
        Error::Conflict(msg.into())
    }

    pub fn descriptor(msg: impl Into<String>) -> Self {
        Error::Descriptor(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub fn vcs(msg: impl Into<String>) -> Self {
        Error::Vcs(msg.into())
    }

    /// Process exit code for this error. Every user-facing failure exits with 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
