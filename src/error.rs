//! Error types for chunkwise.

/// Errors that can occur while loading configuration or splitting text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required credential is not set (or is blank).
    #[error("missing credential: {var} is not set")]
    MissingCredential {
        /// The environment variable that was looked up.
        var: &'static str,
    },

    /// A credential is set in the environment but is not valid UTF-8.
    #[error("invalid credential: {var} is not valid UTF-8")]
    InvalidCredential {
        /// The environment variable that was looked up.
        var: &'static str,
    },

    /// Chunk size and overlap do not describe a usable splitter.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// A `.env` file was found but could not be read.
    #[error("failed to read .env file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    /// A settings file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A settings file is not valid TOML for [`SplitterSettings`](crate::SplitterSettings).
    #[error("invalid settings file: {0}")]
    Settings(#[from] toml::de::Error),
}

/// Why a [`ChunkConfig`](crate::ChunkConfig) was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Chunk size must be > 0.
    #[error("chunk size must be > 0")]
    ZeroChunkSize,

    /// Overlap must be strictly smaller than the chunk size.
    #[error("overlap {overlap} must be < chunk size {size}")]
    OverlapTooLarge {
        /// The chunk size.
        size: usize,
        /// The overlap that was too large.
        overlap: usize,
    },
}

/// Result type for chunkwise operations.
pub type Result<T> = std::result::Result<T, Error>;
