//! Splitter configuration.
//!
//! Two layers:
//!
//! - [`ChunkConfig`]: the validated `chunk_size` / `chunk_overlap` pair. Once
//!   you hold one, `chunk_overlap < chunk_size` and `chunk_size > 0`.
//! - [`SplitterSettings`]: the serde-facing shape, read from TOML, that
//!   carries the raw numbers plus a [`Strategy`].
//!
//! ```toml
//! chunk_size = 500
//! chunk_overlap = 50
//!
//! [strategy]
//! kind = "recursive"
//! separators = ["\n\n", "\n", " ", ""]
//! ```
//!
//! Sizes are counted in characters (`char`s), not bytes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default maximum chunk size, in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default overlap between consecutive chunks, in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Separators tried by [`Strategy::Recursive`] when none are given, coarsest
/// first. The empty separator splits into single characters.
pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Validated chunk size and overlap.
///
/// # Examples
///
/// ```rust
/// use chunkwise::ChunkConfig;
///
/// let config = ChunkConfig::new(26, 4).unwrap();
/// assert_eq!(config.chunk_size(), 26);
/// assert_eq!(config.chunk_overlap(), 4);
/// assert_eq!(config.step(), 22);
///
/// assert!(ChunkConfig::new(10, 10).is_err());
/// assert!(ChunkConfig::new(0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkConfig {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl ChunkConfig {
    /// Create a config, rejecting `chunk_size == 0` and
    /// `chunk_overlap >= chunk_size`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration).
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        Self::validate(chunk_size, chunk_overlap)?;
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// A config with no overlap.
    ///
    /// # Errors
    ///
    /// Returns an error if `chunk_size == 0`.
    pub fn no_overlap(chunk_size: usize) -> Result<Self> {
        Self::new(chunk_size, 0)
    }

    /// Check a size/overlap pair without building a config.
    ///
    /// # Errors
    ///
    /// Returns the reason the pair is unusable.
    pub fn validate(
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> std::result::Result<(), ConfigError> {
        if chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if chunk_overlap >= chunk_size {
            return Err(ConfigError::OverlapTooLarge {
                size: chunk_size,
                overlap: chunk_overlap,
            });
        }
        Ok(())
    }

    /// Maximum characters per chunk.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Characters shared between consecutive chunks.
    #[must_use]
    pub const fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// New characters each chunk contributes: `chunk_size - chunk_overlap`.
    ///
    /// Always > 0.
    #[must_use]
    pub const fn step(&self) -> usize {
        self.chunk_size - self.chunk_overlap
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

/// How text is segmented into chunks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Strategy {
    /// Prefer separator boundaries, coarsest first, falling back to a hard
    /// cut at character boundaries.
    Recursive {
        /// Separators in priority order.
        #[serde(default = "default_separators")]
        separators: Vec<String>,
    },
    /// Cut every `chunk_size - chunk_overlap` characters, ignoring content.
    #[serde(rename = "fixed", alias = "fixed_count")]
    FixedCount,
}

impl Strategy {
    /// Recursive splitting with [`DEFAULT_SEPARATORS`].
    #[must_use]
    pub fn recursive() -> Self {
        Self::Recursive {
            separators: default_separators(),
        }
    }

    /// Recursive splitting with custom separators.
    #[must_use]
    pub fn recursive_with(separators: &[&str]) -> Self {
        Self::Recursive {
            separators: separators.iter().map(|&s| s.to_string()).collect(),
        }
    }

    /// Short name used in logs and CLI output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Recursive { .. } => "recursive",
            Self::FixedCount => "fixed",
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::recursive()
    }
}

fn default_separators() -> Vec<String> {
    DEFAULT_SEPARATORS.iter().map(|&s| s.to_string()).collect()
}

/// File-level splitter settings.
///
/// Missing keys fall back to their defaults. The numbers are not checked
/// until [`SplitterSettings::chunk_config`] (or [`SplitterSettings::load`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitterSettings {
    /// Maximum characters per chunk.
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks.
    pub chunk_overlap: usize,
    /// Segmentation strategy.
    pub strategy: Strategy,
}

impl SplitterSettings {
    /// Parse and validate settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Settings`](crate::Error::Settings) on malformed TOML
    /// and [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// on an unusable size/overlap pair.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Self = toml::from_str(s)?;
        settings.chunk_config()?;
        Ok(settings)
    }

    /// Read settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or [`Self::from_toml_str`] fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded splitter settings");
        Self::from_toml_str(&contents)
    }

    /// The validated size/overlap pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration).
    pub fn chunk_config(&self) -> Result<ChunkConfig> {
        ChunkConfig::new(self.chunk_size, self.chunk_overlap)
    }
}

impl Default for SplitterSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            strategy: Strategy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_valid_config() {
        let config = ChunkConfig::new(100, 20).unwrap();
        assert_eq!(config.step(), 80);
    }

    #[test]
    fn test_overlap_equal_to_size_rejected() {
        let err = ChunkConfig::new(10, 10).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfiguration(ConfigError::OverlapTooLarge {
                size: 10,
                overlap: 10
            })
        ));
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = ChunkConfig::new(0, 0).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfiguration(ConfigError::ZeroChunkSize)
        ));
    }

    #[test]
    fn test_default_is_valid() {
        let config = ChunkConfig::default();
        assert!(ChunkConfig::validate(config.chunk_size(), config.chunk_overlap()).is_ok());
    }

    #[test]
    fn test_settings_from_toml() {
        let settings = SplitterSettings::from_toml_str(
            r#"
            chunk_size = 26
            chunk_overlap = 4

            [strategy]
            kind = "fixed"
            "#,
        )
        .unwrap();
        assert_eq!(settings.chunk_size, 26);
        assert_eq!(settings.chunk_overlap, 4);
        assert_eq!(settings.strategy, Strategy::FixedCount);
    }

    #[test]
    fn test_settings_default_separators() {
        let settings = SplitterSettings::from_toml_str(
            r#"
            chunk_size = 50
            chunk_overlap = 5
            strategy = { kind = "recursive" }
            "#,
        )
        .unwrap();
        assert_eq!(settings.strategy, Strategy::recursive());
    }

    #[test]
    fn test_settings_custom_separators() {
        let settings = SplitterSettings::from_toml_str(
            r#"
            [strategy]
            kind = "recursive"
            separators = [". ", " "]
            "#,
        )
        .unwrap();
        assert_eq!(settings.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(settings.strategy, Strategy::recursive_with(&[". ", " "]));
    }

    #[test]
    fn test_settings_reject_bad_overlap() {
        let result = SplitterSettings::from_toml_str("chunk_size = 10\nchunk_overlap = 12\n");
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_settings_reject_unknown_keys() {
        let result = SplitterSettings::from_toml_str("chunk_sise = 10\n");
        assert!(matches!(result, Err(Error::Settings(_))));
    }

    #[test]
    fn test_settings_load_missing_file() {
        let result = SplitterSettings::load("/nonexistent/chunkwise.toml");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
