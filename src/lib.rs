//! # chunkwise
//!
//! Overlapping text chunking for retrieval pipelines.
//!
//! ## The Problem
//!
//! Embedding models and LLM context windows take bounded input. Documents
//! don't fit, so they are cut into chunks. Two things matter:
//!
//! - Every chunk stays under a hard size limit.
//! - Neighbouring chunks share a little text, so a sentence that straddles a
//!   cut is still readable from at least one side.
//!
//! ```text
//! "The answer is 42"
//!         ↓
//! No overlap:   ["The answer i", "s 42"]            <- broken
//! Overlap 4:    ["The answer i", "er is 42"]        <- "er i" re-read
//! ```
//!
//! ## Strategies
//!
//! ### Fixed count
//!
//! Cut every `chunk_size - chunk_overlap` characters. Fast, predictable,
//! ignores content.
//!
//! ### Recursive (LangChain-style)
//!
//! Prefer paragraph breaks, then line breaks, then spaces, then anything.
//! Pieces are packed back together up to `chunk_size`, and each chunk after
//! the first re-reads the last `chunk_overlap` characters of its predecessor.
//!
//! ## Guarantees
//!
//! For any text and any valid [`ChunkConfig`], with either [`Strategy`]:
//!
//! - every chunk has at most `chunk_size` characters
//! - chunk `i + 1` starts with the last `min(chunk_overlap, len(chunk i))`
//!   characters of chunk `i`, recorded in [`Chunk::overlap`]
//! - [`reconstruct`] gives back the original text
//! - text no longer than `chunk_size` comes back as a single chunk
//!
//! Sizes are counted in `char`s. Byte offsets in [`Chunk`] always sit on
//! char boundaries.
//!
//! ## Quick Start
//!
//! ```rust
//! use chunkwise::{reconstruct, split, ChunkConfig, Strategy};
//!
//! let text = "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz";
//! let config = ChunkConfig::new(26, 4)?;
//!
//! let fixed = split(text, &config, &Strategy::FixedCount);
//! let recursive = split(text, &config, &Strategy::recursive());
//!
//! assert_eq!(fixed, recursive); // no separators: same cuts
//! assert_eq!(fixed[1].text, "wxyzabcdefghijklmnopqrstuv");
//! assert_eq!(reconstruct(&fixed), text);
//! # Ok::<(), chunkwise::Error>(())
//! ```
//!
//! ## Credentials
//!
//! Downstream stages need an API key. [`Credentials::from_env`] reads
//! `OPENAI_API_KEY` from the environment or a `.env` file and returns it as
//! a value; it does not modify the process environment.

mod chunk;
mod config;
mod credentials;
mod error;
mod fixed;
mod recursive;

use tracing::debug;

pub use chunk::{reconstruct, Chunk};
pub use config::{
    ChunkConfig, SplitterSettings, Strategy, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE,
    DEFAULT_SEPARATORS,
};
pub use credentials::{Credentials, API_KEY_VAR};
pub use error::{ConfigError, Error, Result};

/// Split `text` into overlapping chunks.
///
/// An unusable size/overlap pair is rejected earlier, by
/// [`ChunkConfig::new`], so splitting itself cannot fail.
///
/// # Examples
///
/// ```rust
/// use chunkwise::{split, ChunkConfig, Strategy};
///
/// let config = ChunkConfig::new(15, 5)?;
/// let chunks = split("Hello world this is a test message", &config, &Strategy::recursive());
///
/// assert_eq!(chunks[0].text, "Hello world ");
/// assert_eq!(chunks[1].text, "orld this is a ");
/// assert_eq!(chunks[1].overlap, 5);
///
/// assert!(ChunkConfig::new(10, 10).is_err());
/// # Ok::<(), chunkwise::Error>(())
/// ```
#[must_use]
pub fn split(text: &str, config: &ChunkConfig, strategy: &Strategy) -> Vec<Chunk> {
    let chunks = match strategy {
        Strategy::FixedCount => fixed::split_fixed(text, config),
        Strategy::Recursive { separators } => {
            recursive::split_recursive(text, config, separators)
        }
    };

    debug!(
        strategy = strategy.name(),
        chunk_size = config.chunk_size(),
        chunk_overlap = config.chunk_overlap(),
        bytes = text.len(),
        chunks = chunks.len(),
        "split text"
    );
    chunks
}

/// Like [`split`], returning only the chunk texts.
#[must_use]
pub fn split_text(text: &str, config: &ChunkConfig, strategy: &Strategy) -> Vec<String> {
    split(text, config, strategy)
        .into_iter()
        .map(|c| c.text)
        .collect()
}

/// A config and strategy bundled for repeated use.
///
/// ```rust
/// use chunkwise::{ChunkConfig, Splitter, Strategy};
///
/// let splitter = Splitter::new(ChunkConfig::new(26, 4)?, Strategy::FixedCount);
/// let a = splitter.split_text("abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz");
/// assert_eq!(a, vec![
///     "abcdefghijklmnopqrstuvwxyz",
///     "wxyzabcdefghijklmnopqrstuv",
///     "stuvwxyz",
/// ]);
/// # Ok::<(), chunkwise::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splitter {
    config: ChunkConfig,
    strategy: Strategy,
}

impl Splitter {
    /// Bundle an already-validated config with a strategy.
    #[must_use]
    pub fn new(config: ChunkConfig, strategy: Strategy) -> Self {
        Self { config, strategy }
    }

    /// Build a splitter from file settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the settings carry an
    /// unusable size/overlap pair.
    pub fn from_settings(settings: &SplitterSettings) -> Result<Self> {
        Ok(Self::new(settings.chunk_config()?, settings.strategy.clone()))
    }

    /// The size/overlap pair.
    #[must_use]
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// The segmentation strategy.
    #[must_use]
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Split `text` into chunks.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        split(text, &self.config, &self.strategy)
    }

    /// Split `text`, returning only the chunk texts.
    #[must_use]
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split(text).into_iter().map(|c| c.text).collect()
    }

    /// Expected number of chunks for `chars` characters.
    ///
    /// Exact for [`Strategy::FixedCount`]. Recursive splitting ends chunks
    /// early at separators, so treat it as a pre-allocation hint there.
    #[must_use]
    pub fn estimate_chunks(&self, chars: usize) -> usize {
        fixed::estimate_chunks(chars, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_rejects_equal_overlap() {
        let result = ChunkConfig::new(10, 10);
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_split_text_matches_split() {
        let config = ChunkConfig::new(12, 3).unwrap();
        let text = "The quick brown fox jumps over the lazy dog.";
        let chunks = split(text, &config, &Strategy::FixedCount);
        let texts = split_text(text, &config, &Strategy::FixedCount);
        assert_eq!(
            texts,
            chunks.iter().map(|c| c.text.clone()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_splitter_matches_free_function() {
        let config = ChunkConfig::new(20, 5).unwrap();
        let text = "The quick brown fox jumps over the lazy dog.";
        for strategy in [Strategy::FixedCount, Strategy::recursive()] {
            let splitter = Splitter::new(config, strategy.clone());
            assert_eq!(splitter.split(text), split(text, &config, &strategy));
        }
    }

    #[test]
    fn test_splitter_from_settings() {
        let settings = SplitterSettings {
            chunk_size: 26,
            chunk_overlap: 4,
            strategy: Strategy::FixedCount,
        };
        let splitter = Splitter::from_settings(&settings).unwrap();
        assert_eq!(splitter.config().step(), 22);
        assert_eq!(splitter.strategy(), &Strategy::FixedCount);
    }

    #[test]
    fn test_splitter_from_bad_settings() {
        let settings = SplitterSettings {
            chunk_size: 4,
            chunk_overlap: 26,
            ..SplitterSettings::default()
        };
        assert!(Splitter::from_settings(&settings).is_err());
    }

    #[test]
    fn test_estimate_exact_for_fixed() {
        let text = "One two three four five six seven eight nine ten eleven twelve.";
        let splitter = Splitter::new(ChunkConfig::new(16, 4).unwrap(), Strategy::FixedCount);
        assert_eq!(
            splitter.split(text).len(),
            splitter.estimate_chunks(text.chars().count())
        );
    }

    #[test]
    fn test_splitter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Splitter>();
    }
}
