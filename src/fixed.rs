//! Fixed-count splitting with overlap.
//!
//! The baseline: cut every `chunk_size - chunk_overlap` characters and take
//! `chunk_size` characters from each cut.
//!
//! ```text
//! Text: 56 chars, size 26, overlap 4  (step 22)
//!
//! Chunk 0: [0..26]
//! Chunk 1: [22..48]   <- re-reads the last 4 chars of chunk 0
//! Chunk 2: [44..56]   <- reaches the end, stop
//! ```
//!
//! Content is ignored entirely: words and sentences are cut wherever the
//! offset lands. Offsets are counted in `char`s, so a cut never lands inside
//! a multi-byte character.

use crate::chunk::{char_offsets, Chunk};
use crate::config::ChunkConfig;

/// Split `text` at fixed character offsets.
pub(crate) fn split_fixed(text: &str, config: &ChunkConfig) -> Vec<Chunk> {
    let offsets = char_offsets(text);
    let total = offsets.len() - 1;

    let mut chunks = Vec::with_capacity(estimate_chunks(total, config));
    let mut start = 0;

    loop {
        let end = (start + config.chunk_size()).min(total);
        let overlap = if chunks.is_empty() {
            0
        } else {
            config.chunk_overlap()
        };

        let (lo, hi) = (offsets[start], offsets[end]);
        chunks.push(Chunk::new(&text[lo..hi], lo, hi, chunks.len(), overlap));

        if end == total {
            break;
        }
        start += config.step();
    }

    chunks
}

/// Number of chunks [`split_fixed`] produces for `total` characters.
pub(crate) fn estimate_chunks(total: usize, config: &ChunkConfig) -> usize {
    if total <= config.chunk_size() {
        return 1;
    }
    (total - config.chunk_overlap()).div_ceil(config.step())
}
