//! The Chunk type: a piece of text with its position and overlap.

use serde::Serialize;

/// A chunk of text with its position in the original document.
///
/// ## Offsets
///
/// `start` and `end` are byte offsets into the original text, so the chunk
/// can always be recovered by slicing:
///
/// ```rust
/// use chunkwise::Chunk;
///
/// let text = "Hello, world!";
/// let chunk = Chunk::new("world", 7, 12, 0, 0);
///
/// assert_eq!(&text[chunk.span()], "world");
/// ```
///
/// ## Overlap
///
/// `overlap` counts the characters (not bytes) this chunk shares with the
/// one before it. They sit at the head of `text`:
///
/// ```text
/// Original: "abcdefghij"   size 6, overlap 2
/// Chunk 0:  "abcdef"       [0..6]  overlap 0
/// Chunk 1:  "efghij"       [4..10] overlap 2
///            ^^
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// The chunk text.
    pub text: String,
    /// Byte offset where this chunk starts in the original document.
    pub start: usize,
    /// Byte offset where this chunk ends (exclusive) in the original document.
    pub end: usize,
    /// Zero-based index of this chunk in the sequence.
    pub index: usize,
    /// Characters shared with the previous chunk.
    pub overlap: usize,
}

impl Chunk {
    /// Create a new chunk.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        start: usize,
        end: usize,
        index: usize,
        overlap: usize,
    ) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            index,
            overlap,
        }
    }

    /// The length of this chunk in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether this chunk is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The byte span of this chunk in the original document.
    #[must_use]
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// The part of this chunk not shared with the previous one.
    #[must_use]
    pub fn fresh_text(&self) -> &str {
        match self.text.char_indices().nth(self.overlap) {
            Some((at, _)) => &self.text[at..],
            None => "",
        }
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk {{ index: {}, span: {}..{}, chars: {}, overlap: {} }}",
            self.index,
            self.start,
            self.end,
            self.char_len(),
            self.overlap
        )
    }
}

/// Join chunks back into the text they were split from.
///
/// Each chunk contributes everything after its declared overlap.
///
/// ```rust
/// use chunkwise::{reconstruct, split, ChunkConfig, Strategy};
///
/// let text = "The quick brown fox jumps over the lazy dog.";
/// let config = ChunkConfig::new(12, 3).unwrap();
/// let chunks = split(text, &config, &Strategy::FixedCount);
///
/// assert_eq!(reconstruct(&chunks), text);
/// ```
#[must_use]
pub fn reconstruct(chunks: &[Chunk]) -> String {
    let mut out = String::with_capacity(chunks.iter().map(|c| c.text.len()).sum());
    for chunk in chunks {
        out.push_str(chunk.fresh_text());
    }
    out
}

/// Byte offset of every `char` in `text`, followed by `text.len()`.
///
/// Index `i` is where character `i` starts, so `offsets[a]..offsets[b]` is
/// the byte range of characters `a..b`.
pub(crate) fn char_offsets(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(at, _)| at)
        .chain(std::iter::once(text.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_offsets() {
        assert_eq!(char_offsets(""), vec![0]);
        assert_eq!(char_offsets("ab"), vec![0, 1, 2]);
        assert_eq!(char_offsets("a日b"), vec![0, 1, 4, 5]);
    }

    #[test]
    fn test_fresh_text_skips_overlap() {
        let chunk = Chunk::new("efghij", 4, 10, 1, 2);
        assert_eq!(chunk.fresh_text(), "ghij");
    }

    #[test]
    fn test_fresh_text_counts_chars() {
        let chunk = Chunk::new("日本語b", 0, 10, 1, 2);
        assert_eq!(chunk.fresh_text(), "語b");
        assert_eq!(chunk.char_len(), 4);
    }

    #[test]
    fn test_reconstruct_empty() {
        assert_eq!(reconstruct(&[]), "");
    }

    #[test]
    fn test_display() {
        let chunk = Chunk::new("abc", 0, 3, 0, 0);
        assert_eq!(
            chunk.to_string(),
            "Chunk { index: 0, span: 0..3, chars: 3, overlap: 0 }"
        );
    }
}
