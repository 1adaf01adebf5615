//! Recursive separator splitting (LangChain-style).
//!
//! Tries progressively finer separators until every piece fits, then packs
//! pieces back together into overlapping chunks.
//!
//! ## The Algorithm
//!
//! Given separators `["\n\n", "\n", " ", ""]`, size `100`, overlap `20`:
//!
//! ```text
//! 1. Decompose: every piece must be <= 80 chars (size - overlap)
//!    - Split on "\n\n" (paragraphs)
//!    - Any paragraph > 80 chars: split it on "\n" (lines)
//!    - Any line > 80 chars: split it on " " (words)
//!    - Any word > 80 chars: split it on "" (single characters)
//! 2. Pack: fill chunk 0 with whole pieces up to 100 chars.
//!    Every later chunk starts with the last 20 chars of the previous
//!    one, then takes whole pieces while it stays <= 100 chars.
//! ```
//!
//! A separator stays attached to the end of the piece before it, so pieces
//! tile the input with no gaps. Because a piece is never longer than
//! `size - overlap`, there is always room for at least one piece after the
//! overlap, and every chunk makes progress.
//!
//! When none of the remaining separators occur in an oversized piece, the
//! piece is cut into single characters, which packs exactly like the
//! fixed-count strategy.

use std::ops::Range;

use tracing::trace;

use crate::chunk::{char_offsets, Chunk};
use crate::config::ChunkConfig;

/// Split `text` on the separator hierarchy, then pack with overlap.
pub(crate) fn split_recursive(
    text: &str,
    config: &ChunkConfig,
    separators: &[String],
) -> Vec<Chunk> {
    let offsets = char_offsets(text);
    let total = offsets.len() - 1;

    if total <= config.chunk_size() {
        return vec![Chunk::new(text, 0, text.len(), 0, 0)];
    }

    let splitter = Decomposer {
        text,
        offsets: &offsets,
        limit: config.step(),
    };
    let mut pieces = Vec::new();
    splitter.decompose(0..total, separators, &mut pieces);
    trace!(pieces = pieces.len(), limit = config.step(), "decomposed text");

    pack(text, &offsets, &pieces, config)
}

/// Breaks a character range into pieces of at most `limit` characters.
struct Decomposer<'a> {
    text: &'a str,
    offsets: &'a [usize],
    limit: usize,
}

impl Decomposer<'_> {
    fn decompose(
        &self,
        range: Range<usize>,
        separators: &[String],
        out: &mut Vec<Range<usize>>,
    ) {
        if range.len() <= self.limit {
            out.push(range);
            return;
        }

        let slice = &self.text[self.offsets[range.start]..self.offsets[range.end]];
        let found = separators
            .iter()
            .position(|sep| sep.is_empty() || slice.contains(sep.as_str()));

        let Some(level) = found else {
            trace!(chars = range.len(), "no separator left, cutting by character");
            Self::cut_chars(range, out);
            return;
        };

        let sep = separators[level].as_str();
        if sep.is_empty() {
            Self::cut_chars(range, out);
            return;
        }

        let finer = &separators[level + 1..];
        let base = self.offsets[range.start];
        let mut part_start = range.start;

        for (at, _) in slice.match_indices(sep) {
            let part_end = self.char_index(base + at + sep.len());
            self.emit(part_start..part_end, finer, out);
            part_start = part_end;
        }
        if part_start < range.end {
            self.emit(part_start..range.end, finer, out);
        }
    }

    fn emit(&self, part: Range<usize>, finer: &[String], out: &mut Vec<Range<usize>>) {
        if part.len() <= self.limit {
            out.push(part);
        } else {
            self.decompose(part, finer, out);
        }
    }

    fn cut_chars(range: Range<usize>, out: &mut Vec<Range<usize>>) {
        out.extend(range.map(|i| i..i + 1));
    }

    /// Character index of a byte offset that sits on a char boundary.
    fn char_index(&self, byte: usize) -> usize {
        self.offsets.partition_point(|&at| at < byte)
    }
}

/// Greedily pack contiguous pieces into chunks of at most `chunk_size`
/// characters, each re-reading the last `chunk_overlap` characters of the
/// one before.
fn pack(
    text: &str,
    offsets: &[usize],
    pieces: &[Range<usize>],
    config: &ChunkConfig,
) -> Vec<Chunk> {
    let mut chunks = Vec::with_capacity(pieces.len().min(offsets.len() / config.step() + 1));
    let mut next = 0;
    let mut start = 0;
    let mut shared = 0;

    while next < pieces.len() {
        // The first piece always fits: shared + piece <= overlap + step.
        let mut end = pieces[next].end;
        next += 1;
        while next < pieces.len() && pieces[next].end - start <= config.chunk_size() {
            end = pieces[next].end;
            next += 1;
        }

        let (lo, hi) = (offsets[start], offsets[end]);
        chunks.push(Chunk::new(&text[lo..hi], lo, hi, chunks.len(), shared));

        shared = config.chunk_overlap().min(end - start);
        start = end - shared;
    }

    chunks
}
