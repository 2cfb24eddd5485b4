//! Word searches that walk outward from a cursor across the span sequence.
//!
//! Code spans contribute their text, comments are stepped over, and a literal
//! ends the walk.

use std::collections::VecDeque;

use smartcomp_protocol::{Span, SpanKind, SpanKinds};

use crate::segment::locate;
use crate::word::word_range;

/// Span kinds a word search steps over without reading.
const TRANSPARENT: SpanKinds = SpanKinds::COMMENTS;

/// A word found by a boundary scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub text: String,
    /// Offset of the first character of the word in the source text.
    pub start: usize,
}

/// Nearest whitespace-separated word left of `offset`, or `""`.
pub fn previous_word(text: &str, spans: &[Span], offset: usize) -> String {
    previous_symbol(text, spans, offset)
        .map(|symbol| symbol.text)
        .unwrap_or_default()
}

/// Nearest whitespace-separated word right of `offset`, or `""`.
pub fn next_word(text: &str, spans: &[Span], offset: usize) -> String {
    next_symbol(text, spans, offset)
        .map(|symbol| symbol.text)
        .unwrap_or_default()
}

/// The word before the last whitespace run left of `offset`.
///
/// An offset equal to the end of the last span belongs to that span, so a
/// segmentation truncated at the cursor can still be searched backwards.
pub fn previous_symbol(text: &str, spans: &[Span], offset: usize) -> Option<Symbol> {
    if !text.is_char_boundary(offset) {
        return None;
    }
    let index = locate(spans, offset).or_else(|| {
        spans
            .last()
            .filter(|span| span.end() == offset)
            .map(|_| spans.len() - 1)
    })?;

    let mut buffer = CodeBuffer::default();

    for span in spans[..=index].iter().rev() {
        if span.kind == SpanKind::Code {
            let end = span.end().min(offset);
            buffer.prepend(span.start, text.get(span.start..end)?);

            if let Some(boundary) = last_word_end(&buffer.text) {
                return buffer.symbol_at(boundary);
            }
        } else if !TRANSPARENT.includes(span.kind) {
            break;
        }
    }

    None
}

/// The word after the first whitespace run right of `offset`.
///
/// Nothing is found when the spans end at `offset`; a forward search needs a
/// segmentation that reaches past the cursor.
pub fn next_symbol(text: &str, spans: &[Span], offset: usize) -> Option<Symbol> {
    if !text.is_char_boundary(offset) {
        return None;
    }
    let index = locate(spans, offset)?;

    let mut buffer = CodeBuffer::default();

    for span in &spans[index..] {
        if span.kind == SpanKind::Code {
            let start = span.start.max(offset);
            buffer.append(start, text.get(start..span.end())?);

            if let Some(boundary) = first_word_start(&buffer.text) {
                return buffer.symbol_at(boundary);
            }
        } else if !TRANSPARENT.includes(span.kind) {
            break;
        }
    }

    None
}

/// Offset of the whitespace character that ends the last word in `buffer`.
fn last_word_end(buffer: &str) -> Option<usize> {
    let mut chars = buffer.char_indices().rev().peekable();

    while let Some((index, c)) = chars.next() {
        if c.is_whitespace() && chars.peek().is_some_and(|&(_, prev)| !prev.is_whitespace()) {
            return Some(index);
        }
    }

    None
}

/// Offset of the first non-whitespace character that follows whitespace.
fn first_word_start(buffer: &str) -> Option<usize> {
    let mut chars = buffer.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if c.is_whitespace() {
            if let Some(&(index, next)) = chars.peek() {
                if !next.is_whitespace() {
                    return Some(index);
                }
            }
        }
    }

    None
}

/// Code text joined across skipped comments, remembering where each piece
/// came from in the source.
#[derive(Default)]
struct CodeBuffer {
    text: String,
    /// `(source_start, len)` per piece, in buffer order.
    pieces: VecDeque<(usize, usize)>,
}

impl CodeBuffer {
    fn prepend(&mut self, source_start: usize, chunk: &str) {
        self.text.insert_str(0, chunk);
        self.pieces.push_front((source_start, chunk.len()));
    }

    fn append(&mut self, source_start: usize, chunk: &str) {
        self.text.push_str(chunk);
        self.pieces.push_back((source_start, chunk.len()));
    }

    fn source_offset(&self, buffer_offset: usize) -> usize {
        let mut consumed = 0;
        for &(source_start, len) in &self.pieces {
            if buffer_offset < consumed + len {
                return source_start + (buffer_offset - consumed);
            }
            consumed += len;
        }
        self.pieces
            .back()
            .map_or(buffer_offset, |&(source_start, len)| source_start + len)
    }

    fn symbol_at(&self, boundary: usize) -> Option<Symbol> {
        let range = word_range(&self.text, boundary)?;
        Some(Symbol {
            text: self.text[range.clone()].to_string(),
            start: self.source_offset(range.start),
        })
    }
}
