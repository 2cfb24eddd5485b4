//! Single pass segmentation of source text into code, literal and comment spans.
//!
//! All delimiters are ASCII, so the scan walks bytes; every span boundary it
//! produces falls on a character boundary of the UTF-8 input.

use smartcomp_protocol::{Span, SpanKind};

/// Segments the whole of `text`. The spans tile `[0, text.len())`.
pub fn segment(text: &str) -> Vec<Span> {
    segment_until(text, text.len())
}

/// Segments `text` but stops as soon as the spans produced cover `limit`.
///
/// The scan ends at the first literal or comment opener at or past `limit`,
/// or right after a literal or comment that `limit` falls strictly inside.
/// An unterminated literal or comment ending at `limit` also ends the scan,
/// since a caret there is still inside it.
/// Callers that only need context left of a cursor pass the cursor here so
/// the cost does not grow with the size of the document.
pub fn segment_until(text: &str, limit: usize) -> Vec<Span> {
    Segmenter::new(text, limit).run()
}

/// Index of the span containing `offset`, or `None` at or past the tiled end.
pub fn locate(spans: &[Span], offset: usize) -> Option<usize> {
    let index = spans.partition_point(|span| span.end() <= offset);
    (index < spans.len()).then_some(index)
}

struct Segmenter<'a> {
    bytes: &'a [u8],
    limit: usize,
    spans: Vec<Span>,
    code_start: usize,
}

impl<'a> Segmenter<'a> {
    fn new(text: &'a str, limit: usize) -> Self {
        Self {
            bytes: text.as_bytes(),
            limit,
            spans: Vec::new(),
            code_start: 0,
        }
    }

    fn run(mut self) -> Vec<Span> {
        let len = self.bytes.len();
        let mut i = 0;

        while i < len {
            let next = self.bytes.get(i + 1).copied();

            let kind = match (self.bytes[i], next) {
                (b'"', _) => SpanKind::StringLiteral,
                (b'\'', _) => SpanKind::CharLiteral,
                (b'/', Some(b'*')) => SpanKind::BlockComment,
                (b'/', Some(b'/')) => SpanKind::LineComment,
                // An escaped quote in code never opens a literal
                (b'\\', Some(b'"' | b'\'')) => {
                    i += 2;
                    continue;
                }
                _ => {
                    i += 1;
                    continue;
                }
            };

            if !self.close_code(i) {
                return self.spans;
            }

            let closed = match kind {
                SpanKind::BlockComment => find(self.bytes, b"*/", i + 2).map(|pos| pos + 2),
                SpanKind::LineComment => find(self.bytes, b"\n", i + 2).map(|pos| pos + 1),
                _ => self.literal_end(i, self.bytes[i]),
            };
            let end = closed.unwrap_or(len);
            self.spans.push(Span::between(kind, i, end));
            self.code_start = end;
            // A caret at the end of an unterminated span is still inside it
            if end > self.limit || (closed.is_none() && end == self.limit) {
                return self.spans;
            }
            i = end;
        }

        self.spans.push(Span::between(SpanKind::Code, self.code_start, len));
        self.spans
    }

    /// Closes the running code span at `at`. Returns false when the scan has
    /// reached the limit and must stop.
    fn close_code(&mut self, at: usize) -> bool {
        self.spans.push(Span::between(SpanKind::Code, self.code_start, at));
        at < self.limit
    }

    /// End (exclusive) of the literal opened by `quote` at `start`, or `None`
    /// when it runs to the end of the text. A newline ends an unterminated
    /// literal and belongs to it.
    fn literal_end(&self, start: usize, quote: u8) -> Option<usize> {
        let mut j = start + 1;

        while j < self.bytes.len() {
            match self.bytes[j] {
                b'\\' => {
                    j += 2;
                    continue;
                }
                b'\n' => return Some(j + 1),
                b if b == quote => return Some(j + 1),
                _ => {}
            }
            j += 1;
        }

        None
    }
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| pos + from)
}
