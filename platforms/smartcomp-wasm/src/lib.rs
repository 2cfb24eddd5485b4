use serde::Serialize;
use smartcomp_parser::{complete, segment_until, Classifier};
use smartcomp_protocol::{CursorContext, Keywords, PropertyDescriptor, SpanKind};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// A span as seen from JavaScript: offsets in UTF-16 code units.
#[derive(Serialize)]
pub struct JsSpan {
    pub kind: SpanKind,
    pub start: usize,
    pub end: usize,
}

#[derive(Serialize)]
pub struct CompletionReport {
    pub context: CursorContext,
    pub property: Option<PropertyDescriptor>,
}

/// The engine instance an editor page keeps around.
#[wasm_bindgen]
pub struct SmartCompletion {
    keywords: Keywords,
}

#[wasm_bindgen]
impl SmartCompletion {
    /// `keywords` is `{ property_macros: string[], class_keyword: string }`;
    /// `undefined` selects the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(keywords: JsValue) -> Result<SmartCompletion, JsError> {
        let keywords = if keywords.is_undefined() || keywords.is_null() {
            Keywords::default()
        } else {
            serde_wasm_bindgen::from_value(keywords)
                .map_err(|error| JsError::new(&format!("invalid keywords: {error}")))?
        };
        Ok(Self { keywords })
    }

    /// Classifies the cursor (a UTF-16 offset, as JS strings index).
    pub fn classify(&self, text: &str, cursor: usize) -> Result<JsValue, JsError> {
        let offset = byte_offset(text, cursor)?;
        let context = Classifier::new(&self.keywords).classify(text, offset);
        to_js(&context)
    }

    /// Spans of `text`, stopping once they cover `limit` (UTF-16) when given.
    pub fn segment(&self, text: &str, limit: Option<usize>) -> Result<JsValue, JsError> {
        let index = Utf16Index::new(text);
        let limit = match limit {
            Some(units) => index.utf8(units.min(index.units())).ok_or_else(|| {
                JsError::new(&format!("limit {units} falls inside a surrogate pair"))
            })?,
            None => text.len(),
        };
        let spans: Vec<JsSpan> = segment_until(text, limit)
            .iter()
            .map(|span| JsSpan {
                kind: span.kind,
                start: index.utf16(span.start),
                end: index.utf16(span.end()),
            })
            .collect();
        to_js(&spans)
    }

    pub fn parse_property(&self, declaration: &str) -> Result<JsValue, JsError> {
        let property = smartcomp_parser::parse_property(declaration);
        to_js(&property)
    }

    /// Classification plus the parsed declaration when the cursor is on one.
    pub fn complete(&self, text: &str, cursor: usize) -> Result<JsValue, JsError> {
        let offset = byte_offset(text, cursor)?;
        let completion = complete(&self.keywords, text, offset);
        let report = CompletionReport {
            context: completion.context,
            property: completion.property,
        };
        to_js(&report)
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|error| JsError::new(&error.to_string()))
}

fn byte_offset(text: &str, cursor: usize) -> Result<usize, JsError> {
    Utf16Index::new(text)
        .utf8(cursor)
        .ok_or_else(|| JsError::new(&format!("cursor {cursor} is not a position in the text")))
}

/// Maps between UTF-8 byte offsets and UTF-16 code unit offsets of one text.
pub struct Utf16Index {
    /// `(byte offset, utf16 offset)` of every character start, plus the end.
    boundaries: Vec<(usize, usize)>,
}

impl Utf16Index {
    pub fn new(text: &str) -> Self {
        let mut boundaries = Vec::with_capacity(text.len() + 1);
        let mut units = 0;
        for (byte, c) in text.char_indices() {
            boundaries.push((byte, units));
            units += c.len_utf16();
        }
        boundaries.push((text.len(), units));
        Self { boundaries }
    }

    /// Byte offset of a UTF-16 offset, `None` inside a surrogate pair or past the end.
    pub fn utf8(&self, utf16: usize) -> Option<usize> {
        self.boundaries
            .binary_search_by_key(&utf16, |&(_, units)| units)
            .ok()
            .map(|i| self.boundaries[i].0)
    }

    /// Length of the text in UTF-16 code units.
    pub fn units(&self) -> usize {
        self.boundaries.last().map_or(0, |&(_, units)| units)
    }

    /// UTF-16 offset of a byte offset on a character boundary.
    pub fn utf16(&self, utf8: usize) -> usize {
        match self.boundaries.binary_search_by_key(&utf8, |&(byte, _)| byte) {
            Ok(i) => self.boundaries[i].1,
            Err(i) => self.boundaries[i.saturating_sub(1)].1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_offsets_are_identical() {
        let index = Utf16Index::new("class Foo");
        for offset in 0..=9 {
            assert_eq!(index.utf8(offset), Some(offset));
            assert_eq!(index.utf16(offset), offset);
        }
        assert_eq!(index.utf8(10), None);
    }

    #[test]
    fn test_multibyte_offsets() {
        // 'λ' is 2 bytes / 1 unit, '😀' is 4 bytes / 2 units
        let text = "λ😀x";
        let index = Utf16Index::new(text);

        assert_eq!(index.utf8(0), Some(0));
        assert_eq!(index.utf8(1), Some(2));
        assert_eq!(index.utf8(2), None); // inside the surrogate pair
        assert_eq!(index.utf8(3), Some(6));
        assert_eq!(index.utf8(4), Some(7));

        assert_eq!(index.utf16(2), 1);
        assert_eq!(index.utf16(6), 3);
        assert_eq!(index.utf16(text.len()), 4);
        assert_eq!(index.units(), 4);
    }

    #[test]
    fn test_limit_past_end_clamps() {
        let text = "λ x";
        let index = Utf16Index::new(text);
        assert_eq!(index.units(), 3);
        assert_eq!(index.utf8(42usize.min(index.units())), Some(text.len()));
        assert_eq!(Utf16Index::new("").units(), 0);
    }
}
