use smartcomp_protocol::{Category, CursorContext, Keywords, Span, SpanKind};
use tracing::{enabled, trace, Level};

use crate::scan::{next_word, previous_symbol, previous_word};
use crate::segment::segment_until;
use crate::word::word_range;

/// Decides what the word under an editor cursor declares.
pub struct Classifier<'a> {
    keywords: &'a Keywords,
}

impl<'a> Classifier<'a> {
    pub fn new(keywords: &'a Keywords) -> Self {
        Self { keywords }
    }

    /// Primary entry point: (text, cursor) -> CursorContext
    pub fn classify(&self, text: &str, cursor: usize) -> CursorContext {
        if text.is_empty() || !text.is_char_boundary(cursor) {
            return CursorContext::unclassified();
        }

        // Only the context left of the cursor matters
        let spans = segment_until(text, cursor);
        let Some(last) = spans.last().copied() else {
            return CursorContext::unclassified();
        };
        // Inside a literal or a comment
        if last.kind != SpanKind::Code {
            return CursorContext::unclassified();
        }

        let code = last.text(text);
        let word = cursor
            .checked_sub(last.start)
            .and_then(|relative| word_range(code, relative));

        let context = match word {
            Some(range) => {
                let start = last.start + range.start;
                self.classify_word(text, &spans, &code[range], start)
            }
            None => self.classify_gap(text, &spans, cursor),
        };

        if enabled!(Level::TRACE) {
            trace!(
                category = ?context.category,
                word = %context.word,
                previous = %previous_word(text, &spans, cursor),
                next = %next_word(text, &spans, cursor),
                "classified cursor"
            );
        }

        context
    }

    fn classify_word(&self, text: &str, spans: &[Span], word: &str, start: usize) -> CursorContext {
        if self.keywords.is_property_macro(word) {
            return CursorContext::new(Category::PropertyDeclaration, word);
        }

        let previous = previous_word(text, spans, start);
        let category = if self.keywords.is_class_keyword(&previous) {
            Category::ClassNameDeclaration
        } else {
            Category::Unclassified
        };

        CursorContext::new(category, word)
    }

    /// The cursor touches no word, e.g. `class |` or `class Foo |{`.
    fn classify_gap(&self, text: &str, spans: &[Span], cursor: usize) -> CursorContext {
        let Some(previous) = previous_symbol(text, spans, cursor) else {
            return CursorContext::unclassified();
        };
        // Only a word on the cursor's own line can be the subject
        let word_end = previous.start + previous.text.len();
        if text.get(word_end..cursor).map_or(true, |gap| gap.contains('\n')) {
            return CursorContext::unclassified();
        }

        // A name is about to be typed after `class`
        if self.keywords.is_class_keyword(&previous.text) {
            return CursorContext::new(Category::ClassNameDeclaration, "");
        }

        // Otherwise the word just typed is the subject
        let context = self.classify_word(text, spans, &previous.text, previous.start);
        if context.category == Category::Unclassified {
            return CursorContext::unclassified();
        }
        context
    }
}

/// Classifies `cursor` with the default keywords.
pub fn classify(text: &str, cursor: usize) -> CursorContext {
    Classifier::new(&Keywords::default()).classify(text, cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name_after_keyword() {
        let context = classify("class Foo {", 10);
        assert_eq!(context.category, Category::ClassNameDeclaration);
        assert_eq!(context.word, "Foo");

        let context = classify("class Foo {", 8);
        assert_eq!(context, CursorContext::new(Category::ClassNameDeclaration, "Foo"));

        let context = classify("class Foo", 9);
        assert_eq!(context, CursorContext::new(Category::ClassNameDeclaration, "Foo"));
    }

    #[test]
    fn test_class_keyword_before_name_is_typed() {
        let context = classify("class ", 6);
        assert_eq!(context, CursorContext::new(Category::ClassNameDeclaration, ""));
    }

    #[test]
    fn test_class_keyword_across_comment() {
        let text = "class /* exported */ Widget : public QObject";
        let cursor = text.find("Widget").unwrap() + 3;
        let context = classify(text, cursor);
        assert_eq!(context, CursorContext::new(Category::ClassNameDeclaration, "Widget"));
    }

    #[test]
    fn test_property_keyword() {
        let context = classify("PROPERTY(int x)", 8);
        assert_eq!(context.category, Category::PropertyDeclaration);
        assert_eq!(context.word, "PROPERTY");

        let text = "    Q_PROPERTY(int x READ x)";
        let context = classify(text, 7);
        assert_eq!(context, CursorContext::new(Category::PropertyDeclaration, "Q_PROPERTY"));
    }

    #[test]
    fn test_property_keyword_followed_by_literal() {
        // The segmentation stops at the literal right after the cursor
        let text = "Q_PROPERTY\"x\"";
        let context = classify(text, 10);
        assert_eq!(context.category, Category::PropertyDeclaration);
    }

    #[test]
    fn test_caret_after_unterminated_comment() {
        assert_eq!(classify("class Foo // note", 17), CursorContext::unclassified());
        assert_eq!(classify("class Foo /* todo", 17), CursorContext::unclassified());
        assert_eq!(classify("Q_PROPERTY /* x", 15), CursorContext::unclassified());

        // Once the comment is closed the caret is back in code
        let text = "class Foo /* todo */ ";
        assert_eq!(
            classify(text, text.len()),
            CursorContext::new(Category::ClassNameDeclaration, "Foo")
        );
    }

    #[test]
    fn test_gap_does_not_cross_lines() {
        assert_eq!(classify("class Foo\n\n\n\n   ", 16), CursorContext::unclassified());
        assert_eq!(classify("class\n", 6), CursorContext::unclassified());

        let text = "class Foo // name\n";
        assert_eq!(classify(text, text.len()), CursorContext::unclassified());

        assert_eq!(
            classify("class Foo \t{", 11),
            CursorContext::new(Category::ClassNameDeclaration, "Foo")
        );
    }

    #[test]
    fn test_unclassified_word() {
        let context = classify("int value = 3;", 6);
        assert_eq!(context, CursorContext::new(Category::Unclassified, "value"));

        assert_eq!(classify("a + b", 2), CursorContext::unclassified());
    }

    #[test]
    fn test_inside_literal_or_comment() {
        let text = "class \"Foo\" {";
        assert_eq!(classify(text, 8), CursorContext::unclassified());

        let text = "/* class Foo */ int x;";
        assert_eq!(classify(text, 11), CursorContext::unclassified());

        let text = "int x; // class Foo\nint y;";
        assert_eq!(classify(text, 16), CursorContext::unclassified());
    }

    #[test]
    fn test_after_comment_is_code_again() {
        let text = "// note\nclass Foo";
        assert_eq!(
            classify(text, text.len()),
            CursorContext::new(Category::ClassNameDeclaration, "Foo")
        );
    }

    #[test]
    fn test_empty_and_out_of_range() {
        assert_eq!(classify("", 0), CursorContext::unclassified());
        assert_eq!(classify("class Foo", 42), CursorContext::unclassified());
        assert_eq!(classify("λ", 1), CursorContext::unclassified());
    }

    #[test]
    fn test_custom_keywords() {
        let keywords = Keywords {
            property_macros: vec!["MY_PROP".to_string()],
            class_keyword: "struct".to_string(),
        };
        let classifier = Classifier::new(&keywords);

        assert_eq!(
            classifier.classify("struct Point {", 12).category,
            Category::ClassNameDeclaration
        );
        assert_eq!(
            classifier.classify("MY_PROP(int x)", 3).category,
            Category::PropertyDeclaration
        );
        assert_eq!(
            classifier.classify("Q_PROPERTY(int x)", 3).category,
            Category::Unclassified
        );
    }

    #[test]
    fn test_classification_is_idempotent() {
        let text = "class Foo : public QObject {\n    Q_PROPERTY(int x READ x)\n};";
        for cursor in 0..=text.len() {
            assert_eq!(classify(text, cursor), classify(text, cursor));
        }
    }
}
