pub mod segment;
pub mod word;
pub mod scan;
pub mod context;
pub mod types;
pub mod property;

pub use context::{classify, Classifier};
pub use property::{declaration_at, parse_property, try_parse_property, PropertyError};
pub use scan::{next_symbol, next_word, previous_symbol, previous_word, Symbol};
pub use segment::{locate, segment, segment_until};
pub use types::{parse_type_name, try_parse_type_name, ParsedType, TypeNameError, TypeNode};
pub use word::{extract_word, word_range};

use smartcomp_protocol::{Category, CursorContext, Keywords, PropertyDescriptor};

/// Result of one completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub context: CursorContext,
    /// Set when the cursor is on a property declaration that parsed.
    pub property: Option<PropertyDescriptor>,
}

/// Editor entry point: classify the cursor and, on a property declaration,
/// parse the declaration it sits on.
pub fn complete(keywords: &Keywords, text: &str, cursor: usize) -> Completion {
    let context = Classifier::new(keywords).classify(text, cursor);

    let property = match context.category {
        Category::PropertyDeclaration => {
            Some(parse_property(declaration_at(text, cursor))).filter(|p| !p.is_empty())
        }
        _ => None,
    };

    Completion { context, property }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcomp_protocol::SpanKind;

    const HEADER: &str = r#"#include <QObject>

class Thermostat : public QObject // exported
{
    Q_OBJECT
    Q_PROPERTY(QList<double> readings READ readings NOTIFY readingsChanged)
    Q_PROPERTY(Qt::Orientation orientation MEMBER m_orientation)

public:
    /* "class Fake" must not count */
    QString label() const { return "class Label"; }
};
"#;

    #[test]
    fn test_completion_integration() {
        // 1. Cursor inside the first Q_PROPERTY keyword
        let cursor = HEADER.find("Q_PROPERTY").unwrap() + 4;
        let completion = complete(&Keywords::default(), HEADER, cursor);

        assert_eq!(completion.context.category, Category::PropertyDeclaration);
        assert_eq!(completion.context.word, "Q_PROPERTY");

        let property = completion.property.expect("Expected a parsed property");
        assert_eq!(property.type_name, "QList<double>");
        assert_eq!(property.property_name, "readings");
        assert_eq!(property.reader, "readings");
        assert_eq!(property.change_notifier, "readingsChanged");

        // 2. Second declaration uses a qualified type
        let cursor = HEADER.rfind("Q_PROPERTY").unwrap() + 10;
        let property = complete(&Keywords::default(), HEADER, cursor)
            .property
            .expect("Expected a parsed property");
        assert_eq!(property.type_name, "Qt::Orientation");
        assert_eq!(property.backing_member, "m_orientation");

        // 3. Class name
        let cursor = HEADER.find("Thermostat").unwrap() + 2;
        let completion = complete(&Keywords::default(), HEADER, cursor);
        assert_eq!(completion.context.category, Category::ClassNameDeclaration);
        assert_eq!(completion.context.word, "Thermostat");
        assert!(completion.property.is_none());

        // 4. Words inside comments and strings never classify
        for needle in ["Fake", "Label"] {
            let cursor = HEADER.find(needle).unwrap() + 1;
            assert_eq!(
                complete(&Keywords::default(), HEADER, cursor).context,
                CursorContext::unclassified()
            );
        }
    }

    #[test]
    fn test_segments_of_header() {
        let spans = segment(HEADER);

        let comments = spans.iter().filter(|s| s.kind.is_comment()).count();
        let strings = spans.iter().filter(|s| s.kind == SpanKind::StringLiteral).count();
        assert_eq!(comments, 2);
        assert_eq!(strings, 1);
        assert_eq!(spans.last().map(|s| s.end()), Some(HEADER.len()));

        let name_start = HEADER.find("Thermostat").unwrap();
        assert_eq!(previous_word(HEADER, &spans, name_start), "class");
        // `:` is not a word
        assert_eq!(next_word(HEADER, &spans, name_start), "");
        assert_eq!(next_word(HEADER, &spans, name_start + 11), "public");
    }
}
