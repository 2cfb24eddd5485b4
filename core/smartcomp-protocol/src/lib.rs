#![no_std] // Shared with the wasm host

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod span;
pub mod model;

// Re-export core types for convenience
pub use span::{Span, SpanKind, SpanKinds};
pub use model::*;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_span_geometry() {
        let span = Span::new(SpanKind::Code, 3, 4);
        assert_eq!(span.end(), 7);
        assert_eq!(span.range(), 3..7);
        assert!(span.contains(3));
        assert!(!span.contains(7));
        assert_eq!(span.text("abcdefghij"), "defg");

        // Out of range spans never panic
        assert_eq!(Span::new(SpanKind::Code, 8, 10).text("abc"), "");
        assert!(Span::between(SpanKind::Code, 5, 2).is_empty());
    }

    #[test]
    fn test_span_kind_names() {
        for kind in SpanKind::ALL {
            assert_eq!(SpanKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(SpanKind::from_name("nope"), None);
    }

    #[test]
    fn test_span_kinds_set() {
        assert!(SpanKinds::COMMENTS.includes(SpanKind::LineComment));
        assert!(SpanKinds::COMMENTS.includes(SpanKind::BlockComment));
        assert!(!SpanKinds::COMMENTS.includes(SpanKind::Code));
        assert!(SpanKinds::LITERALS.includes(SpanKind::CharLiteral));
        assert!(!SpanKinds::LITERALS.includes(SpanKind::LineComment));
    }

    #[test]
    fn test_descriptor_accessors() {
        let mut property = PropertyDescriptor::default();
        assert!(property.is_empty());

        *property.attribute_mut("READ").unwrap() = "x".into();
        *property.attribute_mut("NOTIFY").unwrap() = "xChanged".into();
        assert!(property.attribute_mut("CONSTANT").is_none());

        let pairs: Vec<_> = property.accessors().collect();
        assert_eq!(pairs, [("READ", "x"), ("NOTIFY", "xChanged")]);
    }

    #[test]
    fn test_default_keywords() {
        let keywords = Keywords::default();
        assert!(keywords.is_property_macro("Q_PROPERTY"));
        assert!(keywords.is_property_macro("PROPERTY"));
        assert!(!keywords.is_property_macro(""));
        assert!(keywords.is_class_keyword("class"));
        assert!(!keywords.is_class_keyword("struct"));
    }
}
