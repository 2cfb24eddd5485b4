use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[repr(u8)]
pub enum Category {
    #[default]
    Unclassified = 0,
    /// Cursor is on a property declaration macro (e.g. `Q_PROPERTY`).
    PropertyDeclaration = 1,
    /// Cursor is on the name following the `class` keyword.
    ClassNameDeclaration = 2,
}

/// What the classifier found under the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct CursorContext {
    pub category: Category,
    pub word: String,
}

impl CursorContext {
    pub fn new(category: Category, word: impl Into<String>) -> Self {
        Self {
            category,
            word: word.into(),
        }
    }

    pub fn unclassified() -> Self {
        Self::default()
    }
}

/// Fields of one property declaration macro.
///
/// Accessor fields are empty when the declaration does not name them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct PropertyDescriptor {
    pub type_name: String,
    pub property_name: String,
    pub reader: String,
    pub writer: String,
    pub backing_member: String,
    pub reset_method: String,
    pub change_notifier: String,
}

impl PropertyDescriptor {
    /// Attribute keywords in declaration order.
    pub const ATTRIBUTES: [&'static str; 5] = ["READ", "WRITE", "MEMBER", "RESET", "NOTIFY"];

    /// True for the default descriptor a failed parse produces.
    pub fn is_empty(&self) -> bool {
        self.type_name.is_empty() && self.property_name.is_empty()
    }

    /// The field that stores the value of `attribute`, if it is a known keyword.
    pub fn attribute_mut(&mut self, attribute: &str) -> Option<&mut String> {
        match attribute {
            "READ" => Some(&mut self.reader),
            "WRITE" => Some(&mut self.writer),
            "MEMBER" => Some(&mut self.backing_member),
            "RESET" => Some(&mut self.reset_method),
            "NOTIFY" => Some(&mut self.change_notifier),
            _ => None,
        }
    }

    /// `(keyword, value)` pairs for every attribute the declaration specified.
    pub fn accessors(&self) -> impl Iterator<Item = (&'static str, &str)> {
        let values = [
            self.reader.as_str(),
            self.writer.as_str(),
            self.backing_member.as_str(),
            self.reset_method.as_str(),
            self.change_notifier.as_str(),
        ];
        Self::ATTRIBUTES
            .into_iter()
            .zip(values)
            .filter(|(_, value)| !value.is_empty())
    }
}

/// Keywords the classifier matches against.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Keywords {
    /// Macro names that open a property declaration.
    pub property_macros: Vec<String>,
    pub class_keyword: String,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            property_macros: vec!["Q_PROPERTY".to_string(), "PROPERTY".to_string()],
            class_keyword: "class".to_string(),
        }
    }
}

impl Keywords {
    pub fn is_property_macro(&self, word: &str) -> bool {
        !word.is_empty() && self.property_macros.iter().any(|name| name == word)
    }

    pub fn is_class_keyword(&self, word: &str) -> bool {
        !word.is_empty() && self.class_keyword == word
    }
}
