//! Recursive parser for C++ type names such as `QMap<QString, QList<int*>>*`.
//!
//! ```text
//! TypeList := TypeName (',' TypeName)*
//! TypeName := Identifier TypeTail*
//! TypeTail := ' ' | '\t' | '*' | '&'
//!           | '::' Identifier
//!           | '<' TypeList '>'
//! ```

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::word::identifier;

/// Template nesting deeper than this is rejected.
pub const MAX_TEMPLATE_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    Ident(String),
    Pointer(Box<TypeNode>),
    Reference(Box<TypeNode>),
    /// `scope::name`
    Qualified { scope: Box<TypeNode>, name: String },
    /// `base<args...>`
    Template { base: Box<TypeNode>, args: Vec<TypeNode> },
    /// Comma separated names outside of a template argument list.
    List(Vec<TypeNode>),
}

impl fmt::Display for TypeNode {
    /// Normalized spelling: no spaces except `", "` between arguments.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Ident(name) => f.write_str(name),
            TypeNode::Pointer(inner) => write!(f, "{inner}*"),
            TypeNode::Reference(inner) => write!(f, "{inner}&"),
            TypeNode::Qualified { scope, name } => write!(f, "{scope}::{name}"),
            TypeNode::Template { base, args } => {
                write!(f, "{base}<")?;
                write_list(f, args)?;
                f.write_str(">")
            }
            TypeNode::List(items) => write_list(f, items),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeNode]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// A type name matched in some source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedType<'a> {
    /// The exact source slice, without trailing whitespace.
    pub text: &'a str,
    pub start: usize,
    /// Offset just past the last significant character.
    pub end: usize,
    pub node: TypeNode,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeNameError {
    #[error("offset {0} is not a position in the text")]
    OffsetOutOfRange(usize),
    #[error("expected an identifier at offset {0}")]
    ExpectedIdentifier(usize),
    #[error("single ':' at offset {0}, qualified names need '::'")]
    SingleColon(usize),
    #[error("template argument list opened at offset {0} is not closed")]
    UnclosedTemplate(usize),
    #[error("template arguments nested too deeply at offset {0}")]
    TooDeep(usize),
}

/// Parses the type name starting exactly at `offset`.
pub fn try_parse_type_name(source: &str, offset: usize) -> Result<ParsedType<'_>, TypeNameError> {
    let input = source
        .get(offset..)
        .ok_or(TypeNameError::OffsetOutOfRange(offset))?;

    let parser = TypeParser { source };
    let (rest, node) = parser.list(input, 0)?;
    let end = parser.offset(rest);

    Ok(ParsedType {
        text: &source[offset..end],
        start: offset,
        end,
        node,
    })
}

/// Like [`try_parse_type_name`] but fails closed.
pub fn parse_type_name(source: &str, offset: usize) -> Option<ParsedType<'_>> {
    match try_parse_type_name(source, offset) {
        Ok(parsed) => Some(parsed),
        Err(error) => {
            debug!(%error, offset, "no type name");
            None
        }
    }
}

struct TypeParser<'a> {
    source: &'a str,
}

impl<'a> TypeParser<'a> {
    fn offset(&self, rest: &str) -> usize {
        self.source.len() - rest.len()
    }

    fn list(&self, input: &'a str, depth: usize) -> Result<(&'a str, TypeNode), TypeNameError> {
        let (mut rest, first) = self.single(input, depth)?;
        let mut items = vec![first];

        while let Some(after) = skip_spaces(rest).strip_prefix(',') {
            let (next, item) = self.single(skip_spaces(after), depth)?;
            items.push(item);
            rest = next;
        }

        let node = if items.len() == 1 {
            items.swap_remove(0)
        } else {
            TypeNode::List(items)
        };
        Ok((rest, node))
    }

    /// One `TypeName`. The returned rest starts after the last significant
    /// character, so trailing spaces are left unconsumed.
    fn single(&self, input: &'a str, depth: usize) -> Result<(&'a str, TypeNode), TypeNameError> {
        let (mut rest, name) = identifier(input)
            .map_err(|_| TypeNameError::ExpectedIdentifier(self.offset(input)))?;

        let mut node = TypeNode::Ident(name.to_string());
        let mut end = rest;

        while let Some(c) = rest.chars().next() {
            match c {
                ' ' | '\t' => {
                    rest = &rest[1..];
                    continue;
                }
                '*' => {
                    node = TypeNode::Pointer(Box::new(node));
                    rest = &rest[1..];
                }
                '&' => {
                    node = TypeNode::Reference(Box::new(node));
                    rest = &rest[1..];
                }
                ':' => {
                    let after = rest
                        .strip_prefix("::")
                        .ok_or(TypeNameError::SingleColon(self.offset(rest)))?;
                    let (next, name) = identifier(after)
                        .map_err(|_| TypeNameError::ExpectedIdentifier(self.offset(after)))?;
                    node = TypeNode::Qualified {
                        scope: Box::new(node),
                        name: name.to_string(),
                    };
                    rest = next;
                }
                '<' => {
                    let open = self.offset(rest);
                    if depth >= MAX_TEMPLATE_DEPTH {
                        return Err(TypeNameError::TooDeep(open));
                    }

                    let (inner, args) = self.list(skip_spaces(&rest[1..]), depth + 1)?;
                    let after = skip_spaces(inner)
                        .strip_prefix('>')
                        .ok_or(TypeNameError::UnclosedTemplate(open))?;

                    let args = match args {
                        TypeNode::List(items) => items,
                        single => vec![single],
                    };
                    node = TypeNode::Template {
                        base: Box::new(node),
                        args,
                    };
                    rest = after;
                }
                _ => break,
            }
            end = rest;
        }

        Ok((end, node))
    }
}

fn skip_spaces(input: &str) -> &str {
    input.trim_start_matches([' ', '\t'])
}
