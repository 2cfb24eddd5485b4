//! Parsing of `Q_PROPERTY(Type name READ getter WRITE setter ...)` declarations.

use nom::{
    bytes::complete::take_while1,
    character::complete::multispace1,
    sequence::separated_pair,
    IResult,
};
use smartcomp_protocol::PropertyDescriptor;
use thiserror::Error;
use tracing::debug;

use crate::types::{try_parse_type_name, TypeNameError};
use crate::word::{identifier, is_word_char};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("declaration has no opening parenthesis")]
    MissingParenthesis,
    #[error("invalid property type: {0}")]
    Type(#[from] TypeNameError),
    #[error("expected a property name at offset {0}")]
    MissingName(usize),
}

/// Parses one property declaration, returning why it was rejected.
pub fn try_parse_property(declaration: &str) -> Result<PropertyDescriptor, PropertyError> {
    let open = declaration
        .find('(')
        .ok_or(PropertyError::MissingParenthesis)?;

    let type_start = skip_whitespace(declaration, open + 1);
    let parsed = try_parse_type_name(declaration, type_start)?;

    let name_start = skip_whitespace(declaration, parsed.end);
    let (rest, name) = identifier(&declaration[name_start..])
        .map_err(|_| PropertyError::MissingName(name_start))?;

    let mut property = PropertyDescriptor {
        type_name: parsed.text.to_string(),
        property_name: name.to_string(),
        ..Default::default()
    };

    for (key, value) in attributes(rest) {
        if let Some(slot) = property.attribute_mut(key) {
            // First occurrence wins
            if slot.is_empty() {
                *slot = value.to_string();
            }
        }
    }

    Ok(property)
}

/// Parses one property declaration; an unparsable one yields the default
/// (empty) descriptor.
pub fn parse_property(declaration: &str) -> PropertyDescriptor {
    try_parse_property(declaration).unwrap_or_else(|error| {
        debug!(%error, "property declaration rejected");
        PropertyDescriptor::default()
    })
}

/// The declaration text an editor hands to [`parse_property`] for a cursor
/// at `offset`: from the cursor to the end of its line, or on to the closing
/// parenthesis when the argument list spans several lines.
pub fn declaration_at(text: &str, offset: usize) -> &str {
    let Some(tail) = text.get(offset..) else {
        return "";
    };
    let line_end = tail.find('\n').unwrap_or(tail.len());

    if let Some(open) = tail[..line_end].find('(') {
        if let Some(close) = matching_paren(&tail[open..]) {
            if open + close >= line_end {
                return &tail[..=open + close];
            }
        }
    }

    tail[..line_end].trim_end_matches('\r')
}

/// Offset of the `)` closing the `(` that `input` starts with.
fn matching_paren(input: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn skip_whitespace(text: &str, from: usize) -> usize {
    let tail = &text[from..];
    from + (tail.len() - tail.trim_start().len())
}

/// `KEY value` pairs whose key is a known attribute keyword.
fn attributes(mut input: &str) -> Vec<(&str, &str)> {
    let mut found = Vec::new();

    while !input.is_empty() {
        if let Ok((rest, (key, value))) = attribute(input) {
            let is_keyword = |word: &str| PropertyDescriptor::ATTRIBUTES.iter().any(|k| *k == word);
            if is_keyword(key) && !is_keyword(value) {
                found.push((key, value));
                input = rest;
                continue;
            }
        }
        input = skip_token(input);
    }

    found
}

fn attribute(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(identifier, multispace1, identifier)(input)
}

/// Drops one whole word, or one other character, from the front of `input`.
fn skip_token(input: &str) -> &str {
    match take_while1::<_, _, nom::error::Error<&str>>(is_word_char)(input) {
        Ok((rest, _)) => rest,
        Err(_) => {
            let width = input.chars().next().map_or(0, char::len_utf8);
            &input[width..]
        }
    }
}
