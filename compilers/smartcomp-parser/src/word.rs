use std::ops::Range;

use nom::{
    bytes::complete::take_while,
    character::complete::satisfy,
    combinator::recognize,
    sequence::pair,
    IResult,
};

/// Characters that make up identifiers and macro names.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn is_word_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

/// Matches an identifier at the start of `input`.
pub fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(satisfy(is_word_start), take_while(is_word_char)))(input)
}

/// Byte range of the word touching the caret at `offset`.
///
/// The caret sits between two characters; the word is the run of word
/// characters that contains it or ends/starts at it. `None` when neither
/// neighbour is a word character or `offset` is not a valid caret position.
pub fn word_range(text: &str, offset: usize) -> Option<Range<usize>> {
    if !text.is_char_boundary(offset) {
        return None;
    }

    let start = text[..offset]
        .char_indices()
        .rev()
        .find(|(_, c)| !is_word_char(*c))
        .map_or(0, |(i, c)| i + c.len_utf8());

    let end = text[offset..]
        .char_indices()
        .find(|(_, c)| !is_word_char(*c))
        .map_or(text.len(), |(i, _)| offset + i);

    (start < end).then_some(start..end)
}

/// The word touching `offset`, or `""`.
pub fn extract_word(text: &str, offset: usize) -> &str {
    word_range(text, offset).map_or("", |range| &text[range])
}
