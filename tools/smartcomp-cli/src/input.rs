use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, ensure, Context, Result};
use clap::Args;

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Source file to analyze (stdin when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl SourceArgs {
    pub fn read(&self) -> Result<String> {
        match &self.file {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
            None => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read stdin")?;
                Ok(text)
            }
        }
    }
}

#[derive(Args, Debug)]
pub struct CursorArgs {
    /// Cursor as a byte offset into the source
    #[arg(short, long, conflicts_with_all = ["line", "column"])]
    pub offset: Option<usize>,

    /// Cursor line, 1-based
    #[arg(short, long, requires = "column")]
    pub line: Option<usize>,

    /// Cursor column in characters, 1-based
    #[arg(short, long, requires = "line")]
    pub column: Option<usize>,
}

impl CursorArgs {
    /// Resolves the cursor to a byte offset that is a valid caret in `text`.
    pub fn resolve(&self, text: &str) -> Result<usize> {
        let offset = match (self.offset, self.line, self.column) {
            (Some(offset), _, _) => offset,
            (None, Some(line), Some(column)) => line_column_to_offset(text, line, column)?,
            _ => bail!("a cursor is required: pass --offset or --line and --column"),
        };

        ensure!(
            offset <= text.len(),
            "offset {offset} is past the end of the source ({} bytes)",
            text.len()
        );
        ensure!(
            text.is_char_boundary(offset),
            "offset {offset} falls inside a multi-byte character"
        );
        Ok(offset)
    }
}

/// Byte offset of a 1-based `line`/`column` position. The column may point
/// one past the last character of the line.
pub fn line_column_to_offset(text: &str, line: usize, column: usize) -> Result<usize> {
    ensure!(line >= 1 && column >= 1, "line and column are 1-based");

    let line_start = if line == 1 {
        0
    } else {
        text.match_indices('\n')
            .nth(line - 2)
            .map(|(index, _)| index + 1)
            .with_context(|| format!("line {line} is past the end of the source"))?
    };

    let line_text = text[line_start..].split('\n').next().unwrap_or("");
    let line_text = line_text.strip_suffix('\r').unwrap_or(line_text);

    let offset = line_text
        .char_indices()
        .map(|(index, _)| index)
        .chain(std::iter::once(line_text.len()))
        .nth(column - 1)
        .with_context(|| format!("column {column} is past the end of line {line}"))?;

    Ok(line_start + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "class Foo\r\n{\n    Q_PROPERTY(int λ)\n";

    #[test]
    fn test_line_column() {
        assert_eq!(line_column_to_offset(TEXT, 1, 1).unwrap(), 0);
        assert_eq!(line_column_to_offset(TEXT, 1, 10).unwrap(), 9);
        assert_eq!(line_column_to_offset(TEXT, 2, 1).unwrap(), 11);
        assert_eq!(line_column_to_offset(TEXT, 3, 5).unwrap(), 17);
        // Columns count characters, not bytes
        assert_eq!(line_column_to_offset(TEXT, 3, 21).unwrap(), TEXT.find(')').unwrap());
    }

    #[test]
    fn test_line_column_out_of_range() {
        assert!(line_column_to_offset(TEXT, 0, 1).is_err());
        assert!(line_column_to_offset(TEXT, 1, 11).is_err());
        assert!(line_column_to_offset(TEXT, 9, 1).is_err());
    }

    #[test]
    fn test_resolve_offset() {
        let cursor = CursorArgs {
            offset: Some(3),
            line: None,
            column: None,
        };
        assert_eq!(cursor.resolve("abcdef").unwrap(), 3);
        assert!(cursor.resolve("ab").is_err());

        let inside = CursorArgs {
            offset: Some(1),
            line: None,
            column: None,
        };
        assert!(inside.resolve("λ").is_err());

        let missing = CursorArgs {
            offset: None,
            line: None,
            column: None,
        };
        assert!(missing.resolve("abc").is_err());
    }
}
