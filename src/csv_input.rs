//! CSV input parsing for the launch dataset
//!
//! Reads RFC 4180 style text: comma separated fields, optional double quotes,
//! `""` as an escaped quote inside a quoted field, and line breaks allowed
//! inside quoted fields. Both `\n` and `\r\n` line endings are accepted.

use crate::dataset::DatasetError;

/// A single parsed CSV row with the 1-based line number it started on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub line: usize,
    pub fields: Vec<String>,
}

impl CsvRow {
    /// Get a field by column index, trimmed of surrounding whitespace
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|f| f.trim())
    }

    /// True when the row is a blank line (a single empty field)
    fn is_blank(&self) -> bool {
        self.fields.len() == 1 && self.fields[0].trim().is_empty()
    }
}

/// Parse CSV text into rows, skipping blank lines
pub fn parse_rows(text: &str) -> Result<Vec<CsvRow>, DatasetError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    // Set once a quoted section of the current field has closed
    let mut quote_closed = false;
    let mut line = 1;
    let mut row_start = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => {
                    in_quotes = false;
                    quote_closed = true;
                }
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if !quote_closed && field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                quote_closed = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                push_row(&mut rows, row_start, std::mem::take(&mut fields));
                quote_closed = false;
                line += 1;
                row_start = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(DatasetError::UnterminatedQuote { line: row_start });
    }

    if !field.is_empty() || !fields.is_empty() || quote_closed {
        fields.push(field);
        push_row(&mut rows, row_start, fields);
    }

    Ok(rows)
}

fn push_row(rows: &mut Vec<CsvRow>, line: usize, fields: Vec<String>) {
    let row = CsvRow { line, fields };
    if !row.is_blank() {
        rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_rows() {
        let rows = parse_rows("a,b,c\n1,2,3\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fields, vec!["a", "b", "c"]);
        assert_eq!(rows[1].fields, vec!["1", "2", "3"]);
        assert_eq!(rows[1].line, 2);
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let rows = parse_rows("a,b\n1,2").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].fields, vec!["1", "2"]);
    }

    #[test]
    fn test_parse_crlf_line_endings() {
        let rows = parse_rows("a,b\r\n1,2\r\n").unwrap();
        assert_eq!(rows[0].fields, vec!["a", "b"]);
        assert_eq!(rows[1].fields, vec!["1", "2"]);
    }

    #[test]
    fn test_parse_quoted_field_with_comma() {
        let rows = parse_rows("site,mass\n\"CCAFS, LC-40\",500\n").unwrap();
        assert_eq!(rows[1].fields, vec!["CCAFS, LC-40", "500"]);
    }

    #[test]
    fn test_parse_escaped_quote() {
        let rows = parse_rows("name\n\"say \"\"hi\"\"\"\n").unwrap();
        assert_eq!(rows[1].fields, vec!["say \"hi\""]);
    }

    #[test]
    fn test_parse_newline_inside_quotes_keeps_line_numbers() {
        let rows = parse_rows("a,b\n\"x\ny\",1\nz,2\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].fields, vec!["x\ny", "1"]);
        assert_eq!(rows[1].line, 2);
        assert_eq!(rows[2].line, 4);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let rows = parse_rows("a\n\n1\n\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn test_parse_empty_fields() {
        let rows = parse_rows(",Flight Number\n0,1\n").unwrap();
        assert_eq!(rows[0].fields, vec!["", "Flight Number"]);
    }

    #[test]
    fn test_parse_strips_bom() {
        let rows = parse_rows("\u{feff}a,b\n").unwrap();
        assert_eq!(rows[0].fields, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_quote_after_closed_field_is_literal() {
        let rows = parse_rows("a\n\"\" \"x\"\n").unwrap();
        assert_eq!(rows[1].fields, vec![" \"x\""]);

        let rows = parse_rows("a,b\n\"KSC\"\"\",1\n").unwrap();
        assert_eq!(rows[1].fields, vec!["KSC\"", "1"]);
    }

    #[test]
    fn test_parse_unterminated_quote() {
        let err = parse_rows("a\n\"open\n").unwrap_err();
        assert!(matches!(err, DatasetError::UnterminatedQuote { line: 2 }));
    }

    #[test]
    fn test_field_trims_whitespace() {
        let row = CsvRow {
            line: 1,
            fields: vec!["  KSC LC-39A ".to_string()],
        };
        assert_eq!(row.field(0), Some("KSC LC-39A"));
        assert_eq!(row.field(1), None);
    }
}
