use csv::{ReaderBuilder, StringRecord};

use super::delimiter::Delimiter;
use super::error::ImportError;

/// One data row with the source line it started on.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRow {
    pub line: u64,
    pub cells: Vec<String>,
}

impl RawRow {
    /// All cells empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

/// A header record and the data rows below it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Pairs each header with the row's cell; short rows yield `None`.
    pub fn entries<'a>(
        &'a self,
        row: &'a RawRow,
    ) -> impl Iterator<Item = (&'a str, Option<&'a str>)> + 'a {
        self.headers
            .iter()
            .enumerate()
            .map(move |(i, h)| (h.as_str(), row.cells.get(i).map(String::as_str)))
    }
}

/// Maps byte offsets to 1-based line numbers, scanning forward only.
struct LineCounter<'a> {
    text: &'a [u8],
    offset: usize,
    line: u64,
}

impl<'a> LineCounter<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text: text.as_bytes(),
            offset: 0,
            line: 1,
        }
    }

    /// Line of the first non-terminator byte at or after `byte`.
    /// Record positions point just past the previous record, so skipped
    /// empty lines sit between the position and the record itself.
    fn line_at(&mut self, byte: usize) -> u64 {
        let mut start = byte.min(self.text.len());
        while start < self.text.len() && matches!(self.text[start], b'\r' | b'\n') {
            start += 1;
        }
        if start < self.offset {
            return self.line;
        }
        self.line += self.text[self.offset..start]
            .iter()
            .filter(|&&b| b == b'\n')
            .count() as u64;
        self.offset = start;
        self.line
    }
}

pub struct CsvParser;

impl CsvParser {
    /// Reads `text` into a header record and data rows.
    /// Ragged rows are accepted and blank rows are dropped.
    pub fn parse_table(text: &str, delimiter: Delimiter) -> Result<RawTable, ImportError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter.as_byte())
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        let mut lines = LineCounter::new(text);
        let mut record = StringRecord::new();
        let mut index = 0u64;
        while reader.read_record(&mut record)? {
            // Header is line 1, so the first data row falls back to line 2.
            let line = record
                .position()
                .map(|p| lines.line_at(p.byte() as usize))
                .unwrap_or(index + 2);
            index += 1;

            let row = RawRow {
                line,
                cells: record.iter().map(str::to_string).collect(),
            };
            if !row.is_blank() {
                rows.push(row);
            }
        }

        Ok(RawTable { headers, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let table = CsvParser::parse_table("a;b;c\n1;2;3", Delimiter::Semicolon).unwrap();
        assert_eq!(table.headers, vec!["a", "b", "c"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].cells, vec!["1", "2", "3"]);
        assert_eq!(table.rows[0].line, 2);
    }

    #[test]
    fn test_parse_quotes() {
        let table =
            CsvParser::parse_table("a,b\n\"x,y\",\"Ctrl;C\"", Delimiter::Comma).unwrap();
        assert_eq!(table.rows[0].cells, vec!["x,y", "Ctrl;C"]);
    }

    #[test]
    fn test_blank_rows_skipped_and_lines_kept() {
        let text = "a;b\n1;2\n;\n\n3;4\n";
        let table = CsvParser::parse_table(text, Delimiter::Semicolon).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].line, 2);
        assert_eq!(table.rows[1].line, 5);
    }

    #[test]
    fn test_ragged_rows() {
        let table = CsvParser::parse_table("a;b;c\n1", Delimiter::Semicolon).unwrap();
        let row = &table.rows[0];
        let entries: Vec<_> = table.entries(row).collect();
        assert_eq!(entries, vec![("a", Some("1")), ("b", None), ("c", None)]);
    }

    #[test]
    fn test_empty_input() {
        let table = CsvParser::parse_table("", Delimiter::Comma).unwrap();
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }
}
