use super::{Diagnostic, ParseResult, Parser, decode};
use crate::record::{AddressRecord, Field};

/// Minimum tab-separated fields for a line to yield a record
pub const MIN_FIELDS: usize = 5;

/// Field count at which the sixth column is read as the zip code
pub const FIELDS_WITH_ZIP: usize = 6;

/// Positional column roles, in file order
const COLUMNS: [Field; MIN_FIELDS] = [
    Field::Name,
    Field::Organization,
    Field::Street,
    Field::City,
    Field::State,
];

/// Parser for tab-separated exports, one record per line
///
/// Faults are line-granular: a short line is reported and skipped while the
/// rest of the file is still read.
pub struct TsvParser;

impl TsvParser {
    fn parse_line(line: &str) -> Option<AddressRecord> {
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < MIN_FIELDS {
            return None;
        }

        let mut record = COLUMNS
            .iter()
            .zip(&parts)
            .fold(AddressRecord::new(), |record, (field, value)| {
                record.with(*field, *value)
            });

        if parts.len() == FIELDS_WITH_ZIP {
            record.set(Field::Zip, parts[5]);
        }

        Some(record)
    }
}

impl Parser for TsvParser {
    fn format(&self) -> &'static str {
        "TSV"
    }

    fn parse(&self, path: &str, bytes: &[u8]) -> ParseResult {
        let text = match decode(self.format(), path, bytes) {
            Ok(text) => text,
            Err(failed) => return failed,
        };

        let mut result = ParseResult::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match Self::parse_line(line) {
                Some(record) => result.push_record(record),
                None => {
                    tracing::debug!(path, line = index + 1, "skipping short TSV line");
                    result.push_diagnostic(Diagnostic::InsufficientFields {
                        format: self.format(),
                        path: path.to_string(),
                    });
                }
            }
        }

        tracing::debug!(path, records = result.records.len(), "parsed TSV file");
        result
    }
}
