use super::{Diagnostic, ParseResult, Parser, decode};
use crate::record::{AddressRecord, Field};

/// Lines of preamble before the first record
pub const HEADER_LINES: usize = 2;

/// Lines per record: name, street, then "city state zip [county...]"
pub const BLOCK_LINES: usize = 3;

/// Minimum tokens on the tail line (city, state, zip)
const MIN_TAIL_TOKENS: usize = 3;

/// Parser for fixed-layout plain text exports
///
/// Record boundaries come purely from line arithmetic: blocks start at line
/// 2 and repeat every 3 lines. A trailing partial block is treated as end of
/// input. Faults are block-granular.
pub struct TxtParser;

impl TxtParser {
    /// Build a record from one block, or `None` when the tail line is short
    fn parse_block(name: &str, street: &str, tail: &str) -> Option<AddressRecord> {
        let tokens: Vec<&str> = tail.split_whitespace().collect();
        if tokens.len() < MIN_TAIL_TOKENS {
            return None;
        }

        // County is present-but-empty when no trailing tokens follow the zip
        let county = tokens[MIN_TAIL_TOKENS..].join(" ");

        Some(
            AddressRecord::new()
                .with(Field::Name, name.trim())
                .with(Field::Street, street.trim())
                .with(Field::City, tokens[0])
                .with(Field::State, tokens[1])
                .with(Field::Zip, tokens[2])
                .with(Field::County, county),
        )
    }
}

impl Parser for TxtParser {
    fn format(&self) -> &'static str {
        "TXT"
    }

    fn parse(&self, path: &str, bytes: &[u8]) -> ParseResult {
        let text = match decode(self.format(), path, bytes) {
            Ok(text) => text,
            Err(failed) => return failed,
        };

        let lines: Vec<&str> = text.lines().collect();
        let mut result = ParseResult::new();

        let blocks = lines
            .get(HEADER_LINES..)
            .unwrap_or_default()
            .chunks_exact(BLOCK_LINES);
        if !blocks.remainder().is_empty() {
            tracing::debug!(
                path,
                leftover = blocks.remainder().len(),
                "ignoring partial block at end of TXT file"
            );
        }

        for (index, block) in blocks.enumerate() {
            let (name, street, tail) = (block[0], block[1], block[2]);

            if !tail.chars().any(|c| c.is_ascii_digit()) {
                tracing::debug!(path, block = index, tail, "tail line has no digits");
            }

            match Self::parse_block(name, street, tail) {
                Some(record) => result.push_record(record),
                None => {
                    tracing::debug!(path, block = index, "skipping TXT block with short tail");
                    result.push_diagnostic(Diagnostic::InsufficientFields {
                        format: self.format(),
                        path: path.to_string(),
                    });
                }
            }
        }

        tracing::debug!(path, records = result.records.len(), "parsed TXT file");
        result
    }
}
