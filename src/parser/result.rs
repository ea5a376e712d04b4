use crate::record::AddressRecord;
use thiserror::Error;

/// Result of parsing one input file
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Records the parser judged structurally complete
    pub records: Vec<AddressRecord>,
    /// Problems encountered, in the order they were found
    pub diagnostics: Vec<Diagnostic>,
}

/// A human-readable problem report for the error stream
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The whole file was dropped
    #[error("Error parsing {format} file {path}: {detail}")]
    FileFailed {
        format: &'static str,
        path: String,
        detail: String,
    },

    /// A single line or block was skipped
    #[error("Error: Insufficient fields in {format} file {path}")]
    InsufficientFields { format: &'static str, path: String },

    /// No parser is registered for the extension
    #[error("Error: Unsupported file format {extension} for file {path}")]
    UnsupportedFormat { extension: String, path: String },
}

impl ParseResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// A file-level fault: no records, one diagnostic
    pub fn failed(format: &'static str, path: &str, detail: impl ToString) -> Self {
        Self {
            records: Vec::new(),
            diagnostics: vec![Diagnostic::FileFailed {
                format,
                path: path.to_string(),
                detail: detail.to_string(),
            }],
        }
    }

    /// Nothing parsed, only the given diagnostic
    pub fn from_diagnostic(diagnostic: Diagnostic) -> Self {
        Self {
            records: Vec::new(),
            diagnostics: vec![diagnostic],
        }
    }

    pub fn push_record(&mut self, record: AddressRecord) {
        self.records.push(record);
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
