mod error;

#[cfg(test)]
mod tests;

pub use error::IngestError;

use crate::parser::{Diagnostic, ParseResult, Parser, ParserRegistry};
use crate::record::AddressRecord;
use std::fs::File;
use std::io::Read;

/// Default per-file size limit (50 MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Limits applied while reading input files
#[derive(Debug, Clone)]
pub struct IngestConfig {
    max_file_size: u64,
}

impl IngestConfig {
    /// Create a config with default limits
    pub fn new() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Set maximum individual file size
    pub fn max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Combined, sorted output of a run over several files
#[derive(Debug, Default)]
pub struct Aggregate {
    /// All records, stable-sorted by zip
    pub records: Vec<AddressRecord>,
    /// Diagnostics from every file, in input order
    pub diagnostics: Vec<Diagnostic>,
}

impl Aggregate {
    /// True when no file contributed a record
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reads files, routes them to their format parser and merges the results
pub struct Ingestor {
    registry: ParserRegistry,
    config: IngestConfig,
}

impl Ingestor {
    pub fn new(registry: ParserRegistry, config: IngestConfig) -> Self {
        Self { registry, config }
    }

    /// Process a single file
    ///
    /// Never fails: an unsupported extension or an unreadable file comes
    /// back as an empty result carrying one diagnostic.
    pub fn ingest_file(&self, path: &str) -> ParseResult {
        let parser = match self.registry.resolve(path) {
            Ok(parser) => parser,
            Err(diagnostic) => {
                tracing::info!(path, "skipping file with unsupported extension");
                return ParseResult::from_diagnostic(diagnostic);
            }
        };

        match self.read(path) {
            Ok(bytes) => parser.parse(path, &bytes),
            Err(e) => {
                tracing::info!(path, error = %e, "could not read input file");
                ParseResult::failed(parser.format(), path, e)
            }
        }
    }

    /// Process files in order, then stable-sort everything by zip
    ///
    /// Records without a zip sort as the empty string, ahead of the rest.
    pub fn ingest_all<I, S>(&self, paths: I) -> Aggregate
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut aggregate = Aggregate::default();

        for path in paths {
            let path = path.as_ref();
            let result = self.ingest_file(path);
            tracing::debug!(
                path,
                records = result.records.len(),
                diagnostics = result.diagnostics.len(),
                "ingested file"
            );
            aggregate.records.extend(result.records);
            aggregate.diagnostics.extend(result.diagnostics);
        }

        sort_by_zip(&mut aggregate.records);
        aggregate
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, IngestError> {
        let mut file = File::open(path)?;

        let size = file.metadata()?.len();
        if size > self.config.max_file_size {
            return Err(IngestError::FileTooLarge {
                size,
                max: self.config.max_file_size,
            });
        }

        let mut contents = Vec::with_capacity(size as usize);
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new(ParserRegistry::standard(), IngestConfig::default())
    }
}

/// Stable sort on the zip string, missing zips first
pub fn sort_by_zip(records: &mut [AddressRecord]) {
    records.sort_by(|a, b| a.zip_key().cmp(b.zip_key()));
}
