// Public API exports
pub mod ingest;
pub mod output;
pub mod parser;
pub mod record;

// Re-export main types for convenience
pub use record::{AddressRecord, Field};

pub use parser::{
    Diagnostic, ParseResult, Parser, ParserRegistry, TsvParser, TxtParser, XmlParser,
};

pub use ingest::{
    Aggregate, DEFAULT_MAX_FILE_SIZE, IngestConfig, IngestError, Ingestor, sort_by_zip,
};
