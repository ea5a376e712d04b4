mod registry;
mod result;
mod tsv;
mod txt;
mod xml;


pub use registry::ParserRegistry;
pub use result::{Diagnostic, ParseResult};
pub use tsv::TsvParser;
pub use txt::TxtParser;
pub use xml::XmlParser;

/// Core trait that all format parsers implement
pub trait Parser: Send + Sync {
    /// Short label used in diagnostics (e.g., "XML")
    fn format(&self) -> &'static str;

    /// Parse raw file contents into address records
    ///
    /// # Arguments
    /// * `path` - Path of the file as given on the command line
    /// * `bytes` - Full file contents
    ///
    /// # Returns
    /// Records judged complete by this format's rules, plus any diagnostics.
    /// Each format decides how much input a single fault discards.
    fn parse(&self, path: &str, bytes: &[u8]) -> ParseResult;
}

/// Decode file contents as UTF-8, reporting failure as a file-level fault
pub(crate) fn decode<'a>(
    format: &'static str,
    path: &str,
    bytes: &'a [u8],
) -> Result<&'a str, ParseResult> {
    std::str::from_utf8(bytes).map_err(|e| ParseResult::failed(format, path, e))
}
