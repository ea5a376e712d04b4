use super::{Diagnostic, Parser, TsvParser, TxtParser, XmlParser};
use std::collections::HashMap;
use std::path::Path;

/// Dynamic dispatch table for address file formats
pub struct ParserRegistry {
    /// Extension (with leading dot) -> Parser mapping
    map: HashMap<String, Box<dyn Parser>>,
}

impl ParserRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Registry with the three built-in formats: `.xml`, `.tsv`, `.txt`
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(".xml", XmlParser);
        registry.register(".tsv", TsvParser);
        registry.register(".txt", TxtParser);
        registry
    }

    /// Register a parser for a specific file extension
    ///
    /// # Arguments
    /// * `extension` - File extension including the dot (e.g., ".xml")
    /// * `parser` - Parser implementation
    pub fn register(&mut self, extension: impl Into<String>, parser: impl Parser + 'static) {
        self.map.insert(extension.into(), Box::new(parser));
    }

    /// Extension of the final path segment, with its leading dot
    ///
    /// Empty when the file name has no dot, or only a leading one
    /// (`.profile`). Matching is case-sensitive, so no normalization is done.
    pub fn extension_of(path: &str) -> String {
        Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default()
    }

    /// Select the parser for a given file path, if its extension is registered
    pub fn select(&self, path: &str) -> Option<&dyn Parser> {
        self.map
            .get(&Self::extension_of(path))
            .map(|p| &**p)
    }

    /// Select a parser or describe why none applies
    pub fn resolve(&self, path: &str) -> Result<&dyn Parser, Diagnostic> {
        self.select(path).ok_or_else(|| Diagnostic::UnsupportedFormat {
            extension: Self::extension_of(path),
            path: path.to_string(),
        })
    }

    /// Get the number of registered parsers
    pub fn parser_count(&self) -> usize {
        self.map.len()
    }

    /// List all registered extensions
    pub fn registered_extensions(&self) -> Vec<&str> {
        self.map.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
