//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::GlossaryTerm;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Query against the glossary search index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Wildcard query: `*` matches any run, `?` a single character
    pub query: String,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
    /// Search index category
    pub index: String,
}

/// Source of flat glossary term records (the search service seam).
pub trait TermSource: Send + Sync {
    /// Return one page of records matching the request.
    fn search(&self, request: &SearchRequest) -> io::Result<Vec<GlossaryTerm>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// Term source backed by an exported JSON file.
///
/// Accepts either a plain array of term records or a search response
/// (`{"hits": {"hits": [{"_source": {...}}]}}`).
pub struct JsonFileTermSource {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonFileTermSource {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    fn load(&self) -> io::Result<Vec<GlossaryTerm>> {
        let content = self.fs.read_to_string(&self.path)?;
        parse_terms(&content)
    }
}

impl TermSource for JsonFileTermSource {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn search(&self, request: &SearchRequest) -> io::Result<Vec<GlossaryTerm>> {
        let matcher = wildcard_regex(&request.query)?;
        let terms = self.load()?;
        let total = terms.len();

        let page = request.page.max(1);
        let Some(offset) = (page - 1).checked_mul(request.page_size) else {
            debug!("search: page {} out of range", page);
            return Ok(Vec::new());
        };
        let matching: Vec<GlossaryTerm> = terms
            .into_iter()
            .filter(|term| {
                matcher.is_match(&term.name)
                    || matcher.is_match(&term.fully_qualified_name)
                    || term
                        .display_name
                        .as_deref()
                        .is_some_and(|d| matcher.is_match(d))
            })
            .skip(offset)
            .take(request.page_size)
            .collect();

        debug!(
            "search: index={} query={} -> {} of {} records",
            request.index,
            request.query,
            matching.len(),
            total
        );
        Ok(matching)
    }
}

/// Parse term records from JSON: a plain array or a search response.
pub fn parse_terms(content: &str) -> io::Result<Vec<GlossaryTerm>> {
    let value: Value = serde_json::from_str(content)?;
    let records = match value {
        Value::Array(_) => value,
        Value::Object(ref map) if map.contains_key("hits") => {
            let hits = value
                .pointer("/hits/hits")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            Value::Array(
                hits.into_iter()
                    .filter_map(|mut hit| hit.get_mut("_source").map(Value::take))
                    .collect(),
            )
        }
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "expected an array of glossary terms or a search response",
            ))
        }
    };
    Ok(serde_json::from_value(records)?)
}

/// Case-insensitive, anchored regex for a `*`/`?` wildcard query.
fn wildcard_regex(query: &str) -> io::Result<Regex> {
    let mut pattern = String::from("(?is)^");
    for ch in query.chars() {
        match ch {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            _ => pattern.push_str(&regex::escape(&ch.to_string())),
        }
    }
    pattern.push('$');
    Regex::new(&pattern).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_wildcard_when_matching_then_case_insensitive_and_anchored() {
        let re = wildcard_regex("rev*").unwrap();
        assert!(re.is_match("Revenue"));
        assert!(!re.is_match("NetRevenue"));

        let re = wildcard_regex("c?st").unwrap();
        assert!(re.is_match("Cost"));
        assert!(!wildcard_regex("a.b").unwrap().is_match("axb"));
    }

    #[test]
    fn given_search_response_when_parsing_then_reads_sources() {
        let json = r#"{"hits": {"total": 1, "hits": [
            {"_index": "glossary_search_index", "_source": {"id": "1", "name": "A", "fullyQualifiedName": "G.A"}}
        ]}}"#;
        let terms = parse_terms(json).unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].fully_qualified_name, "G.A");
    }

    #[test]
    fn given_scalar_json_when_parsing_then_invalid_data() {
        let err = parse_terms("42").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
