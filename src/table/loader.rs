//! File-backed table source
//!
//! Loads raw table text from data/<country>.csv

use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LoadError;

/// Default path to the data directory
pub const DEFAULT_DATA_PATH: &str = "data";

/// Supplier of raw table text for a country
///
/// Implement this to feed tables from somewhere other than the local
/// filesystem (an HTTP client, embedded assets).
pub trait TableSource {
    fn fetch(&self, country: &str) -> Result<String, LoadError>;
}

/// Reads `<root>/<country>.csv`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the table file for a country
    pub fn table_path(&self, country: &str) -> PathBuf {
        self.root.join(format!("{}.csv", country))
    }
}

impl Default for DirectorySource {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH)
    }
}

impl TableSource for DirectorySource {
    fn fetch(&self, country: &str) -> Result<String, LoadError> {
        let path = self.table_path(country);
        let text = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        info!("read mortality table for {} from {}", country, path.display());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> DirectorySource {
        DirectorySource::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/data"))
    }

    #[test]
    fn test_fetch_fixture() {
        let text = fixtures().fetch("testland").expect("Failed to read fixture");
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = fixtures().fetch("atlantis").unwrap_err();
        match err {
            LoadError::Io { path, .. } => assert!(path.ends_with("atlantis.csv")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_default_root() {
        let source = DirectorySource::default();
        assert_eq!(source.table_path("world"), Path::new("data/world.csv"));
    }
}
