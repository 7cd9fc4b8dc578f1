//! Country catalog: country codes and their display names
//!
//! Read from a JSON array of `{ "value": code, "label": name }` objects.
//! Codes are only used as cache keys and file names; they are not validated
//! against the set of available tables.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::LoadError;

/// Catalog file name inside the data directory
pub const CATALOG_FILE: &str = "countries.json";

/// Country shown when nothing else is selected or the catalog is unavailable
pub const DEFAULT_COUNTRY: &str = "world";

/// Display name of the default country
pub const DEFAULT_COUNTRY_LABEL: &str = "the world";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    /// Country code
    pub value: String,
    /// Display name
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCatalog {
    entries: Vec<CountryEntry>,
}

impl CountryCatalog {
    pub fn new(entries: Vec<CountryEntry>) -> Self {
        Self { entries }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| LoadError::Catalog {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.value == code)
            .map(|e| e.label.as_str())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|e| e.value == code)
    }

    pub fn entries(&self) -> &[CountryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
