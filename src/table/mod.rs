//! Mortality table parsing, caching and loading

mod parser;
mod cache;
mod catalog;
pub mod loader;

pub use parser::MortalityTable;
pub use cache::TableCache;
pub use catalog::{
    CountryCatalog, CountryEntry, CATALOG_FILE, DEFAULT_COUNTRY, DEFAULT_COUNTRY_LABEL,
};
pub use loader::{DirectorySource, TableSource, DEFAULT_DATA_PATH};

use crate::error::MalformedTableError;

/// Parse raw text for a country and insert it into the cache
///
/// Returns the table held by the cache for that country, which is the
/// earlier entry if the country was already loaded.
pub fn load_table(
    cache: &TableCache,
    country: &str,
    raw_text: &str,
) -> Result<std::sync::Arc<MortalityTable>, MalformedTableError> {
    let table = MortalityTable::parse(raw_text)?;
    Ok(cache.put(country, table))
}
