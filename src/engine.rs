//! Engine facade: shared table cache, table source and analysis settings
//!
//! Callers hold the query; the engine resolves the country's table through
//! the cache (fetching and parsing on a miss) and runs the analyzer on it.
//!
//! # Example
//! ```ignore
//! let engine = Engine::new(DirectorySource::new("data"), AnalysisConfig::default());
//! let evaluation = engine.evaluate(&Query::new("world", Sex::Female, 40))?;
//! println!("{}", format_age(evaluation.statistics.mean));
//! ```

use log::{info, warn};
use std::path::Path;
use std::sync::Arc;

use crate::analysis::{AnalysisConfig, DistributionAnalyzer, Evaluation, LifeTableRow};
use crate::error::{EngineError, LoadError, MalformedTableError};
use crate::query::{Query, Sex};
use crate::table::{
    self, CountryCatalog, CountryEntry, DirectorySource, MortalityTable, TableCache, TableSource,
    CATALOG_FILE, DEFAULT_COUNTRY, DEFAULT_COUNTRY_LABEL,
};

pub struct Engine<S = DirectorySource> {
    source: S,
    cache: TableCache,
    analyzer: DistributionAnalyzer,
}

impl Engine<DirectorySource> {
    /// Engine reading tables from a data directory
    pub fn from_directory(path: impl AsRef<Path>, config: AnalysisConfig) -> Self {
        Self::new(DirectorySource::new(path.as_ref()), config)
    }

    /// Catalog from the data directory's `countries.json`
    ///
    /// Falls back to a catalog holding only the default country when the
    /// file is missing or invalid.
    pub fn catalog(&self) -> CountryCatalog {
        let path = self.source.root().join(CATALOG_FILE);
        CountryCatalog::load(&path).unwrap_or_else(|err| {
            warn!("{}; falling back to {}", err, DEFAULT_COUNTRY);
            CountryCatalog::new(vec![CountryEntry {
                value: DEFAULT_COUNTRY.to_string(),
                label: DEFAULT_COUNTRY_LABEL.to_string(),
            }])
        })
    }
}

impl<S: TableSource> Engine<S> {
    pub fn new(source: S, config: AnalysisConfig) -> Self {
        Self {
            source,
            cache: TableCache::new(),
            analyzer: DistributionAnalyzer::new(config),
        }
    }

    pub fn cache(&self) -> &TableCache {
        &self.cache
    }

    pub fn analyzer(&self) -> &DistributionAnalyzer {
        &self.analyzer
    }

    /// Parse caller-supplied text for a country and cache it
    ///
    /// A country that is already cached keeps its first table.
    pub fn load_table(
        &self,
        country: &str,
        raw_text: &str,
    ) -> Result<Arc<MortalityTable>, MalformedTableError> {
        table::load_table(&self.cache, country, raw_text)
    }

    /// Cached table for a country, fetching it from the source on a miss
    pub fn ensure_loaded(&self, country: &str) -> Result<Arc<MortalityTable>, LoadError> {
        self.cache.get_or_load(country, || {
            let text = self.source.fetch(country)?;
            let table = MortalityTable::parse(&text).map_err(|source| LoadError::Malformed {
                country: country.to_string(),
                source,
            })?;
            info!(
                "loaded mortality table for {} ({} variants)",
                country,
                table.variant_count()
            );
            Ok(table)
        })
    }

    /// Evaluate a query against an already cached table
    pub fn evaluate_cached(&self, query: &Query) -> Result<Evaluation, EngineError> {
        let table = self
            .cache
            .get(&query.country)
            .ok_or_else(|| EngineError::NotLoaded {
                country: query.country.clone(),
            })?;
        Ok(self.analyzer.evaluate(&table, query.sex, query.age)?)
    }

    /// Evaluate a query, loading the country's table if needed
    pub fn evaluate(&self, query: &Query) -> Result<Evaluation, EngineError> {
        let table = self.ensure_loaded(&query.country)?;
        Ok(self.analyzer.evaluate(&table, query.sex, query.age)?)
    }

    /// Statistics at every supported age for a country and sex
    pub fn life_table(&self, country: &str, sex: Sex) -> Result<Vec<LifeTableRow>, EngineError> {
        let table = self.ensure_loaded(country)?;
        Ok(self.analyzer.life_table(&table, sex)?)
    }
}
