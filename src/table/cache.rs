//! Session-lifetime memoization of parsed mortality tables
//!
//! Entries are written once per country and never replaced or evicted.
//! The set of countries is small and bounded by the dataset, so the cache
//! has no size limit. Inserts are insert-if-absent: when two callers race
//! to populate the same country, the first insert wins and both observe
//! the same table afterwards.

use log::debug;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use super::MortalityTable;

/// Parsed tables keyed by country code
#[derive(Debug, Default)]
pub struct TableCache {
    entries: RwLock<HashMap<String, Arc<MortalityTable>>>,

    /// Statistics
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached table for a country, if one has been inserted
    pub fn get(&self, country: &str) -> Option<Arc<MortalityTable>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let found = entries.get(country).cloned();

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("table cache hit for {}", country);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!("table cache miss for {}", country);
        }
        found
    }

    /// Insert a table unless the country already has one
    ///
    /// Returns the table now held for the country, which is the existing
    /// entry when one was already present.
    pub fn put(&self, country: &str, table: MortalityTable) -> Arc<MortalityTable> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match entries.get(country) {
            Some(existing) => {
                debug!("table for {} already cached, keeping first entry", country);
                Arc::clone(existing)
            }
            None => {
                let table = Arc::new(table);
                entries.insert(country.to_string(), Arc::clone(&table));
                table
            }
        }
    }

    /// Cached table, or build one with `load` and insert it
    ///
    /// `load` only runs on a miss. Failures leave the cache untouched.
    pub fn get_or_load<E, F>(&self, country: &str, load: F) -> Result<Arc<MortalityTable>, E>
    where
        F: FnOnce() -> Result<MortalityTable, E>,
    {
        if let Some(table) = self.get(country) {
            return Ok(table);
        }

        let table = load()?;
        Ok(self.put(country, table))
    }

    pub fn contains(&self, country: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(country)
    }

    /// Get number of cached entries
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed);
        let total = hits + self.misses.load(Ordering::Relaxed);
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> MortalityTable {
        MortalityTable::parse(text).unwrap()
    }

    #[test]
    fn test_get_missing() {
        let cache = TableCache::new();
        assert!(cache.get("nowhere").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_first_writer_wins() {
        let cache = TableCache::new();

        let first = cache.put("se", table("0.5 0.5"));
        let second = cache.put("se", table("1.0"));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.get("se").unwrap().rows(), &[vec![0.5, 0.5]]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_or_load_runs_once() {
        let cache = TableCache::new();
        let mut fetches = 0;

        for _ in 0..3 {
            let result = cache.get_or_load("de", || {
                fetches += 1;
                MortalityTable::parse("0.2 0.8")
            });
            assert!(result.is_ok());
        }

        assert_eq!(fetches, 1);
        assert!(cache.contains("de"));
        assert!((cache.hit_rate() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_failure_leaves_cache_untouched() {
        let cache = TableCache::new();
        let result = cache.get_or_load("fr", || MortalityTable::parse("not a number"));

        assert!(result.is_err());
        assert!(!cache.contains("fr"));
    }

    #[test]
    fn test_concurrent_inserts_agree() {
        let cache = Arc::new(TableCache::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let text = format!("{} {}", i as f64 / 10.0, 1.0 - i as f64 / 10.0);
                    cache.put("jp", MortalityTable::parse(&text).unwrap())
                })
            })
            .collect();

        let winners: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let stored = cache.get("jp").unwrap();
        assert!(winners.iter().all(|w| Arc::ptr_eq(w, &stored)));
    }
}
