//! Catalog cache keyed by source identity and sheet name.
//!
//! Loading is a pure function of the source contents, so a cached catalog is
//! reused for as long as the process lives. There is no expiry.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::StationCatalog;
use crate::error::LoadError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub source: String,
    pub sheet: String,
}

impl CacheKey {
    pub fn new(source: &str, sheet: &str) -> Self {
        Self {
            source: source.to_string(),
            sheet: sheet.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CatalogCache {
    entries: HashMap<CacheKey, Arc<StationCatalog>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<StationCatalog>> {
        self.entries.get(key).cloned()
    }

    /// Returns the cached catalog for `key`, running `load` on a miss.
    /// Failed loads are not cached.
    pub fn get_or_load<F>(&mut self, key: CacheKey, load: F) -> Result<Arc<StationCatalog>, LoadError>
    where
        F: FnOnce() -> Result<StationCatalog, LoadError>,
    {
        if let Some(hit) = self.entries.get(&key) {
            debug!(source = %key.source, sheet = %key.sheet, "Catalog cache hit");
            return Ok(Arc::clone(hit));
        }

        debug!(source = %key.source, sheet = %key.sheet, "Catalog cache miss");
        let catalog = Arc::new(load()?);
        self.entries.insert(key, Arc::clone(&catalog));
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
