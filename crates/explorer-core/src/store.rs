use crate::catalog::{Catalog, Entry};
use crate::error::CatalogError;
use crate::seed;
use std::sync::Arc;

/// Shared, read-only handle to a [`Catalog`].
///
/// Cloning is cheap: every clone points at the same catalog.  There is no
/// writer, so any number of threads may read concurrently without locking.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    catalog: Arc<Catalog>,
}

impl CatalogStore {
    /// Wrap an already validated catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Build the store from the built-in seed table.
    pub fn seeded() -> Result<Self, CatalogError> {
        seed::catalog().map(Self::new)
    }

    /// The full catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared pointer to the catalog, for callers that outlive `self`.
    pub fn shared(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Find an entry by exact name.
    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.catalog.lookup(name)
    }
}
