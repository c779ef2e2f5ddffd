//! Catalog data model and search filter for **widget-explorer**.
//!
//! `explorer-core` owns the immutable widget catalog and the pure filter that
//! narrows it by a search query.  It knows nothing about terminals or
//! rendering: a presentation layer asks for the catalog, owns the query
//! string, and re-runs [`filter`] whenever the query changes.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`CatalogStore`] | Shared, read-only handle to the catalog with name lookup |
//! | [`Catalog`] | Ordered sections of ordered entries, validated at build time |
//! | [`CatalogBuilder`] | Assembles and validates a [`Catalog`] |
//! | [`Entry`] / [`Section`] | One widget kind / a titled group of entries |
//! | [`Query`] | A trimmed, case-folded search string |
//! | [`FilteredCatalog`] | The derived view produced by [`filter`] |
//! | [`FilterCache`] | Optional memo of the last `(query, result)` pair |
//!
//! # Example
//!
//! ```
//! use explorer_core::{filter, CatalogStore};
//!
//! let store = CatalogStore::seeded()?;
//! let view = filter(store.catalog(), "tog");
//!
//! let controls = view.section("Controls").unwrap();
//! let names: Vec<_> = controls.entries().iter().map(|e| e.name()).collect();
//! assert_eq!(names, ["Toggle"]);
//!
//! assert!(store.lookup("Nonexistent").is_none());
//! # Ok::<(), explorer_core::CatalogError>(())
//! ```

pub mod catalog;
pub mod error;
pub mod filter;
pub mod id;
pub mod seed;
pub mod store;

pub use catalog::{Catalog, CatalogBuilder, Entry, Section};
pub use error::CatalogError;
pub use filter::{filter, FilterCache, FilteredCatalog, Query};
pub use id::{EntryId, SectionId};
pub use store::CatalogStore;
