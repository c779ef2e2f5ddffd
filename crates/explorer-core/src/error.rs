/// Errors raised while building a [`Catalog`](crate::Catalog).
///
/// These only describe malformed seed data.  Once a catalog exists, every
/// operation on it is total.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A section was declared with an empty (or whitespace-only) title.
    #[error("section title must not be empty")]
    EmptyTitle,

    /// An entry in `section` has an empty (or whitespace-only) name.
    #[error("entry name must not be empty (section {section:?})")]
    EmptyName {
        /// Title of the section holding the nameless entry.
        section: String,
    },

    /// Two sections share a title.
    #[error("duplicate section title {title:?}")]
    DuplicateTitle {
        /// The repeated title.
        title: String,
    },

    /// Two entries share a name somewhere in the catalog.
    #[error("duplicate entry name {name:?} (first in {first:?}, again in {second:?})")]
    DuplicateName {
        /// The repeated entry name.
        name: String,
        /// Section holding the first occurrence.
        first: String,
        /// Section holding the second occurrence.
        second: String,
    },
}
