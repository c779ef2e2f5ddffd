//! Entries, sections, and the validated catalog that holds them.

use crate::error::CatalogError;
use crate::filter::fold;
use crate::id::{EntryId, SectionId};
use std::collections::hash_map::Entry as MapEntry;
use std::collections::{HashMap, HashSet};

/// One widget kind in the catalog.
///
/// An entry is metadata only.  Its [`name`](Entry::name) doubles as the
/// dispatch key a renderer uses to pick an example view; the icon key and
/// reference URL are carried through untouched and never searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    name: String,
    description: String,
    icon_key: String,
    reference_url: String,
    // Case-folded shadows of `name` and `description` used for matching.
    folded_name: String,
    folded_description: String,
}

impl Entry {
    /// Create an entry with a fresh [`EntryId`].
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        icon_key: impl Into<String>,
        reference_url: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let description = description.into();
        Self {
            id: EntryId::next(),
            folded_name: fold(&name),
            folded_description: fold(&description),
            name,
            description,
            icon_key: icon_key.into(),
            reference_url: reference_url.into(),
        }
    }

    /// Process-local identity of this entry.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Display name, unique across the catalog.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text description; may be empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Symbolic icon reference, opaque to the catalog.
    pub fn icon_key(&self) -> &str {
        &self.icon_key
    }

    /// Reference documentation URL.  Not validated here.
    pub fn reference_url(&self) -> &str {
        &self.reference_url
    }

    /// Whether the folded name or folded description contains `needle`.
    ///
    /// `needle` must already be folded (see [`Query`](crate::Query)).
    pub(crate) fn matches_folded(&self, needle: &str) -> bool {
        self.folded_name.contains(needle) || self.folded_description.contains(needle)
    }
}

/// A titled, ordered group of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    id: SectionId,
    title: String,
    entries: Vec<Entry>,
}

impl Section {
    /// Process-local identity of this section.
    pub fn id(&self) -> SectionId {
        self.id
    }

    /// Section title, unique across the catalog.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries in this section.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the section has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A section with the same id and title but a different entry list.
    pub(crate) fn with_entries(&self, entries: Vec<Entry>) -> Section {
        Section {
            id: self.id,
            title: self.title.clone(),
            entries,
        }
    }
}

/// The full ordered collection of sections.
///
/// A catalog can only be obtained through [`CatalogBuilder::build`], which
/// guarantees that section titles and entry names are non-empty and unique.
/// It has no mutating methods.
#[derive(Debug, Clone)]
pub struct Catalog {
    sections: Vec<Section>,
    // entry name -> (section index, entry index)
    index: HashMap<String, (usize, usize)>,
}

impl Catalog {
    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// All sections in order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Find a section by its exact title.
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Find an entry by its exact name.
    ///
    /// Returns `None` for names that are not in the catalog; an unknown name
    /// is an expected outcome, not an error.
    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        let &(s, e) = self.index.get(name)?;
        self.sections.get(s)?.entries.get(e)
    }

    /// Every entry in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.sections.iter().flat_map(|s| s.entries.iter())
    }

    /// Total number of entries across all sections.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the catalog has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.sections == other.sections
    }
}

impl Eq for Catalog {}

/// Collects sections and validates them into a [`Catalog`].
///
/// # Example
///
/// ```
/// use explorer_core::{Catalog, Entry};
///
/// let catalog = Catalog::builder()
///     .section("Controls", [
///         Entry::new("Button", "A button control.", "rectangle", "https://example.com/button"),
///     ])
///     .build()?;
/// assert_eq!(catalog.len(), 1);
/// # Ok::<(), explorer_core::CatalogError>(())
/// ```
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    sections: Vec<(String, Vec<Entry>)>,
}

impl CatalogBuilder {
    /// Append a section with the given entries.
    pub fn section(
        mut self,
        title: impl Into<String>,
        entries: impl IntoIterator<Item = Entry>,
    ) -> Self {
        self.sections
            .push((title.into(), entries.into_iter().collect()));
        self
    }

    /// Validate the collected sections and produce a catalog.
    ///
    /// Fails on the first empty title, empty name, duplicate title, or
    /// duplicate entry name (compared across the whole catalog).  Empty
    /// sections are accepted.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut titles = HashSet::new();
        let mut index: HashMap<String, (usize, usize)> = HashMap::new();
        let mut sections = Vec::with_capacity(self.sections.len());

        for (s_idx, (title, entries)) in self.sections.into_iter().enumerate() {
            if title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle);
            }
            if !titles.insert(title.clone()) {
                return Err(CatalogError::DuplicateTitle { title });
            }

            for (e_idx, entry) in entries.iter().enumerate() {
                if entry.name.trim().is_empty() {
                    return Err(CatalogError::EmptyName { section: title });
                }
                match index.entry(entry.name.clone()) {
                    MapEntry::Occupied(existing) => {
                        let (first_idx, _) = *existing.get();
                        let first = if first_idx == s_idx {
                            title.clone()
                        } else {
                            sections
                                .get(first_idx)
                                .map(|s: &Section| s.title.clone())
                                .unwrap_or_default()
                        };
                        return Err(CatalogError::DuplicateName {
                            name: entry.name.clone(),
                            first,
                            second: title,
                        });
                    }
                    MapEntry::Vacant(slot) => {
                        slot.insert((s_idx, e_idx));
                    }
                }
            }

            sections.push(Section {
                id: SectionId::next(),
                title,
                entries,
            });
        }

        tracing::debug!(
            sections = sections.len(),
            entries = index.len(),
            "catalog built"
        );

        Ok(Catalog { sections, index })
    }
}
