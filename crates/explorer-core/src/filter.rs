//! Search filtering over a [`Catalog`].
//!
//! [`filter`] is a pure function: it never mutates the catalog and keeps no
//! state between calls.  Matching is a literal, case-insensitive substring
//! test against an entry's name OR description.  Icon keys and URLs are
//! never searched.
//!
//! Sections are kept in the result even when no entry in them matches.
//! Whether an empty section is drawn is the caller's decision; see
//! [`FilteredCatalog::non_empty_sections`].

use crate::catalog::{Catalog, Entry, Section};
use std::sync::Arc;

/// Case fold applied to both queries and entry fields.
///
/// Uses Unicode lower-casing from the standard library, which does not
/// depend on the process locale.
pub(crate) fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// A normalized search query: surrounding whitespace trimmed, case folded.
///
/// Characters such as `*`, `.` or `[` have no special meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query {
    folded: String,
}

impl Query {
    /// Normalize a raw query string.
    pub fn new(raw: &str) -> Self {
        Self {
            folded: fold(raw.trim()),
        }
    }

    /// The normalized text.
    pub fn as_str(&self) -> &str {
        &self.folded
    }

    /// Whether the query is empty after normalization.
    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    /// Whether `entry` matches.  The empty query matches everything.
    pub fn matches(&self, entry: &Entry) -> bool {
        self.is_empty() || entry.matches_folded(&self.folded)
    }
}

/// A derived view of a catalog narrowed by a [`Query`].
///
/// Always has one section per catalog section, in catalog order, with the
/// same ids and titles; entries keep their original relative order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredCatalog {
    query: Query,
    sections: Vec<Section>,
}

impl FilteredCatalog {
    /// Apply an already normalized query to `catalog`.
    pub fn new(catalog: &Catalog, query: Query) -> Self {
        let sections = if query.is_empty() {
            catalog.sections().to_vec()
        } else {
            catalog
                .sections()
                .iter()
                .map(|section| {
                    let entries = section
                        .entries()
                        .iter()
                        .filter(|entry| query.matches(entry))
                        .cloned()
                        .collect();
                    section.with_entries(entries)
                })
                .collect()
        };
        Self { query, sections }
    }

    /// The query this view was built from.
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// `true` only for the identity view produced by an empty query.
    ///
    /// A non-empty query that happens to match every entry still reports
    /// `false`.
    pub fn is_unfiltered(&self) -> bool {
        self.query.is_empty()
    }

    /// All sections, including ones left without entries.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Find a section by its exact title.
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title() == title)
    }

    /// Sections that still have at least one entry.
    pub fn non_empty_sections(&self) -> impl Iterator<Item = &Section> + '_ {
        self.sections.iter().filter(|s| !s.is_empty())
    }

    /// Every visible entry in order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.sections.iter().flat_map(|s| s.entries().iter())
    }

    /// Number of visible entries.
    pub fn match_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// Whether no entry is visible.
    pub fn is_empty(&self) -> bool {
        self.match_count() == 0
    }
}

impl PartialEq<Catalog> for FilteredCatalog {
    fn eq(&self, other: &Catalog) -> bool {
        self.sections == other.sections()
    }
}

/// Filter `catalog` by the raw `query` string.
///
/// Total over every input: empty, whitespace-only, non-matching, and
/// non-ASCII queries all produce a well-formed view.
pub fn filter(catalog: &Catalog, query: &str) -> FilteredCatalog {
    FilteredCatalog::new(catalog, Query::new(query))
}

/// Memoizes the most recent filter result for one catalog.
///
/// Re-applying a query that normalizes to the same text returns the stored
/// view without recomputing it.  This is purely an optimization; results are
/// identical to calling [`filter`] directly.
#[derive(Debug, Clone)]
pub struct FilterCache {
    catalog: Arc<Catalog>,
    current: FilteredCatalog,
    computations: u64,
}

impl FilterCache {
    /// Create a cache holding the unfiltered view of `catalog`.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let current = FilteredCatalog::new(&catalog, Query::default());
        Self {
            catalog,
            current,
            computations: 1,
        }
    }

    /// Filter by `raw`, reusing the previous result when the normalized
    /// query is unchanged.
    pub fn apply(&mut self, raw: &str) -> &FilteredCatalog {
        let query = Query::new(raw);
        if query != self.current.query {
            tracing::debug!(query = query.as_str(), "recomputing filtered catalog");
            self.current = FilteredCatalog::new(&self.catalog, query);
            self.computations += 1;
        }
        &self.current
    }

    /// The most recent view.
    pub fn current(&self) -> &FilteredCatalog {
        &self.current
    }

    /// The catalog being filtered.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use proptest::prelude::*;

    fn names(section: &Section) -> Vec<&str> {
        section.entries().iter().map(|e| e.name()).collect()
    }

    fn titles(view: &FilteredCatalog) -> Vec<&str> {
        view.sections().iter().map(|s| s.title()).collect()
    }

    fn seeded() -> Catalog {
        seed::catalog().unwrap()
    }

    #[test]
    fn empty_query_is_identity() {
        let catalog = seeded();
        let view = filter(&catalog, "");
        assert!(view.is_unfiltered());
        assert_eq!(view, catalog);
        assert_eq!(view.match_count(), catalog.len());
    }

    #[test]
    fn whitespace_query_is_identity() {
        let catalog = seeded();
        let view = filter(&catalog, "   \t ");
        assert!(view.is_unfiltered());
        assert_eq!(view, catalog);
    }

    #[test]
    fn matching_everything_is_not_unfiltered() {
        let catalog = Catalog::builder()
            .section("A", [Entry::new("Alpha", "first", "a", "u")])
            .build()
            .unwrap();
        let view = filter(&catalog, "a");
        assert_eq!(view, catalog);
        assert!(!view.is_unfiltered());
    }

    #[test]
    fn tog_keeps_only_toggle_and_all_sections() {
        let catalog = seeded();
        let view = filter(&catalog, "tog");

        assert_eq!(names(view.section("Controls").unwrap()), ["Toggle"]);
        assert_eq!(
            titles(&view),
            ["Text Input/Output", "Controls", "Container Views", "List"]
        );
        for section in view.sections() {
            if section.title() != "Controls" {
                assert!(section.is_empty(), "{} should be empty", section.title());
            }
        }
    }

    #[test]
    fn no_match_keeps_every_section_empty() {
        let catalog = seeded();
        let view = filter(&catalog, "zzz-no-match");
        assert_eq!(view.sections().len(), catalog.sections().len());
        assert!(view.sections().iter().all(Section::is_empty));
        assert!(view.is_empty());
        assert_eq!(view.non_empty_sections().count(), 0);

        let original: Vec<_> = catalog.sections().iter().map(|s| (s.id(), s.title())).collect();
        let filtered: Vec<_> = view.sections().iter().map(|s| (s.id(), s.title())).collect();
        assert_eq!(original, filtered);
    }

    #[test]
    fn case_insensitive() {
        let catalog = seeded();
        assert_eq!(filter(&catalog, "TEXT"), filter(&catalog, "text"));
        assert_eq!(
            filter(&catalog, "TeXt").match_count(),
            filter(&catalog, "text").match_count()
        );
    }

    #[test]
    fn description_only_match_is_included() {
        let catalog = seeded();
        // "switch" appears only in Toggle's description.
        let view = filter(&catalog, "switch");
        assert_eq!(view.entries().map(|e| e.name()).collect::<Vec<_>>(), ["Toggle"]);
    }

    #[test]
    fn icon_key_and_url_are_not_searched() {
        let catalog = seeded();
        // "hourglass" is ProgressView's icon key only.
        assert!(filter(&catalog, "hourglass").is_empty());
        // Every URL contains "developer.apple.com".
        assert!(filter(&catalog, "developer.apple").is_empty());
    }

    #[test]
    fn special_characters_are_literal() {
        let catalog = seeded();
        assert!(filter(&catalog, ".*").is_empty());
        assert!(filter(&catalog, "[a-z]").is_empty());
        // "Text Input/Output" is a title, not an entry, so "/" matches nothing.
        assert!(filter(&catalog, "/").is_empty());
        assert_eq!(
            filter(&catalog, "url.").entries().map(|e| e.name()).collect::<Vec<_>>(),
            ["Link"]
        );
    }

    #[test]
    fn query_is_trimmed() {
        let catalog = seeded();
        assert_eq!(filter(&catalog, "  slider  "), filter(&catalog, "slider"));
    }

    #[test]
    fn non_ascii_fold_applies_to_both_sides() {
        let catalog = Catalog::builder()
            .section("Intl", [
                Entry::new("Überblick", "Größe ändern", "i", "u"),
                Entry::new("Plain", "ascii only", "i", "u"),
            ])
            .build()
            .unwrap();
        let names_for = |q: &str| {
            filter(&catalog, q)
                .entries()
                .map(|e| e.name().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(names_for("ÜBER"), ["Überblick"]);
        assert_eq!(names_for("über"), ["Überblick"]);
        assert_eq!(names_for("GRÖSSE"), Vec::<String>::new());
        assert_eq!(names_for("GRÖßE"), ["Überblick"]);
    }

    #[test]
    fn filter_does_not_mutate_catalog() {
        let catalog = seeded();
        let before = catalog.clone();
        let _ = filter(&catalog, "button");
        assert_eq!(catalog, before);
    }

    #[test]
    fn filtered_entries_keep_their_ids() {
        let catalog = seeded();
        let view = filter(&catalog, "picker");
        for entry in view.entries() {
            assert_eq!(catalog.lookup(entry.name()).unwrap().id(), entry.id());
        }
    }

    #[test]
    fn cache_reuses_result_for_equivalent_query() {
        let catalog = Arc::new(seeded());
        let mut cache = FilterCache::new(Arc::clone(&catalog));
        assert_eq!(cache.computations, 1);

        cache.apply("Stack");
        assert_eq!(cache.computations, 2);
        cache.apply("  stack ");
        assert_eq!(cache.computations, 2);
        assert_eq!(cache.current(), &filter(&catalog, "stack"));

        cache.apply("");
        assert_eq!(cache.computations, 3);
        assert!(cache.current().is_unfiltered());
    }

    #[test]
    fn cache_starts_unfiltered() {
        let catalog = Arc::new(seeded());
        let cache = FilterCache::new(catalog);
        assert!(cache.current().is_unfiltered());
        assert_eq!(cache.current(), cache.catalog());
    }

    /// Query text drawn from the characters that occur in the seed, plus a
    /// few that never do.
    fn query_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z ./#-]{0,6}"
    }

    /// Whether `sub` is an in-order subsequence of `full`.
    fn is_subsequence(sub: &[&str], full: &[&str]) -> bool {
        let mut it = full.iter();
        sub.iter().all(|s| it.any(|f| f == s))
    }

    proptest! {
        #[test]
        fn prop_filter_is_idempotent(q in query_strategy()) {
            let catalog = seeded();
            prop_assert_eq!(filter(&catalog, &q), filter(&catalog, &q));
        }

        #[test]
        fn prop_case_does_not_matter(q in query_strategy()) {
            let catalog = seeded();
            prop_assert_eq!(
                filter(&catalog, &q.to_uppercase()),
                filter(&catalog, &q.to_lowercase())
            );
        }

        #[test]
        fn prop_order_is_preserved(q in query_strategy()) {
            let catalog = seeded();
            let view = filter(&catalog, &q);
            prop_assert_eq!(view.sections().len(), catalog.sections().len());
            for (filtered, original) in view.sections().iter().zip(catalog.sections()) {
                prop_assert_eq!(filtered.id(), original.id());
                prop_assert_eq!(filtered.title(), original.title());
                let sub: Vec<_> = filtered.entries().iter().map(|e| e.name()).collect();
                let full: Vec<_> = original.entries().iter().map(|e| e.name()).collect();
                prop_assert!(is_subsequence(&sub, &full));
            }
        }

        #[test]
        fn prop_every_result_matches(q in query_strategy()) {
            let catalog = seeded();
            let needle = q.trim().to_lowercase();
            for entry in filter(&catalog, &q).entries() {
                prop_assert!(
                    entry.name().to_lowercase().contains(&needle)
                        || entry.description().to_lowercase().contains(&needle)
                );
            }
        }

        #[test]
        fn prop_blank_queries_are_identity(spaces in "[ \t]{0,4}") {
            let catalog = seeded();
            let view = filter(&catalog, &spaces);
            prop_assert!(view.is_unfiltered());
            prop_assert!(view == catalog);
        }
    }
}
