//! Station and line lookup.
//!
//! The API identifies stations and lines inconsistently: sometimes by code,
//! sometimes by full name, sometimes by an abbreviation or a garbled name.
//! A [`Catalog`] indexes a fixed list of entities once and resolves any of
//! these forms to the canonical entry:
//!
//! 1. exact code (case-insensitive)
//! 2. exact name or alias, then exact abbreviation
//! 3. fuzzy match on names, aliases and abbreviations
//!
//! When nothing matches, [`Catalog::resolve_or_synthesize`] fabricates a
//! placeholder from whatever the query carried.

mod fuzzy;
mod lines;
mod stations;

use std::collections::HashMap;

use tracing::trace;

use crate::domain::{Line, Station};

pub use fuzzy::{accept as accept_fuzzy_match, lcs_len};
pub use lines::builtin_lines;
pub use stations::builtin_stations;

/// Code used for synthesized entities when the query had no code.
pub const UNKNOWN_CODE: &str = "XX";

/// Something a [`Catalog`] can index.
pub trait Entity: Clone {
    fn code(&self) -> &str;

    /// Full name followed by any aliases.
    fn names(&self) -> impl Iterator<Item = &str>;

    fn abbreviations(&self) -> impl Iterator<Item = &str>;

    /// Strings scored by fuzzy matching.
    fn fuzzy_candidates(&self) -> impl Iterator<Item = &str> {
        self.names().chain(self.abbreviations())
    }

    /// Build a placeholder from a query that matched nothing.
    fn synthesize(code: Option<&str>, name: Option<&str>) -> Self;
}

/// A lookup request. At least one field should be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchQuery<'a> {
    pub code: Option<&'a str>,
    pub name: Option<&'a str>,
}

impl<'a> SearchQuery<'a> {
    pub fn new(code: Option<&'a str>, name: Option<&'a str>) -> Self {
        Self { code, name }
    }

    pub fn with_code(code: &'a str) -> Self {
        Self {
            code: Some(code),
            name: None,
        }
    }

    pub fn with_name(name: &'a str) -> Self {
        Self {
            code: None,
            name: Some(name),
        }
    }
}

/// Outcome of [`Catalog::resolve_detailed`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a, T> {
    Found(&'a T),
    Synthesized(T),
}

impl<T: Clone> Resolution<'_, T> {
    pub fn is_synthesized(&self) -> bool {
        matches!(self, Resolution::Synthesized(_))
    }

    pub fn into_entity(self) -> T {
        match self {
            Resolution::Found(entity) => entity.clone(),
            Resolution::Synthesized(entity) => entity,
        }
    }
}

/// Immutable index over a list of entities.
///
/// All keys are lowercased. When two entities register the same key the
/// later one in the list wins.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    entries: Vec<T>,
    by_code: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    by_abbreviation: HashMap<String, usize>,
    /// Lowercased fuzzy candidates with the index of their entry.
    candidates: Vec<(usize, String)>,
}

impl<T: Entity> Catalog<T> {
    pub fn new(entries: Vec<T>) -> Self {
        let mut by_code = HashMap::new();
        let mut by_name = HashMap::new();
        let mut by_abbreviation = HashMap::new();
        let mut candidates = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            insert_key(&mut by_code, entry.code(), index);
            for name in entry.names() {
                insert_key(&mut by_name, name, index);
            }
            for abbreviation in entry.abbreviations() {
                insert_key(&mut by_abbreviation, abbreviation, index);
            }
            candidates.extend(
                entry
                    .fuzzy_candidates()
                    .filter(|c| !c.is_empty())
                    .map(|c| (index, c.to_lowercase())),
            );
        }

        Self {
            entries,
            by_code,
            by_name,
            by_abbreviation,
            candidates,
        }
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn by_code(&self, code: &str) -> Option<&T> {
        self.get(&self.by_code, code)
    }

    /// Exact lookup by full name or alias.
    pub fn by_name(&self, name: &str) -> Option<&T> {
        self.get(&self.by_name, name)
    }

    pub fn by_abbreviation(&self, abbreviation: &str) -> Option<&T> {
        self.get(&self.by_abbreviation, abbreviation)
    }

    /// Exact lookup by name or alias, then by abbreviation. No fuzzy matching.
    pub fn lookup_name(&self, name: &str) -> Option<&T> {
        self.by_name(name).or_else(|| self.by_abbreviation(name))
    }

    /// Best fuzzy match for `name`, if it clears the acceptance threshold.
    pub fn fuzzy_find(&self, name: &str) -> Option<&T> {
        let query = name.to_lowercase();
        let best = fuzzy::best_match(
            &query,
            self.candidates.iter().map(|(i, c)| (*i, c.as_str())),
            |i| self.entries[i].code(),
        )?;

        if fuzzy::accept(best.lcs, query.chars().count()) {
            let entry = &self.entries[best.entry];
            trace!(name, code = entry.code(), lcs = best.lcs, "fuzzy match");
            Some(entry)
        } else {
            trace!(name, lcs = best.lcs, "fuzzy match below threshold");
            None
        }
    }

    /// Find the entity a query refers to.
    pub fn resolve(&self, query: SearchQuery<'_>) -> Option<&T> {
        if let Some(code) = query.code
            && let Some(entry) = self.by_code(code)
        {
            return Some(entry);
        }

        let name = query.name?;
        self.lookup_name(name).or_else(|| self.fuzzy_find(name))
    }

    /// Like [`Catalog::resolve`], but never fails: unknown entities are
    /// synthesized from the query.
    pub fn resolve_or_synthesize(&self, query: SearchQuery<'_>) -> T {
        self.resolve_detailed(query).into_entity()
    }

    /// Like [`Catalog::resolve_or_synthesize`], but tells whether the entity
    /// came from the catalog.
    pub fn resolve_detailed(&self, query: SearchQuery<'_>) -> Resolution<'_, T> {
        match self.resolve(query) {
            Some(entry) => Resolution::Found(entry),
            None => {
                trace!(code = query.code, name = query.name, "synthesizing entity");
                Resolution::Synthesized(T::synthesize(query.code, query.name))
            }
        }
    }

    fn get(&self, index: &HashMap<String, usize>, key: &str) -> Option<&T> {
        index
            .get(&key.to_lowercase())
            .map(|&i| &self.entries[i])
    }
}

fn insert_key(index: &mut HashMap<String, usize>, key: &str, entry: usize) {
    if !key.is_empty() {
        index.insert(key.to_lowercase(), entry);
    }
}

/// The station and line catalogs used to normalize API results.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub stations: Catalog<Station>,
    pub lines: Catalog<Line>,
}

impl Catalogs {
    pub fn new(stations: Vec<Station>, lines: Vec<Line>) -> Self {
        Self {
            stations: Catalog::new(stations),
            lines: Catalog::new(lines),
        }
    }

    /// Catalogs built from the NJ Transit reference tables.
    pub fn builtin() -> Self {
        Self::new(builtin_stations(), builtin_lines())
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(name: &str) -> Catalog<Station> {
        Catalog::new(vec![Station::new("AA", name, "")])
    }

    #[test]
    fn fuzzy_rejects_two_common_characters() {
        let catalog = single("abcdefgh");
        assert!(catalog.resolve(SearchQuery::with_name("abzzzzzz")).is_none());
    }

    #[test]
    fn fuzzy_accepts_three_common_characters() {
        let catalog = single("abcdefgh");
        let found = catalog.resolve(SearchQuery::with_name("abczzzzz")).unwrap();
        assert_eq!(found.code.as_str(), "AA");
    }

    #[test]
    fn fuzzy_requires_quarter_of_query() {
        let catalog = single("abcdefgh");
        assert!(catalog.resolve(SearchQuery::with_name("abczzzzzzzzzzzzz")).is_none());
        assert!(catalog.resolve(SearchQuery::with_name("abczzzzzzzzzzzz")).is_some());
    }

    #[test]
    fn code_takes_priority_over_name() {
        let catalog = Catalog::new(vec![
            Station::new("AA", "Alpha", "Alpha"),
            Station::new("BB", "Bravo", "Bravo"),
        ]);
        let found = catalog.resolve(SearchQuery::new(Some("bb"), Some("Alpha"))).unwrap();
        assert_eq!(found.code.as_str(), "BB");
    }

    #[test]
    fn unknown_code_falls_back_to_name() {
        let catalog = Catalog::new(vec![Station::new("AA", "Alpha", "Alpha")]);
        let found = catalog.resolve(SearchQuery::new(Some("ZZ"), Some("alpha"))).unwrap();
        assert_eq!(found.code.as_str(), "AA");
    }

    #[test]
    fn name_beats_abbreviation() {
        let catalog = Catalog::new(vec![
            Station::new("AA", "Alpha", "Shared"),
            Station::new("BB", "Shared", "Bravo"),
        ]);
        let found = catalog.resolve(SearchQuery::with_name("shared")).unwrap();
        assert_eq!(found.code.as_str(), "BB");
    }

    #[test]
    fn later_entry_wins_duplicate_keys() {
        let catalog = Catalog::new(vec![
            Station::new("AA", "Alpha", "Same"),
            Station::new("BB", "Bravo", "Same"),
        ]);
        assert_eq!(catalog.by_abbreviation("SAME").unwrap().code.as_str(), "BB");
    }

    #[test]
    fn empty_keys_are_not_indexed() {
        let catalog = Catalog::new(vec![Station::new("AA", "Alpha", "")]);
        assert!(catalog.by_abbreviation("").is_none());
        assert!(catalog.resolve(SearchQuery::with_name("")).is_none());
    }

    #[test]
    fn query_without_fields_finds_nothing() {
        let catalog = Catalog::new(vec![Station::new("AA", "Alpha", "Alpha")]);
        assert!(catalog.resolve(SearchQuery::default()).is_none());
    }

    #[test]
    fn resolve_detailed_marks_synthesized() {
        let catalog = Catalog::new(vec![Station::new("AA", "Alpha", "Alpha")]);

        let found = catalog.resolve_detailed(SearchQuery::with_code("aa"));
        assert!(!found.is_synthesized());
        assert_eq!(found.into_entity().name, "Alpha");

        let made_up = catalog.resolve_detailed(SearchQuery::with_code("QQ"));
        assert!(made_up.is_synthesized());
        assert_eq!(made_up.into_entity().name, "Unknown QQ");
    }

    #[test]
    fn builtin_catalogs_are_populated() {
        let catalogs = Catalogs::builtin();
        assert!(catalogs.stations.len() > 150);
        assert_eq!(catalogs.lines.len(), 14);
        assert!(!catalogs.lines.is_empty());
    }
}
