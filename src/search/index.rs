//! The in-memory entry index and result assembly.

use super::highlight::{Highlight, highlight_entry};
use super::scoring::{TermPattern, compile_terms, find_and_score, is_genuine_match};
use crate::config::Settings;
use crate::error::LoadError;
use crate::types::DocumentEntry;
use ahash::AHashSet;
use rapidfuzz::distance::jaro_winkler;
use std::path::Path;

/// Minimum Jaro-Winkler similarity for a title to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// A scored, highlighted entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Lower is better
    pub score: f64,
    pub title: String,
    pub text: String,
    pub location: String,
    /// Category after applying the grouping table
    pub category: String,
    pub highlight: Highlight,
    /// Position of the source entry in the index
    pub position: usize,
}

/// A title similar to a query that found nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub title: String,
    pub location: String,
    /// Similarity between 0.0 and 1.0, higher is better
    pub score: f64,
}

/// Collapse a category through the grouping table; the first matching pair wins.
pub fn normalize_category<'a>(category: &'a str, groups: &'a [(String, String)]) -> &'a str {
    groups
        .iter()
        .find(|(kind, _)| kind == category)
        .map_or(category, |(_, parent)| parent.as_str())
}

/// Read-only sequence of documentation entries, in generator order.
#[derive(Debug, Clone, Default)]
pub struct EntryIndex {
    entries: Vec<DocumentEntry>,
}

impl EntryIndex {
    pub fn new(entries: Vec<DocumentEntry>) -> Self {
        Self { entries }
    }

    /// Load entries from a JSON array.
    ///
    /// The generator may emit the array as a JavaScript assignment
    /// (`var searchData = [...];`); anything around the outermost brackets is ignored.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let json = match (content.find('['), content.rfind(']')) {
            (Some(start), Some(end)) if start < end => &content[start..=end],
            _ => content.as_str(),
        };

        let start = std::time::Instant::now();
        let entries: Vec<DocumentEntry> =
            serde_json::from_str(json).map_err(|source| LoadError::ParseEntries {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(
            "Loaded {} search entries from {} in {:?}",
            entries.len(),
            path.display(),
            start.elapsed()
        );

        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[DocumentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries whose normalized category is enabled, with that category.
    fn enabled_entries<'a>(
        &'a self,
        enabled: &'a [String],
        settings: &'a Settings,
    ) -> impl Iterator<Item = (usize, &'a DocumentEntry, &'a str)> {
        let enabled: AHashSet<&str> = enabled.iter().map(String::as_str).collect();
        self.entries.iter().enumerate().filter_map(move |(position, entry)| {
            let category = normalize_category(&entry.category, &settings.category_groups);
            enabled
                .contains(category)
                .then_some((position, entry, category))
        })
    }

    /// Score every enabled entry against the search terms.
    ///
    /// Results are sorted by category priority, then by ascending score. The sort is
    /// stable, so equal results keep their entry order. An empty `enabled` list
    /// matches nothing.
    pub fn collect_matches(
        &self,
        search_terms: &[String],
        enabled: &[String],
        settings: &Settings,
    ) -> Vec<MatchResult> {
        let patterns = compile_terms(search_terms);
        let mut found: Vec<MatchResult> = self
            .enabled_entries(enabled, settings)
            .filter_map(|(position, entry, category)| {
                let score = self.score_entry(entry, &patterns, settings)?;
                // Scores equal to the base value are not matches.
                if !is_genuine_match(score) {
                    return None;
                }

                let highlight = if settings.highlight_terms {
                    highlight_entry(entry, &patterns, &settings.field_order)
                } else {
                    Highlight::None
                };

                Some(MatchResult {
                    score,
                    title: entry.title.clone(),
                    text: entry.text.clone(),
                    location: entry.location.clone(),
                    category: category.to_string(),
                    highlight,
                    position,
                })
            })
            .collect();

        found.sort_by(|a, b| {
            settings
                .category_priority(&a.category)
                .cmp(&settings.category_priority(&b.category))
                .then_with(|| a.score.total_cmp(&b.score))
        });

        tracing::debug!(
            "{} of {} entries matched {:?}",
            found.len(),
            self.entries.len(),
            search_terms
        );
        found
    }

    fn score_entry(
        &self,
        entry: &DocumentEntry,
        patterns: &[TermPattern],
        settings: &Settings,
    ) -> Option<f64> {
        let fields: Vec<&str> = settings
            .field_order
            .iter()
            .map(|field| entry.field(*field))
            .collect();
        find_and_score(patterns, &fields)
    }

    /// Titles of enabled entries resembling `query`, best first.
    pub fn suggest(
        &self,
        query: &str,
        enabled: &[String],
        settings: &Settings,
        limit: usize,
    ) -> Vec<Suggestion> {
        let query = query.to_lowercase();
        let mut suggestions: Vec<Suggestion> = self
            .enabled_entries(enabled, settings)
            .filter_map(|(_, entry, _)| {
                let score =
                    jaro_winkler::similarity(query.chars(), entry.title.to_lowercase().chars());
                (score > SUGGESTION_THRESHOLD).then(|| Suggestion {
                    title: entry.title.clone(),
                    location: entry.location.clone(),
                    score,
                })
            })
            .collect();

        suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
        suggestions.dedup_by(|a, b| a.title == b.title);
        suggestions.truncate(limit);
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchField;
    use assert2::check;
    use rstest::rstest;

    fn entry(title: &str, text: &str, category: &str) -> DocumentEntry {
        DocumentEntry {
            title: title.to_string(),
            text: text.to_string(),
            category: category.to_string(),
            location: format!("{}.html", title),
            ..DocumentEntry::default()
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[rstest]
    #[case("global_function", "function")]
    #[case("member_function", "function")]
    #[case("class", "class")]
    fn test_normalize_category(#[case] input: &str, #[case] expected: &str) {
        let groups = vec![
            ("global_function".to_string(), "function".to_string()),
            ("member_function".to_string(), "function".to_string()),
        ];
        check!(normalize_category(input, &groups) == expected);
    }

    #[test]
    fn exact_title_ranks_before_body_infix() {
        let index = EntryIndex::new(vec![
            entry("Sequence", "an Iterator is used", "class"),
            entry("Iterator", "...", "class"),
        ]);
        let found =
            index.collect_matches(&strings(&["iterator"]), &strings(&["class"]), &Settings::default());

        check!(found.len() == 2);
        check!(found[0].title == "Iterator");
        check!(found[0].highlight == Highlight::Title(0..8));
        check!(found[1].title == "Sequence");
        check!(found[1].highlight == Highlight::None);
    }

    #[test]
    fn category_priority_precedes_score() {
        let index = EntryIndex::new(vec![
            entry("find", "", "function"),
            entry("Finder", "", "class"),
            entry("findAll", "", "unlisted"),
        ]);
        let found = index.collect_matches(
            &strings(&["find"]),
            &strings(&["function", "class", "unlisted"]),
            &Settings::default(),
        );
        let titles: Vec<&str> = found.iter().map(|m| m.title.as_str()).collect();
        check!(titles == vec!["Finder", "find", "findAll"]);
    }

    #[test]
    fn grouped_categories_are_filtered_after_collapsing() {
        let settings = Settings {
            category_groups: vec![("global_function".to_string(), "function".to_string())],
            ..Settings::default()
        };
        let index = EntryIndex::new(vec![entry("length", "", "global_function")]);

        let found = index.collect_matches(&strings(&["length"]), &strings(&["function"]), &settings);
        check!(found.len() == 1);
        check!(found[0].category == "function");

        let found =
            index.collect_matches(&strings(&["length"]), &strings(&["global_function"]), &settings);
        check!(found.is_empty());
    }

    #[test]
    fn empty_category_selection_matches_nothing() {
        let index = EntryIndex::new(vec![entry("Iterator", "", "class")]);
        let found = index.collect_matches(&strings(&["iterator"]), &[], &Settings::default());
        check!(found.is_empty());
    }

    #[test]
    fn equal_scores_keep_entry_order() {
        let index = EntryIndex::new(vec![
            entry("Alpha", "node", "class"),
            entry("Beta", "node", "class"),
            entry("Gamma", "node", "class"),
        ]);
        let found =
            index.collect_matches(&strings(&["node"]), &strings(&["class"]), &Settings::default());
        let positions: Vec<usize> = found.iter().map(|m| m.position).collect();
        check!(positions == vec![0, 1, 2]);
    }

    #[test]
    fn highlighting_can_be_disabled() {
        let settings = Settings {
            highlight_terms: false,
            ..Settings::default()
        };
        let index = EntryIndex::new(vec![entry("Iterator", "", "class")]);
        let found = index.collect_matches(&strings(&["iterator"]), &strings(&["class"]), &settings);
        check!(found[0].highlight == Highlight::None);
    }

    #[test]
    fn tag_profile_scores_and_highlights_only_its_fields() {
        let settings = Settings {
            field_order: vec![SearchField::Title, SearchField::Text, SearchField::Tags],
            ..Settings::default()
        };
        let index = EntryIndex::new(vec![
            DocumentEntry {
                tags: "graph".to_string(),
                akas: "graphy".to_string(),
                ..entry("Alpha", "", "class")
            },
            DocumentEntry {
                akas: "graph".to_string(),
                ..entry("Beta", "", "class")
            },
        ]);
        let found = index.collect_matches(&strings(&["graph"]), &strings(&["class"]), &settings);

        check!(found.len() == 1);
        check!(found[0].title == "Alpha");
        // Whole-field match in the third field.
        check!((found[0].score - 999_960_796.0).abs() < 1e-3);
        check!(found[0].highlight == Highlight::None);
    }

    #[test]
    fn suggests_similar_titles() {
        let index = EntryIndex::new(vec![
            entry("Iterator", "", "class"),
            entry("Graph", "", "class"),
        ]);
        let suggestions =
            index.suggest("iteratr", &strings(&["class"]), &Settings::default(), 5);
        check!(suggestions.len() == 1);
        check!(suggestions[0].title == "Iterator");
    }
}
