//! QueryEngine runs searches over an [`EntryIndex`] and caches the last result list.
//! Also includes extraction of the query from a page URL.

use super::index::{EntryIndex, MatchResult, Suggestion};
use super::tokenize::{Normalized, QueryTerms, normalize_query};
use crate::config::Settings;
use std::sync::Arc;

/// Number of "did you mean" titles offered when nothing matches.
const SUGGESTION_LIMIT: usize = 5;

/// Extract the `q` parameter from a URL or a bare query string.
///
/// Returns `None` when the parameter is absent or empty.
pub fn query_from_url(input: &str) -> Option<String> {
    let query = match url::Url::parse(input) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) => input
            .rsplit_once('?')
            .map_or(input, |(_, query)| query)
            .to_string(),
    };

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// One search invocation.
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'a> {
    /// Raw query as typed
    pub query: &'a str,
    /// Enabled categories; empty matches nothing
    pub categories: &'a [String],
    pub apply_replacements: bool,
}

/// Matches of a successful search.
#[derive(Debug, Clone)]
pub struct ResultSet {
    pub terms: QueryTerms,
    /// Sorted by category priority, then score
    pub matches: Arc<[MatchResult]>,
    /// False when the cached list of the previous identical query was reused
    pub recomputed: bool,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Outcome of a search. Empty outcomes are expected states, not errors.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// All words of the query were stop words
    StopWordsOnly,
    /// The query is below the minimum length
    TooShort { minimum_length: usize },
    /// The query was valid but nothing matched
    NoMatch {
        terms: QueryTerms,
        suggestions: Vec<Suggestion>,
        /// False when the previous identical query already found nothing
        recomputed: bool,
    },
    Found(ResultSet),
}

impl SearchOutcome {
    /// Whether the previous search had the same terms and categories.
    pub fn is_reused(&self) -> bool {
        match self {
            Self::Found(results) => !results.recomputed,
            Self::NoMatch { recomputed, .. } => !recomputed,
            Self::StopWordsOnly | Self::TooShort { .. } => false,
        }
    }
}

/// State kept from the previous search for the redundant-query guard.
#[derive(Debug, Clone)]
struct LastSearch {
    query_key: String,
    category_key: String,
    matches: Arc<[MatchResult]>,
    suggestions: Vec<Suggestion>,
}

/// Search engine over a fixed entry index.
///
/// The engine owns the last query and category selection. Repeating a search with
/// the same normalized terms and categories reuses the previous result list
/// instead of scoring every entry again.
#[derive(Debug)]
pub struct QueryEngine {
    index: EntryIndex,
    settings: Settings,
    last: Option<LastSearch>,
}

impl QueryEngine {
    pub fn new(index: EntryIndex, settings: Settings) -> Self {
        Self {
            index,
            settings,
            last: None,
        }
    }

    pub fn index(&self) -> &EntryIndex {
        &self.index
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Forget the previous search so the next one is always recomputed.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Run a search.
    pub fn search(&mut self, request: &SearchRequest<'_>) -> SearchOutcome {
        let terms = match normalize_query(request.query, &self.settings, request.apply_replacements) {
            Normalized::StopWordsOnly => {
                self.last = None;
                return SearchOutcome::StopWordsOnly;
            }
            Normalized::TooShort { minimum_length } => {
                self.last = None;
                return SearchOutcome::TooShort { minimum_length };
            }
            Normalized::Terms(terms) => terms,
        };

        let query_key = terms.key();
        let category_key = request.categories.join(" ");

        let (last, recomputed) = match self.last.take() {
            Some(last) if last.query_key == query_key && last.category_key == category_key => {
                tracing::debug!("Reusing {} cached results for '{}'", last.matches.len(), query_key);
                (last, false)
            }
            _ => (self.compute(&terms, query_key, category_key, request.categories), true),
        };

        let outcome = if last.matches.is_empty() {
            SearchOutcome::NoMatch {
                terms,
                suggestions: last.suggestions.clone(),
                recomputed,
            }
        } else {
            SearchOutcome::Found(ResultSet {
                terms,
                matches: Arc::clone(&last.matches),
                recomputed,
            })
        };
        self.last = Some(last);
        outcome
    }

    /// Score all entries and remember the result for the next invocation.
    fn compute(
        &self,
        terms: &QueryTerms,
        query_key: String,
        category_key: String,
        categories: &[String],
    ) -> LastSearch {
        let start = std::time::Instant::now();
        let matches: Arc<[MatchResult]> = self
            .index
            .collect_matches(&terms.search_terms, categories, &self.settings)
            .into();
        let suggestions = if matches.is_empty() {
            self.index.suggest(
                &terms.replaced_words.join(" "),
                categories,
                &self.settings,
                SUGGESTION_LIMIT,
            )
        } else {
            Vec::new()
        };
        tracing::debug!(
            "Search for '{}' found {} results in {:?}",
            query_key,
            matches.len(),
            start.elapsed()
        );

        LastSearch {
            query_key,
            category_key,
            matches,
            suggestions,
        }
    }
}
