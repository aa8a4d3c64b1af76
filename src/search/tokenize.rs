//! Query normalization: splitting, stop-word removal, replacement and stemming.
//!
//! The steps run in a fixed order. Stop words are removed before replacements are
//! applied, so a stop word is never replaced.

use crate::config::Settings;
use ahash::AHashSet;

/// The intermediate word lists of a normalized query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTerms {
    /// Lower-cased input split on single spaces (may contain empty tokens)
    pub words: Vec<String>,
    pub non_stop_words: Vec<String>,
    pub replaced_words: Vec<String>,
    /// Replaced words plus their stem additions; the patterns used for matching
    pub search_terms: Vec<String>,
}

impl QueryTerms {
    /// Whether replacements changed the query the user typed.
    pub fn was_rewritten(&self) -> bool {
        self.replaced_words
            .iter()
            .any(|word| !self.words.contains(word))
    }

    /// Joined search terms, the key of the redundant-query guard.
    pub fn key(&self) -> String {
        self.search_terms.join(" ")
    }
}

/// Result of normalizing a raw query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// Every word was a stop word
    StopWordsOnly,
    /// The remaining text is shorter than the configured minimum
    TooShort { minimum_length: usize },
    Terms(QueryTerms),
}

/// Lower-case, trim and split on single spaces.
///
/// Consecutive spaces produce empty tokens, and an empty input yields one empty token.
pub fn split_words(input: &str) -> Vec<String> {
    input
        .to_lowercase()
        .trim()
        .split(' ')
        .map(str::to_string)
        .collect()
}

/// Drop every word equal to a stop word, keeping order.
pub fn remove_stop_words(words: &[String], stop_words: &[String]) -> Vec<String> {
    let stop: AHashSet<&str> = stop_words.iter().map(String::as_str).collect();
    words
        .iter()
        .filter(|word| !stop.contains(word.as_str()))
        .cloned()
        .collect()
}

/// Replace each word by the target of the first pair whose source equals it.
pub fn replace_words(words: &[String], table: &[(String, String)]) -> Vec<String> {
    words
        .iter()
        .map(|word| {
            table
                .iter()
                .find(|(source, _)| source == word)
                .map_or_else(|| word.clone(), |(_, target)| target.clone())
        })
        .collect()
}

/// Append the addition of every matching pair directly after the word.
pub fn stem_words(words: &[String], table: &[(String, String)]) -> Vec<String> {
    let mut stemmed = Vec::with_capacity(words.len());
    for word in words {
        stemmed.push(word.clone());
        stemmed.extend(
            table
                .iter()
                .filter(|(source, _)| source == word)
                .map(|(_, addition)| addition.clone()),
        );
    }
    stemmed
}

/// Run all normalization steps on a raw query.
pub fn normalize_query(input: &str, settings: &Settings, apply_replacements: bool) -> Normalized {
    let words = split_words(input);
    let non_stop_words = remove_stop_words(&words, &settings.stop_words);

    if non_stop_words.join(" ").chars().count() < settings.minimum_length {
        tracing::debug!(
            "Query '{}' too short after stop-word removal ({} of {} words kept)",
            input,
            non_stop_words.len(),
            words.len()
        );
        return if words.len() == non_stop_words.len() {
            Normalized::TooShort {
                minimum_length: settings.minimum_length,
            }
        } else {
            Normalized::StopWordsOnly
        };
    }

    let replaced_words = if apply_replacements {
        replace_words(&non_stop_words, &settings.replace_words)
    } else {
        non_stop_words.clone()
    };
    let search_terms = stem_words(&replaced_words, &settings.stem_words);
    tracing::debug!("Normalized '{}' to terms {:?}", input, search_terms);

    Normalized::Terms(QueryTerms {
        words,
        non_stop_words,
        replaced_words,
        search_terms,
    })
}
