//! Relevance scoring of search terms against the fields of an entry.
//!
//! Scores are distances from [`BASE_SCORE`]: lower is better. Each search term is
//! scored against the first field (in configured order) that contains it. The
//! contribution grows with how much of the field the match covers and whether it
//! sits at the start and/or end of the field, and decays with the position of the
//! term in the query and of the field in the field order.

use regex::{Match, Regex, RegexBuilder};

/// Score of an entry without any match. Genuine matches score strictly below it.
pub const BASE_SCORE: f64 = 1_000_000_000.0;

/// Scale of a single match contribution.
pub const RANK_FACTOR: f64 = 10_000.0;

/// Decay per position in the field order.
pub const DAMPENING_TEXT: f64 = 0.99;

/// Decay per position in the search terms.
pub const DAMPENING_QUERY: f64 = 0.99;

/// A search term compiled into a case-insensitive literal pattern.
///
/// Regex metacharacters in the term are escaped, so `operator()` or `c++`
/// match literally.
#[derive(Debug, Clone)]
pub struct TermPattern {
    term: String,
    /// Index of the term in the search terms, used for dampening
    position: usize,
    regex: Regex,
}

impl TermPattern {
    /// Compile a term. Returns `None` for empty terms, which never match.
    pub fn new(term: &str, position: usize) -> Option<Self> {
        if term.is_empty() {
            return None;
        }

        match RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
        {
            Ok(regex) => Some(Self {
                term: term.to_string(),
                position,
                regex,
            }),
            Err(e) => {
                tracing::warn!("Skipping search term '{}': {}", term, e);
                None
            }
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub const fn position(&self) -> usize {
        self.position
    }

    /// First case-insensitive occurrence of the term in `haystack`.
    pub fn find<'h>(&self, haystack: &'h str) -> Option<Match<'h>> {
        self.regex.find(haystack)
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

/// Compile all search terms, skipping empty ones but keeping original positions.
pub fn compile_terms(terms: &[String]) -> Vec<TermPattern> {
    terms
        .iter()
        .enumerate()
        .filter_map(|(position, term)| TermPattern::new(term, position))
        .collect()
}

/// Rank points of a match: 4 for the whole field, 3 for a prefix, 2 for a suffix,
/// 1 for an infix.
fn rank_points(field: &str, start: usize, end: usize) -> f64 {
    let mut points = 1.0;
    if start == 0 {
        points += 2.0;
    }
    if end == field.len() {
        points += 1.0;
    }
    points
}

/// Candidate score of a match of term `term_position` in field `field_position`.
pub fn match_score(field: &str, found: &Match<'_>, term_position: usize, field_position: usize) -> f64 {
    let field_chars = field.chars().count();
    if field_chars == 0 {
        return BASE_SCORE;
    }

    let ratio = found.as_str().chars().count() as f64 / field_chars as f64;
    let score_delta = rank_points(field, found.start(), found.end())
        * RANK_FACTOR
        * ratio
        * dampening(DAMPENING_QUERY, term_position)
        * dampening(DAMPENING_TEXT, field_position);

    BASE_SCORE - score_delta
}

fn dampening(base: f64, exponent: usize) -> f64 {
    (0..exponent).fold(1.0, |acc, _| acc * base)
}

/// Score an entry given its fields in priority order.
///
/// Only the first field containing a term counts for that term; the entry score
/// is the best (lowest) score over all terms. Returns `None` when no term matches.
/// The result may still equal [`BASE_SCORE`]; check it with [`is_genuine_match`].
pub fn find_and_score(patterns: &[TermPattern], fields: &[&str]) -> Option<f64> {
    let mut best: Option<f64> = None;

    for pattern in patterns {
        let first_match = fields
            .iter()
            .enumerate()
            .find_map(|(k, field)| pattern.find(field).map(|found| (k, *field, found)));

        if let Some((field_position, field, found)) = first_match {
            let candidate = match_score(field, &found, pattern.position(), field_position);
            best = Some(best.map_or(candidate, |b| b.min(candidate)));
        }
    }

    best
}

/// Whether a score stems from a real match rather than the base value.
pub fn is_genuine_match(score: f64) -> bool {
    score < BASE_SCORE
}
