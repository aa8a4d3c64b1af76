//! Selection of the emphasized fragment shown for a result.
//!
//! At most one destination is highlighted per entry. The title takes precedence
//! over alternate names, which take precedence over subentries. Alternate names
//! and subentries are only considered when they are part of the scored fields.

use super::scoring::TermPattern;
use crate::types::{DocumentEntry, SearchField};
use std::ops::Range;

/// Maximum number of subentries listed under a result.
pub const MAX_SUBENTRIES: usize = 4;

/// A text with an optional emphasized byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    pub text: String,
    pub span: Option<Range<usize>>,
}

impl Highlighted {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            span: None,
        }
    }

    /// Emphasize the first occurrence of any of the patterns, tried in order.
    fn first_of(text: &str, patterns: &[TermPattern]) -> Self {
        let span = patterns
            .iter()
            .find_map(|pattern| pattern.find(text))
            .map(|found| found.range());
        Self {
            text: text.to_string(),
            span,
        }
    }

    /// Split into the text before, inside and after the emphasized range.
    pub fn parts(&self) -> (&str, &str, &str) {
        match &self.span {
            Some(span) => (
                &self.text[..span.start],
                &self.text[span.clone()],
                &self.text[span.end..],
            ),
            None => (&self.text, "", ""),
        }
    }
}

/// A matching subentry: its category and its (possibly emphasized) label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubentryMatch {
    pub category: String,
    pub label: Highlighted,
}

/// The single highlighted destination of a result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    /// Byte range within the title
    Title(Range<usize>),
    /// The first alternate name containing a term
    Aka(Highlighted),
    /// Up to [`MAX_SUBENTRIES`] matching subentries
    Subentries(Vec<SubentryMatch>),
}

/// Split a raw `"<category> <label>"` subentry. A missing label yields an empty one.
fn split_subentry(raw: &str) -> (&str, &str) {
    raw.split_once(' ').unwrap_or((raw, ""))
}

/// Pick the destination to emphasize for an entry scored on `fields`.
pub fn highlight_entry(
    entry: &DocumentEntry,
    patterns: &[TermPattern],
    fields: &[SearchField],
) -> Highlight {
    if let Some(found) = patterns.iter().find_map(|pattern| pattern.find(&entry.title)) {
        return Highlight::Title(found.range());
    }

    if fields.contains(&SearchField::Akas) {
        for pattern in patterns {
            if let Some(aka) = entry.aka_list().find(|aka| pattern.is_match(aka)) {
                return Highlight::Aka(Highlighted::first_of(aka, std::slice::from_ref(pattern)));
            }
        }
    }

    if !fields.contains(&SearchField::Subentries) {
        return Highlight::None;
    }

    // Each matched subentry keeps the term that selected it.
    let mut matched: Vec<(usize, &TermPattern)> = Vec::new();
    let subentries: Vec<&str> = entry.subentry_list().collect();
    'terms: for pattern in patterns {
        for (index, raw) in subentries.iter().enumerate() {
            if matched.len() == MAX_SUBENTRIES {
                break 'terms;
            }
            if !matched.iter().any(|(seen, _)| *seen == index) && pattern.is_match(raw) {
                matched.push((index, pattern));
            }
        }
    }

    if matched.is_empty() {
        return Highlight::None;
    }

    Highlight::Subentries(
        matched
            .into_iter()
            .map(|(index, pattern)| {
                let (category, label) = split_subentry(subentries[index]);
                SubentryMatch {
                    category: category.to_string(),
                    label: Highlighted::first_of(label, std::slice::from_ref(pattern)),
                }
            })
            .collect(),
    )
}
