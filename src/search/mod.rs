//! Client-side text search over documentation entries.
//!
//! This module provides query normalization, scoring, highlighting and the
//! query engine that ties them together. It has no knowledge of how results
//! are presented; see [`crate::format`] for layout and rendering.

// Module declarations
pub mod highlight;
pub mod index;
pub mod query;
pub mod scoring;
pub mod tokenize;

// Public re-exports (used via lib.rs)
pub use highlight::{Highlight, Highlighted, SubentryMatch};
pub use index::{EntryIndex, MatchResult, Suggestion, normalize_category};
pub use query::{QueryEngine, ResultSet, SearchOutcome, SearchRequest, query_from_url};
pub use scoring::{BASE_SCORE, find_and_score, is_genuine_match};
pub use tokenize::{Normalized, QueryTerms, normalize_query};
