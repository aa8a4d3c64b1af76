//! Search settings: word tables, category configuration and presentation options.
//!
//! Settings are read from a TOML file. Every field has a default, so an empty file
//! (or no file at all) yields a working configuration.

use crate::error::LoadError;
use crate::types::{CategoryInfo, SearchField};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;

/// Common English stop words ignored in queries by default.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "that", "the", "to", "was", "will", "with",
];

/// Default category priority: results are grouped in this order.
pub const CATEGORY_ORDER: &[&str] = &[
    "concept",
    "class",
    "enum",
    "typedef",
    "grouped_typedef",
    "global_typedef",
    "member_typedef",
    "metafunction",
    "global_metafunction",
    "interface_metafunction",
    "tag",
    "grouped_tag",
    "generic",
    "function",
    "global_function",
    "interface_function",
    "member_function",
    "variable",
    "global_variable",
    "member_variable",
    "adaption",
    "macro",
    "group",
    "page",
    "unknown",
];

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

/// Complete configuration of the search engine and its renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Results per page; zero or negative disables paging
    pub num_elements_per_page: i64,
    /// Link target attribute for result links
    pub target: Option<String>,
    pub show_url: bool,
    /// Suppress notices and result counts
    pub raw: bool,
    /// Minimum length of the query after stop-word removal
    pub minimum_length: usize,
    /// Number of words of the body shown as excerpt
    pub descriptive_words: usize,
    pub highlight_terms: bool,
    pub enable_grouping: bool,
    pub max_results_per_group: usize,
    pub field_order: Vec<SearchField>,
    pub stop_words: Vec<String>,
    /// `(word, replacement)` pairs, first match wins
    pub replace_words: Vec<(String, String)>,
    /// `(word, addition)` pairs, the addition is appended after the word
    pub stem_words: Vec<(String, String)>,
    /// `(category, parent)` pairs collapsing sub-kinds into one category
    pub category_groups: Vec<(String, String)>,
    pub category_order: Vec<String>,
    /// Page describing the categories, linked from each glyph
    pub category_page: String,
    pub categories: BTreeMap<String, CategoryInfo>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            num_elements_per_page: 7,
            target: Some("_self".to_string()),
            show_url: false,
            raw: false,
            minimum_length: 3,
            descriptive_words: 25,
            highlight_terms: true,
            enable_grouping: true,
            max_results_per_group: 5,
            field_order: SearchField::DEFAULT_ORDER.to_vec(),
            stop_words: STOP_WORDS.iter().map(|w| (*w).to_string()).collect(),
            replace_words: Vec::new(),
            stem_words: Vec::new(),
            category_groups: Vec::new(),
            category_order: CATEGORY_ORDER.iter().map(|c| (*c).to_string()).collect(),
            category_page: "page_LanguageEntities.html".to_string(),
            categories: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = toml::from_str(&content).map_err(|source| LoadError::ParseSettings {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            "Loaded settings from {} ({} categories configured)",
            path.display(),
            settings.categories.len()
        );
        Ok(settings)
    }

    /// Page size, or `None` when paging is disabled.
    pub fn page_size(&self) -> Option<usize> {
        usize::try_from(self.num_elements_per_page)
            .ok()
            .filter(|size| *size > 0)
    }

    /// Display metadata for a category, falling back to [`CategoryInfo::unknown`].
    pub fn category_info(&self, category: &str) -> Cow<'_, CategoryInfo> {
        self.categories
            .get(category)
            .map_or_else(|| Cow::Owned(CategoryInfo::unknown()), Cow::Borrowed)
    }

    /// Sort key of a category; unlisted categories sort after all listed ones.
    pub fn category_priority(&self, category: &str) -> usize {
        self.category_order
            .iter()
            .position(|c| c == category)
            .unwrap_or(usize::MAX)
    }
}
