//! Records shared between the search engine, the renderers and the settings.

use serde::{Deserialize, Serialize};

/// One indexed documentation unit (class, function, page, ...).
///
/// Entries are produced by the documentation generator and never mutated after
/// loading. The generator writes `langEntity` and `loc`; both spellings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    /// Primary display name
    pub title: String,
    /// Descriptive body, space-tokenized for excerpts
    #[serde(default)]
    pub text: String,
    /// Comma-separated alternate names
    #[serde(default)]
    pub akas: String,
    /// Comma-separated `"<category> <label>"` pairs
    #[serde(default)]
    pub subentries: String,
    /// Category key, e.g. `class` or `global_function`
    #[serde(alias = "langEntity")]
    pub category: String,
    /// Link target of the result
    #[serde(alias = "loc")]
    pub location: String,
    /// Free-form tags used by the `[title, text, tags]` field profile
    #[serde(default)]
    pub tags: String,
}

impl DocumentEntry {
    /// Returns the content of one searchable field.
    pub fn field(&self, field: SearchField) -> &str {
        match field {
            SearchField::Title => &self.title,
            SearchField::Text => &self.text,
            SearchField::Akas => &self.akas,
            SearchField::Subentries => &self.subentries,
            SearchField::Tags => &self.tags,
        }
    }

    /// Iterates the non-empty alternate names.
    pub fn aka_list(&self) -> impl Iterator<Item = &str> {
        self.akas.split(',').filter(|aka| !aka.is_empty())
    }

    /// Iterates the non-empty raw subentry strings.
    pub fn subentry_list(&self) -> impl Iterator<Item = &str> {
        self.subentries.split(',').filter(|sub| !sub.is_empty())
    }
}

/// A searchable field of a [`DocumentEntry`].
///
/// The scoring order of fields is configurable; earlier fields weigh more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Title,
    Text,
    Akas,
    Subentries,
    Tags,
}

impl SearchField {
    /// The default profile: title, body, alternate names, subentries.
    pub const DEFAULT_ORDER: [Self; 4] = [Self::Title, Self::Text, Self::Akas, Self::Subentries];
}

/// Display metadata for a category. Only used for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    /// Short symbol shown next to results
    pub glyph: String,
    pub color: String,
    #[serde(default)]
    pub description: String,
}

impl CategoryInfo {
    /// Metadata for categories missing from the configuration.
    pub fn unknown() -> Self {
        Self {
            name: "UNKNOWN".to_string(),
            glyph: "UNKNOWN".to_string(),
            color: "#FF0000".to_string(),
            description: "Unknown language entity".to_string(),
        }
    }
}
