//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for dox-search operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods in the CLI layer.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when loading the search data or the settings file fails.
///
/// Empty searches are not errors: stop-word-only, too-short and no-match queries
/// are reported through [`crate::search::SearchOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The search data is not a JSON array of entries.
    #[error("Failed to parse search data in {}: {source}", path.display())]
    ParseEntries {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The settings file is not valid TOML for [`crate::config::Settings`].
    #[error("Failed to parse settings in {}: {source}", path.display())]
    ParseSettings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
