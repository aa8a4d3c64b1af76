//! Shared test fixtures for integration tests.
//!
//! # Available Fixtures
//!
//! - `sample_entries`: A small documentation index covering several categories
//! - `sample_settings`: Settings with replacements, stems and category groups
//! - `engine`: A [`QueryEngine`] over both
//!
//! [`TempDocs`] writes index and settings files to a temporary directory for
//! tests of the loaders.

#![allow(dead_code)] // Each integration test crate uses a different subset

use dox_search::config::Settings;
use dox_search::search::{EntryIndex, QueryEngine, SearchOutcome, SearchRequest};
use dox_search::types::{CategoryInfo, DocumentEntry};
use rstest::fixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding test data files.
pub struct TempDocs {
    temp: TempDir,
}

impl TempDocs {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write a file relative to the temp directory and return its full path.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.temp.path().join(relative);
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }
}

pub fn entry(title: &str, category: &str) -> DocumentEntry {
    DocumentEntry {
        title: title.to_string(),
        category: category.to_string(),
        location: format!("{}_{}.html", category, title.replace(['<', '>', ' '], "")),
        ..DocumentEntry::default()
    }
}

#[fixture]
pub fn sample_entries() -> Vec<DocumentEntry> {
    vec![
        DocumentEntry {
            text: "The string class stores sequences of characters.".to_string(),
            akas: "Str,CharString".to_string(),
            ..entry("String", "class")
        },
        DocumentEntry {
            text: "A container for many strings.".to_string(),
            subentries: "function assignValue,function length,typedef TString".to_string(),
            ..entry("StringSet", "class")
        },
        DocumentEntry {
            text: "Converts a value into a string.".to_string(),
            ..entry("toString", "global_function")
        },
        DocumentEntry {
            text: "Aligns two sequences.".to_string(),
            akas: "alignment".to_string(),
            ..entry("globalAlignment", "global_function")
        },
        DocumentEntry {
            text: "Stores an alignment of sequences.".to_string(),
            subentries: "function row,function cols".to_string(),
            ..entry("Align", "class")
        },
        DocumentEntry {
            text: "How to write your first program with strings.".to_string(),
            ..entry("Tutorial Strings", "page")
        },
        DocumentEntry {
            text: "Iterator over the characters of a string.".to_string(),
            ..entry("StringIterator", "typedef")
        },
    ]
}

#[fixture]
pub fn sample_settings() -> Settings {
    let mut settings = Settings {
        replace_words: vec![("str".to_string(), "string".to_string())],
        stem_words: vec![("align".to_string(), "alignment".to_string())],
        category_groups: vec![("global_function".to_string(), "function".to_string())],
        ..Settings::default()
    };
    settings.categories.insert(
        "class".to_string(),
        CategoryInfo {
            name: "Class".to_string(),
            glyph: "C".to_string(),
            color: "#0000FF".to_string(),
            description: "A class".to_string(),
        },
    );
    settings.categories.insert(
        "function".to_string(),
        CategoryInfo {
            name: "Function".to_string(),
            glyph: "fn".to_string(),
            color: "#008000".to_string(),
            description: "A function".to_string(),
        },
    );
    settings
}

#[fixture]
pub fn engine(sample_entries: Vec<DocumentEntry>, sample_settings: Settings) -> QueryEngine {
    QueryEngine::new(EntryIndex::new(sample_entries), sample_settings)
}

/// Run a search with every configured category enabled.
pub fn search_all(engine: &mut QueryEngine, query: &str) -> SearchOutcome {
    let categories = engine.settings().category_order.clone();
    engine.search(&SearchRequest {
        query,
        categories: &categories,
        apply_replacements: true,
    })
}
