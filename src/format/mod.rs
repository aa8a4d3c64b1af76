//! Layout and rendering of search outcomes.

mod builders;
pub mod layout;
pub(crate) mod renderers;

use crate::config::Settings;
use crate::search::SearchOutcome;
use serde::{Deserialize, Serialize};
use std::fmt;

// Re-exports
pub use builders::{excerpt, group_digits, result_count, truncate_location};
pub use layout::{PageLayout, PageLink, Pager, PagerItem, ResultGroup, layout_page, paginate};

/// Output format of rendered results.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// HTML fragment for the search page
    Html,
    /// Plain text for terminals
    #[default]
    Text,
}

/// Render a search outcome with the render window starting at `start`.
///
/// `replace` is carried into pagination links so that paging keeps the
/// replacement mode of the current search.
pub fn render(
    outcome: &SearchOutcome,
    start: usize,
    replace: bool,
    settings: &Settings,
    format: OutputFormat,
) -> Result<String, fmt::Error> {
    let mut output = String::new();
    match format {
        OutputFormat::Html => renderers::render_html(&mut output, outcome, start, replace, settings)?,
        OutputFormat::Text => renderers::render_text(&mut output, outcome, start, replace, settings)?,
    }
    Ok(output)
}
