//! Search view: ties the query form to the engine and the rendered output.

use crate::{
    error::Result,
    format::{OutputFormat, PageLink, layout_page, render},
    search::{QueryEngine, SearchOutcome, SearchRequest, query_from_url},
};
use std::fmt;

/// Invoked after every redraw with the form state and the new output.
pub type RenderCallback = Box<dyn FnMut(&SearchForm, &str)>;

/// The query field and the enabled category checkboxes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub query: String,
    pub categories: Vec<String>,
}

/// Owns the engine, the form and the last rendered output.
///
/// A search whose terms, categories and render window all equal the previous
/// search leaves the output untouched and skips the callback.
pub struct SearchView {
    engine: QueryEngine,
    form: SearchForm,
    format: OutputFormat,
    output: String,
    callback: Option<RenderCallback>,
    /// Render window `(start, replace)` of the current output
    window: Option<(usize, bool)>,
    first_location: Option<String>,
}

impl fmt::Debug for SearchView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchView")
            .field("form", &self.form)
            .field("format", &self.format)
            .field("window", &self.window)
            .field("has_callback", &self.callback.is_some())
            .finish_non_exhaustive()
    }
}

impl SearchView {
    /// Create a view with every configured category enabled.
    pub fn new(engine: QueryEngine, format: OutputFormat) -> Self {
        let categories = engine.settings().category_order.clone();
        Self {
            engine,
            form: SearchForm {
                query: String::new(),
                categories,
            },
            format,
            output: String::new(),
            callback: None,
            window: None,
            first_location: None,
        }
    }

    pub fn with_callback(mut self, callback: impl FnMut(&SearchForm, &str) + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.form.query = query.into();
    }

    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.form.categories = categories;
    }

    /// The current rendered output.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Location of the first result in the current window.
    pub fn first_result_location(&self) -> Option<&str> {
        self.first_location.as_deref()
    }

    /// Search the form state and redraw the window starting at `start`.
    ///
    /// Returns whether the output was redrawn.
    pub fn search(&mut self, start: usize, apply_replacements: bool) -> Result<bool> {
        let outcome = self.engine.search(&SearchRequest {
            query: &self.form.query,
            categories: &self.form.categories,
            apply_replacements,
        });

        let window = (start, apply_replacements);
        if outcome.is_reused() && self.window == Some(window) {
            tracing::debug!("Skipping redraw of unchanged search '{}'", self.form.query);
            return Ok(false);
        }

        let settings = self.engine.settings();
        self.output = render(&outcome, start, apply_replacements, settings, self.format)?;
        (self.window, self.first_location) = match &outcome {
            SearchOutcome::Found(results) => (
                Some(window),
                layout_page(&results.matches, start, apply_replacements, settings)
                    .first()
                    .map(|result| result.location.clone()),
            ),
            SearchOutcome::NoMatch { .. } => (Some(window), None),
            SearchOutcome::StopWordsOnly | SearchOutcome::TooShort { .. } => (None, None),
        };

        if let Some(callback) = self.callback.as_mut() {
            callback(&self.form, &self.output);
        }
        Ok(true)
    }

    /// Follow a pagination link given by its class token, e.g. `"14_true"`.
    pub fn follow_link(&mut self, token: &str) -> Result<bool> {
        let link: PageLink = token.parse()?;
        self.search(link.start, link.replace)
    }

    /// Rerun the current query with replacements disabled.
    pub fn search_without_replacements(&mut self) -> Result<bool> {
        self.search(0, false)
    }

    /// Fill the query from the `q` parameter of a page URL and search it.
    ///
    /// Returns `false` without searching when the URL carries no query.
    pub fn seed_from_url(&mut self, url: &str) -> Result<bool> {
        match query_from_url(url) {
            Some(query) => {
                self.set_query(query);
                self.search(0, true)
            }
            None => Ok(false),
        }
    }
}
