pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod search;
pub mod tools;
pub mod tracing;
pub mod types;

pub use config::Settings;
pub use format::OutputFormat;
pub use search::{EntryIndex, QueryEngine, SearchOutcome, SearchRequest};
pub use tools::SearchView;
pub use types::{CategoryInfo, DocumentEntry, SearchField};
