use crate::format::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dox-search")]
#[command(about = "Search a generated documentation index", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the index and print one page of results
    Search {
        /// Query words; joined with spaces
        query: Vec<String>,
        /// Entry index, JSON or a JavaScript file assigning a JSON array
        #[arg(short, long, default_value = "search.data.js")]
        data: PathBuf,
        /// Settings file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Enabled category; repeatable. Defaults to every configured category
        #[arg(short = 'k', long = "category")]
        categories: Vec<String>,
        /// Index of the first result to show
        #[arg(long, default_value = "0")]
        start: usize,
        /// Search the words as typed, without replacements
        #[arg(long)]
        no_replace: bool,
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
        /// Take the query from the `q` parameter of a page URL
        #[arg(long, conflicts_with = "query")]
        url: Option<String>,
    },
    /// List the configured categories in priority order
    Categories {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
