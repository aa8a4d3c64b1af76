use anyhow::Context as _;
use clap::Parser;
use dox_search::cli::{Cli, Commands};
use dox_search::config::{Settings, expand_tilde};
use dox_search::search::{EntryIndex, QueryEngine};
use dox_search::tools::SearchView;
use std::path::{Path, PathBuf};

fn resolve(path: &Path) -> PathBuf {
    PathBuf::from(expand_tilde(&path.to_string_lossy()).into_owned())
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    match path {
        Some(path) => {
            let path = resolve(path);
            Settings::load(&path).with_context(|| format!("Failed to load settings from {}", path.display()))
        }
        None => Ok(Settings::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dox_search::tracing::init(cli.verbose);

    match cli.command {
        Commands::Search {
            query,
            data,
            config,
            categories,
            start,
            no_replace,
            format,
            url,
        } => {
            let settings = load_settings(config.as_deref())?;
            let data = resolve(&data);
            let index = EntryIndex::load(&data)
                .with_context(|| format!("Failed to load entries from {}", data.display()))?;

            let mut view = SearchView::new(QueryEngine::new(index, settings), format);
            if !categories.is_empty() {
                view.set_categories(categories);
            }

            match url {
                Some(url) => {
                    if !view.seed_from_url(&url)? {
                        anyhow::bail!("No 'q' parameter in {}", url);
                    }
                    if start > 0 || no_replace {
                        view.search(start, !no_replace)?;
                    }
                }
                None => {
                    view.set_query(query.join(" "));
                    view.search(start, !no_replace)?;
                }
            }

            print!("{}", view.output());
        }
        Commands::Categories { config } => {
            let settings = load_settings(config.as_deref())?;
            for category in &settings.category_order {
                let info = settings.category_info(category);
                println!("{:<20} [{}] {}", category, info.glyph, info.name);
            }
        }
    }

    Ok(())
}
