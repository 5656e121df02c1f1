use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use tplmarket_runtime::{Config, resolve_data_path};
use tplmarket_store::{DirBucket, ObjectStorage, PublicBucket, SqliteStore};

use super::args::{Cli, Commands, SavedCommand, TemplatesCommand};
use super::handlers;

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_path(cli.data_dir.as_deref())?;
    std::fs::create_dir_all(&data_dir)?;

    let config = Config::load_from(&data_dir.join("config.toml"))?;
    let store = Arc::new(SqliteStore::open(&data_dir.join("tplmarket.db"))?);

    match cli.command {
        Commands::Seed => handlers::seed::handle(store.as_ref()),

        Commands::Templates { command } => match command {
            TemplatesCommand::List {
                user,
                industry,
                format,
                language,
                sort,
                pages,
            } => handlers::templates_list::handle(
                store.clone(),
                object_storage(&config, &data_dir),
                &config,
                &data_dir,
                user,
                industry,
                format,
                language,
                sort,
                pages,
            ),
        },

        Commands::Saved { command } => match command {
            SavedCommand::List { user } => handlers::saved_list::handle(
                store.clone(),
                object_storage(&config, &data_dir),
                &config,
                &data_dir,
                user,
            ),
            SavedCommand::Toggle { user, template_id } => handlers::saved_toggle::handle(
                store.clone(),
                object_storage(&config, &data_dir),
                &config,
                &data_dir,
                user,
                template_id,
            ),
        },
    }
}

/// Hosted bucket when a base URL is configured, local directory otherwise.
fn object_storage(config: &Config, data_dir: &Path) -> Arc<dyn ObjectStorage> {
    if config.storage.base_url.is_empty() {
        Arc::new(DirBucket::new(data_dir.join("objects")))
    } else {
        Arc::new(PublicBucket::new(config.storage.base_url.clone()))
    }
}

/// The local cache file lives next to the database.
pub(crate) fn cache_path(data_dir: &Path) -> PathBuf {
    data_dir.join("cache.json")
}
