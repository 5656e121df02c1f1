pub mod saved_list;
pub mod saved_toggle;
pub mod seed;
pub mod templates_list;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

use tplmarket_runtime::{
    Config, Session, SessionHub, TemplateListController, TemplateRepository,
};
use tplmarket_store::{LocalCache, ObjectStorage, RemoteStore};

/// Soft warning on stderr, colored only when attached to a terminal.
pub(crate) fn warn(message: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("{} {}", "warning:".yellow().bold(), message);
    } else {
        eprintln!("warning: {}", message);
    }
}

/// Builds a list controller wired to the given store and user session.
pub(crate) fn controller(
    store: Arc<dyn RemoteStore>,
    storage: Arc<dyn ObjectStorage>,
    config: &Config,
    data_dir: &Path,
    user: Option<&str>,
) -> Result<TemplateListController> {
    let hub = match user {
        Some(user_id) => SessionHub::with_session(Session::new(user_id)),
        None => SessionHub::new(),
    };

    let repository = TemplateRepository::new(store.clone(), storage, &config.storage);
    let cache = LocalCache::open(crate::commands::cache_path(data_dir));

    Ok(TemplateListController::new(
        repository,
        store,
        cache,
        Arc::new(hub),
    ))
}

pub(crate) fn drain_warnings(controller: &mut TemplateListController) {
    for message in controller.take_warnings() {
        warn(&message);
    }
}
