use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use tplmarket_runtime::{Config, InitOutcome};
use tplmarket_store::{ObjectStorage, RemoteStore};
use tplmarket_types::SortKey;

use super::{controller, drain_warnings};

pub fn handle(
    store: Arc<dyn RemoteStore>,
    storage: Arc<dyn ObjectStorage>,
    config: &Config,
    data_dir: &Path,
    user: String,
) -> Result<()> {
    let mut controller = controller(store, storage, config, data_dir, Some(&user))?;

    if controller.init()? == InitOutcome::Redirect {
        println!("Not signed in. Pass --user <id> to list saved templates.");
        return Ok(());
    }

    controller.set_sort(SortKey::Saved);
    while controller.has_more() {
        controller.load_more();
    }

    let saved = controller.visible();
    if saved.is_empty() {
        println!("No saved templates");
    } else {
        for template in &saved {
            println!(
                "{}  {}  [{}/{}/{}]  saves {}",
                template.id,
                template.title,
                template.category,
                template.format,
                template.language,
                template.saved_count,
            );
        }
        println!("{} saved", saved.len());
    }

    drain_warnings(&mut controller);
    controller.shutdown();
    Ok(())
}
