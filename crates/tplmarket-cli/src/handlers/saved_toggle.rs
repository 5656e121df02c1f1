use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use tplmarket_runtime::{Config, InitOutcome, ToggleOutcome};
use tplmarket_store::{ObjectStorage, RemoteStore};

use super::{controller, drain_warnings, warn};

const SYNC_WAIT: Duration = Duration::from_secs(2);

pub fn handle(
    store: Arc<dyn RemoteStore>,
    storage: Arc<dyn ObjectStorage>,
    config: &Config,
    data_dir: &Path,
    user: String,
    template_id: String,
) -> Result<()> {
    let mut controller = controller(store, storage, config, data_dir, Some(&user))?;

    if controller.init()? == InitOutcome::Redirect {
        println!("Not signed in. Pass --user <id> to toggle saved templates.");
        return Ok(());
    }

    match controller.toggle(&template_id) {
        ToggleOutcome::Redirect => {
            println!("Session expired. Sign in again to toggle saved templates.");
        }
        ToggleOutcome::Toggled(toggle) => {
            let count = controller
                .derived()
                .iter()
                .find(|t| t.id == template_id)
                .map(|t| t.saved_count);
            match (toggle.saved, count) {
                (true, Some(count)) => println!("Saved {} ({} saves)", template_id, count),
                (false, Some(count)) => println!("Removed {} ({} saves)", template_id, count),
                (true, None) => println!("Saved {}", template_id),
                (false, None) => println!("Removed {}", template_id),
            }
            if controller.await_sync(SYNC_WAIT).is_none() {
                warn("remote sync did not complete; local state kept");
            }
        }
    }

    drain_warnings(&mut controller);
    controller.shutdown();
    Ok(())
}
