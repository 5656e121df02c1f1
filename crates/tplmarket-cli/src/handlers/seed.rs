use anyhow::Result;

use tplmarket_store::RemoteStore;

pub fn handle(store: &dyn RemoteStore) -> Result<()> {
    let outcome = tplmarket_runtime::seed(store)?;
    println!(
        "Seeded {} templates ({} removed)",
        outcome.inserted, outcome.deleted
    );
    Ok(())
}
