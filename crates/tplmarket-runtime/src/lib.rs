// Runtime module - orchestration around the pure engine.
// Owns configuration, the session hub, catalog loading, the list controller
// and the background sync worker. Nothing here blocks on the remote store
// during a toggle; the local commit is synchronous, the remote phase is not.

mod catalog;
mod config;
mod controller;
mod error;
mod seed;
mod session;
mod sync;

pub use catalog::TemplateRepository;
pub use config::{Config, StorageConfig, resolve_data_path};
pub use controller::{InitOutcome, TemplateListController, ToggleOutcome};
pub use error::{Error, Result};
pub use seed::{SeedOutcome, sample_templates, seed};
pub use session::{Session, SessionEvent, SessionHub};
pub use sync::{SyncEvent, SyncTask, SyncWorker};
