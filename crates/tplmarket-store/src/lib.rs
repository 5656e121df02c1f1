// Persistence layer.
// The local cache is authoritative immediately after any local mutation;
// the remote store is best-effort and reconciled asynchronously.

mod error;
mod local;
mod object;
mod remote;
mod sqlite;

// Public API
pub use error::{Error, Result};
pub use local::{LocalCache, SAVED_TEMPLATES_KEY};
pub use object::{DirBucket, ObjectStorage, PublicBucket};
pub use remote::{RemoteStore, UserRecord};
pub use sqlite::SqliteStore;
