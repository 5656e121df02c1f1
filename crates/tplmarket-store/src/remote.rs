use serde::{Deserialize, Serialize};

use tplmarket_types::{SavedSet, Template};

use crate::Result;

/// A user row: id plus the saved-template id array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub saved_templates: SavedSet,
}

impl UserRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            saved_templates: SavedSet::new(),
        }
    }
}

/// Row-level access to the two remote collections: templates and users.
///
/// Last write wins at the store; no call here participates in a transaction
/// spanning both collections. Implementations must tolerate concurrent
/// callers (the sync worker runs on its own thread).
pub trait RemoteStore: Send + Sync {
    fn list_templates(&self) -> Result<Vec<Template>>;

    fn get_template(&self, id: &str) -> Result<Option<Template>>;

    /// Inserts rows, returning how many were written.
    fn insert_templates(&self, templates: &[Template]) -> Result<usize>;

    /// Removes every template row, returning how many were deleted.
    fn delete_all_templates(&self) -> Result<usize>;

    /// Overwrites one template's saved_count. Missing id is a no-op.
    fn set_template_saved_count(&self, id: &str, saved_count: u32) -> Result<()>;

    fn get_user(&self, id: &str) -> Result<Option<UserRecord>>;

    fn upsert_user(&self, user: &UserRecord) -> Result<()>;
}
