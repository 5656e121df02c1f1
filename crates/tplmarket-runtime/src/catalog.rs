use std::sync::Arc;

use tplmarket_store::{ObjectStorage, RemoteStore, UserRecord};
use tplmarket_types::{SavedSet, Template};

use crate::config::StorageConfig;
use crate::{Error, Result};

/// Loads the catalog and normalizes image references to displayable URLs.
pub struct TemplateRepository {
    store: Arc<dyn RemoteStore>,
    storage: Arc<dyn ObjectStorage>,
    bucket: String,
    placeholder_url: String,
}

impl TemplateRepository {
    pub fn new(
        store: Arc<dyn RemoteStore>,
        storage: Arc<dyn ObjectStorage>,
        config: &StorageConfig,
    ) -> Self {
        Self {
            store,
            storage,
            bucket: config.bucket.clone(),
            placeholder_url: config.placeholder_url.clone(),
        }
    }

    /// The full catalog, every row left with a displayable image URL.
    ///
    /// One unresolvable image must not fail the load: resolution errors fall
    /// back to the placeholder per row. Only the catalog read itself can fail.
    pub fn load(&self) -> Result<Vec<Template>> {
        let mut templates = self
            .store
            .list_templates()
            .map_err(|e| Error::Fetch(e.to_string()))?;

        for template in &mut templates {
            template.image_url = Some(self.display_url(template.image_url.as_deref()));
        }

        Ok(templates)
    }

    /// The user's remote saved set, creating the user row on first contact.
    pub fn remote_saved_set(&self, user_id: &str) -> Result<SavedSet> {
        let existing = self
            .store
            .get_user(user_id)
            .map_err(|e| Error::Fetch(e.to_string()))?;

        match existing {
            Some(user) => Ok(user.saved_templates),
            None => {
                self.store
                    .upsert_user(&UserRecord::new(user_id))
                    .map_err(|e| Error::Fetch(e.to_string()))?;
                Ok(SavedSet::new())
            }
        }
    }

    fn display_url(&self, raw: Option<&str>) -> String {
        let Some(raw) = raw else {
            return self.placeholder_url.clone();
        };

        // Already absolute: pass through untouched.
        if raw.starts_with("http") {
            return raw.to_string();
        }

        let prefix = format!("{}/", self.bucket);
        let file_name = raw.strip_prefix(prefix.as_str()).unwrap_or(raw);
        let file_name = file_name.split('?').next().unwrap_or(file_name);
        let file_name = file_name.trim().trim_matches('/');

        self.storage
            .resolve_public_url(&self.bucket, file_name)
            .unwrap_or_else(|_| self.placeholder_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tplmarket_testing::fixtures;
    use tplmarket_testing::{MemoryStore, StubStorage};

    fn repository(store: Arc<MemoryStore>, storage: Arc<StubStorage>) -> TemplateRepository {
        TemplateRepository::new(store, storage, &StorageConfig::default())
    }

    #[test]
    fn raw_references_resolve_through_storage() {
        let mut t = fixtures::template("t1");
        t.image_url = Some("templates/MUSHI Fashion.png?token=abc".to_string());
        let store = Arc::new(MemoryStore::with_templates(vec![t]));

        let repo = repository(store, Arc::new(StubStorage::new()));
        let loaded = repo.load().unwrap();

        assert_eq!(
            loaded[0].image_url.as_deref(),
            Some("https://cdn.test/templates/MUSHI Fashion.png")
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        let mut t = fixtures::template("t1");
        t.image_url = Some("https://elsewhere.example/img.png".to_string());
        let store = Arc::new(MemoryStore::with_templates(vec![t]));

        let repo = repository(store, Arc::new(StubStorage::new()));
        let loaded = repo.load().unwrap();

        assert_eq!(
            loaded[0].image_url.as_deref(),
            Some("https://elsewhere.example/img.png")
        );
    }

    #[test]
    fn missing_or_failing_images_fall_back_to_placeholder() {
        let mut absent = fixtures::template("t1");
        absent.image_url = None;
        let mut broken = fixtures::template("t2");
        broken.image_url = Some("broken.png".to_string());
        let mut fine = fixtures::template("t3");
        fine.image_url = Some("fine.png".to_string());

        let store = Arc::new(MemoryStore::with_templates(vec![absent, broken, fine]));
        let storage = Arc::new(StubStorage::new());
        storage.fail_for("broken.png");

        let repo = repository(store, storage);
        let loaded = repo.load().unwrap();

        // One bad record never fails the whole load
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].image_url.as_deref(), Some("/mushi-logo.png"));
        assert_eq!(loaded[1].image_url.as_deref(), Some("/mushi-logo.png"));
        assert_eq!(
            loaded[2].image_url.as_deref(),
            Some("https://cdn.test/templates/fine.png")
        );
    }

    #[test]
    fn catalog_read_failure_is_a_fetch_error() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail_reads(true);

        let repo = repository(store, Arc::new(StubStorage::new()));
        match repo.load() {
            Err(Error::Fetch(_)) => {}
            other => panic!("expected fetch error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn missing_user_row_is_created_with_an_empty_set() {
        let store = Arc::new(MemoryStore::new());
        let repo = repository(store.clone(), Arc::new(StubStorage::new()));

        let set = repo.remote_saved_set("u1").unwrap();
        assert!(set.is_empty());
        assert!(store.get_user("u1").unwrap().is_some());
    }
}
