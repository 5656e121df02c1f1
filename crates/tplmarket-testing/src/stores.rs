//! Fake stores for exercising reconciliation and failure paths.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tplmarket_store::{Error, ObjectStorage, RemoteStore, Result, UserRecord};
use tplmarket_types::Template;

#[derive(Default)]
struct MemoryInner {
    templates: Vec<Template>,
    users: HashMap<String, UserRecord>,
}

/// In-memory `RemoteStore`.
///
/// `set_fail_writes(true)` makes every mutating call return a query error
/// while reads keep working, which is how tests simulate the
/// network-failure-during-toggle scenario.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    write_count: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_templates(templates: Vec<Template>) -> Self {
        let store = Self::new();
        store.inner.lock().unwrap().templates = templates;
        store
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of successful mutating calls so far.
    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }

    pub fn put_user(&self, user: UserRecord) {
        self.inner
            .lock()
            .unwrap()
            .users
            .insert(user.id.clone(), user);
    }

    fn check_write(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Query("simulated network failure".to_string()));
        }
        self.write_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn check_read(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Query("simulated network failure".to_string()));
        }
        Ok(())
    }
}

impl RemoteStore for MemoryStore {
    fn list_templates(&self) -> Result<Vec<Template>> {
        self.check_read()?;
        Ok(self.inner.lock().unwrap().templates.clone())
    }

    fn get_template(&self, id: &str) -> Result<Option<Template>> {
        self.check_read()?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .templates
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    fn insert_templates(&self, templates: &[Template]) -> Result<usize> {
        self.check_write()?;
        let mut inner = self.inner.lock().unwrap();
        for template in templates {
            inner.templates.retain(|t| t.id != template.id);
            inner.templates.push(template.clone());
        }
        Ok(templates.len())
    }

    fn delete_all_templates(&self) -> Result<usize> {
        self.check_write()?;
        let mut inner = self.inner.lock().unwrap();
        let deleted = inner.templates.len();
        inner.templates.clear();
        Ok(deleted)
    }

    fn set_template_saved_count(&self, id: &str, saved_count: u32) -> Result<()> {
        self.check_write()?;
        let mut inner = self.inner.lock().unwrap();
        if let Some(template) = inner.templates.iter_mut().find(|t| t.id == id) {
            template.saved_count = saved_count;
        }
        Ok(())
    }

    fn get_user(&self, id: &str) -> Result<Option<UserRecord>> {
        self.check_read()?;
        Ok(self.inner.lock().unwrap().users.get(id).cloned())
    }

    fn upsert_user(&self, user: &UserRecord) -> Result<()> {
        self.check_write()?;
        self.inner
            .lock()
            .unwrap()
            .users
            .insert(user.id.clone(), user.clone());
        Ok(())
    }
}

/// Object storage that resolves to a fixed test CDN prefix.
///
/// File names listed via `fail_for` refuse to resolve, standing in for
/// individual broken image records.
#[derive(Default)]
pub struct StubStorage {
    failing: Mutex<Vec<String>>,
}

impl StubStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(&self, file_name: impl Into<String>) {
        self.failing.lock().unwrap().push(file_name.into());
    }
}

impl ObjectStorage for StubStorage {
    fn resolve_public_url(&self, bucket: &str, file_name: &str) -> Result<String> {
        if file_name.is_empty() || self.failing.lock().unwrap().iter().any(|f| f == file_name) {
            return Err(Error::Query(format!("cannot resolve: {}", file_name)));
        }
        Ok(format!("https://cdn.test/{}/{}", bucket, file_name))
    }

    fn upload(&self, _bucket: &str, _file_name: &str, _bytes: &[u8]) -> Result<()> {
        Ok(())
    }
}
