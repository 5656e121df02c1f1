use std::path::PathBuf;

use crate::{Error, Result};

/// Object-storage capability: public URL resolution plus upload.
pub trait ObjectStorage: Send + Sync {
    /// Resolves a bucket-relative file name to a displayable URL.
    fn resolve_public_url(&self, bucket: &str, file_name: &str) -> Result<String>;

    fn upload(&self, bucket: &str, file_name: &str, bytes: &[u8]) -> Result<()>;
}

/// URL composer for a hosted storage service with public buckets.
///
/// Produces `{base}/storage/v1/object/public/{bucket}/{file}`, the path
/// shape the catalog's image references were originally resolved against.
/// Read-only: uploads go through service credentials this layer does not hold.
#[derive(Debug, Clone)]
pub struct PublicBucket {
    base_url: String,
}

impl PublicBucket {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }
}

impl ObjectStorage for PublicBucket {
    fn resolve_public_url(&self, bucket: &str, file_name: &str) -> Result<String> {
        if file_name.is_empty() {
            return Err(Error::Query("empty object file name".to_string()));
        }
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            bucket,
            file_name.replace(' ', "%20")
        ))
    }

    fn upload(&self, _bucket: &str, _file_name: &str, _bytes: &[u8]) -> Result<()> {
        Err(Error::Query(
            "public bucket resolver cannot upload".to_string(),
        ))
    }
}

/// Directory-backed object storage for local setups and tests.
#[derive(Debug, Clone)]
pub struct DirBucket {
    root: PathBuf,
}

impl DirBucket {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ObjectStorage for DirBucket {
    fn resolve_public_url(&self, bucket: &str, file_name: &str) -> Result<String> {
        if file_name.is_empty() {
            return Err(Error::Query("empty object file name".to_string()));
        }
        let path = self.root.join(bucket).join(file_name);
        if !path.exists() {
            return Err(Error::Query(format!(
                "object not found: {}",
                path.display()
            )));
        }
        Ok(format!("file://{}", path.display()))
    }

    fn upload(&self, bucket: &str, file_name: &str, bytes: &[u8]) -> Result<()> {
        let dir = self.root.join(bucket);
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join(file_name), bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn public_bucket_composes_and_encodes() {
        let storage = PublicBucket::new("https://example.supabase.co/");
        let url = storage
            .resolve_public_url("templates", "MUSHI Fashion - 100 (EN).png")
            .unwrap();
        assert_eq!(
            url,
            "https://example.supabase.co/storage/v1/object/public/templates/MUSHI%20Fashion%20-%20100%20(EN).png"
        );
    }

    #[test]
    fn public_bucket_rejects_empty_name() {
        let storage = PublicBucket::new("https://example.supabase.co");
        assert!(storage.resolve_public_url("templates", "").is_err());
    }

    #[test]
    fn dir_bucket_round_trips_uploads() {
        let dir = TempDir::new().unwrap();
        let storage = DirBucket::new(dir.path());

        storage.upload("templates", "a.png", b"bytes").unwrap();
        let url = storage.resolve_public_url("templates", "a.png").unwrap();
        assert!(url.starts_with("file://"));
        assert!(url.ends_with("a.png"));

        assert!(storage.resolve_public_url("templates", "missing.png").is_err());
    }
}
