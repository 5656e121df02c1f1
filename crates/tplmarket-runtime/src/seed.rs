use chrono::{DateTime, Utc};
use uuid::Uuid;

use tplmarket_store::RemoteStore;
use tplmarket_types::{Template, TemplateFormat};

use crate::Result;

/// The built-in bootstrap fixture set. Ids are freshly generated so seeding
/// into a shared store never collides with an earlier run.
pub fn sample_templates(now: DateTime<Utc>) -> Vec<Template> {
    let template = |title: &str, canva_url: &str, format, image_url: &str, language: &str, popularity| Template {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        canva_url: canva_url.to_string(),
        category: "FASHION".to_string(),
        format,
        image_url: Some(image_url.to_string()),
        language: language.to_string(),
        popularity,
        saved_count: 0,
        created_at: now,
    };

    vec![
        template(
            "Fashion - 100 (EN)",
            "https://www.canva.com/design/DAGi1AW8Lo0/view",
            TemplateFormat::Feed,
            "MUSHI Fashion - 100 (EN).png",
            "EN",
            73,
        ),
        template(
            "Fashion - 101 (EN)",
            "https://www.canva.com/design/sample2/view",
            TemplateFormat::Feed,
            "MUSHI Fashion - 101 (EN).png",
            "EN",
            65,
        ),
        template(
            "Fashion - 102 (ES)",
            "https://www.canva.com/design/sample3/view",
            TemplateFormat::Story,
            "MUSHI Fashion - 102 (ES).png",
            "ES",
            58,
        ),
    ]
}

#[derive(Debug, Clone, Copy)]
pub struct SeedOutcome {
    pub deleted: usize,
    pub inserted: usize,
}

/// One-shot environment bootstrap: wipe the templates collection, insert the
/// fixture set. Not a runtime interface.
pub fn seed(store: &dyn RemoteStore) -> Result<SeedOutcome> {
    let deleted = store.delete_all_templates()?;
    let inserted = store.insert_templates(&sample_templates(Utc::now()))?;
    Ok(SeedOutcome { deleted, inserted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tplmarket_testing::{MemoryStore, fixtures};

    #[test]
    fn seed_replaces_existing_rows() {
        let store = MemoryStore::with_templates(vec![
            fixtures::template("old1"),
            fixtures::template("old2"),
        ]);

        let outcome = seed(&store).unwrap();
        assert_eq!(outcome.deleted, 2);
        assert_eq!(outcome.inserted, 3);

        let listed = store.list_templates().unwrap();
        assert_eq!(listed.len(), 3);
        assert!(listed.iter().all(|t| t.saved_count == 0));
        assert!(!listed.iter().any(|t| t.id == "old1"));
    }

    #[test]
    fn sample_ids_are_unique_per_run() {
        let now = Utc::now();
        let a = sample_templates(now);
        let b = sample_templates(now);
        assert_ne!(a[0].id, b[0].id);
        assert_ne!(a[0].id, a[1].id);
    }
}
