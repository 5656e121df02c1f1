//! Catalog fixtures for engine and runtime tests.

use chrono::{Duration, TimeZone, Utc};
use tplmarket_types::{Template, TemplateFormat};

/// A single template with sensible defaults; tweak fields after the call.
pub fn template(id: &str) -> Template {
    Template {
        id: id.to_string(),
        title: format!("Fashion - {} (EN)", id),
        canva_url: "https://www.canva.com/design/sample/view".to_string(),
        category: "FASHION".to_string(),
        format: TemplateFormat::Feed,
        image_url: Some(format!("{}.png", id)),
        language: "EN".to_string(),
        popularity: 50,
        saved_count: 0,
        created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
    }
}

/// A catalog of `n` templates with varied fields.
///
/// Ids are `t1..tn`. Categories cycle through the industry vocabulary,
/// formats alternate, languages alternate EN/LT, `created_at` ascends one
/// hour per row, and `saved_count` cycles 5, 3, 5, 1 so popularity sorts
/// have ties to exercise.
pub fn catalog(n: usize) -> Vec<Template> {
    let base = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let counts = [5u32, 3, 5, 1];

    (0..n)
        .map(|i| {
            let mut t = template(&format!("t{}", i + 1));
            t.category = tplmarket_types::INDUSTRIES[i % tplmarket_types::INDUSTRIES.len()]
                .to_string();
            t.format = if i % 2 == 0 {
                TemplateFormat::Feed
            } else {
                TemplateFormat::Story
            };
            t.language = tplmarket_types::LANGUAGES[i % 2].to_string();
            t.created_at = base + Duration::hours(i as i64);
            t.saved_count = counts[i % counts.len()];
            t
        })
        .collect()
}
