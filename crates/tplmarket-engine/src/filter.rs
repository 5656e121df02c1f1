use tplmarket_types::{FilterSelection, SavedSet, SortKey, Template};

/// Derives the display-ready template list from the catalog.
///
/// Filtering first, then a stable sort by the selected key; templates that
/// compare equal keep their catalog order, which is the only tiebreak.
pub fn apply(
    templates: &[Template],
    selection: &FilterSelection,
    saved: &SavedSet,
) -> Vec<Template> {
    let mut result: Vec<Template> = templates
        .iter()
        .filter(|template| passes(template, selection, saved))
        .cloned()
        .collect();

    match selection.sort {
        SortKey::Newest => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => result.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::Saved => result.sort_by(|a, b| saved_rank(b, saved).cmp(&saved_rank(a, saved))),
        SortKey::Popular => result.sort_by(|a, b| b.saved_count.cmp(&a.saved_count)),
    }

    result
}

fn passes(template: &Template, selection: &FilterSelection, saved: &SavedSet) -> bool {
    let industry_ok = selection.industries.is_empty()
        || selection
            .industries
            .iter()
            .any(|industry| *industry == template.category.to_uppercase());

    let format_ok = selection.formats.is_empty()
        || selection
            .formats
            .iter()
            .any(|format| *format == template.format.to_string());

    let language_ok = selection.languages.is_empty()
        || selection
            .languages
            .iter()
            .any(|language| *language == template.language.to_uppercase());

    let saved_ok = selection.sort != SortKey::Saved || saved.contains(&template.id);

    industry_ok && format_ok && language_ok && saved_ok
}

/// Insertion position in the saved set; unsaved templates rank lowest.
fn saved_rank(template: &Template, saved: &SavedSet) -> i64 {
    saved
        .position(&template.id)
        .map(|pos| pos as i64)
        .unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tplmarket_types::TemplateFormat;

    fn template(id: &str, category: &str, language: &str, format: TemplateFormat) -> Template {
        Template {
            id: id.to_string(),
            title: id.to_string(),
            canva_url: String::new(),
            category: category.to_string(),
            format,
            image_url: None,
            language: language.to_string(),
            popularity: 0,
            saved_count: 0,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn catalog() -> Vec<Template> {
        vec![
            template("t1", "FASHION", "EN", TemplateFormat::Feed),
            template("t2", "Food", "lt", TemplateFormat::Story),
            template("t3", "BEAUTY", "EN", TemplateFormat::Feed),
        ]
    }

    #[test]
    fn empty_selection_passes_everything() {
        let selection = FilterSelection::new();
        let result = apply(&catalog(), &selection, &SavedSet::new());
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn category_match_is_uppercase_normalized() {
        let mut selection = FilterSelection::new();
        selection.toggle_industry("FOOD");

        let result = apply(&catalog(), &selection, &SavedSet::new());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "t2");
    }

    #[test]
    fn language_match_is_uppercase_normalized() {
        let mut selection = FilterSelection::new();
        selection.toggle_language("LT");

        let result = apply(&catalog(), &selection, &SavedSet::new());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "t2");
    }

    #[test]
    fn format_match_is_exact() {
        let mut selection = FilterSelection::new();
        selection.toggle_format("Story");

        let result = apply(&catalog(), &selection, &SavedSet::new());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "t2");
    }

    #[test]
    fn filters_combine_with_and() {
        let mut selection = FilterSelection::new();
        selection.toggle_industry("FASHION");
        selection.toggle_language("LT");

        let result = apply(&catalog(), &selection, &SavedSet::new());
        assert!(result.is_empty());
    }

    #[test]
    fn saved_sort_restricts_to_saved_ids() {
        let mut selection = FilterSelection::new();
        selection.set_sort(SortKey::Saved);
        let saved = SavedSet::from_ids(["t3", "t1"]);

        let result = apply(&catalog(), &selection, &saved);
        let ids: Vec<&str> = result.iter().map(|t| t.id.as_str()).collect();
        // Most recently saved first
        assert_eq!(ids, ["t1", "t3"]);
    }

    #[test]
    fn popular_sort_is_stable_on_ties() {
        let mut templates = catalog();
        templates[0].saved_count = 5;
        templates[1].saved_count = 3;
        templates[2].saved_count = 5;

        let result = apply(&templates, &FilterSelection::new(), &SavedSet::new());
        let ids: Vec<&str> = result.iter().map(|t| t.id.as_str()).collect();
        // t1 and t3 tie at 5; catalog order breaks the tie
        assert_eq!(ids, ["t1", "t3", "t2"]);
    }

    #[test]
    fn newest_and_oldest_are_monotonic() {
        let mut templates = catalog();
        templates[0].created_at = Utc.with_ymd_and_hms(2025, 1, 3, 0, 0, 0).unwrap();
        templates[1].created_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        templates[2].created_at = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();

        let mut selection = FilterSelection::new();
        selection.set_sort(SortKey::Newest);
        let newest = apply(&templates, &selection, &SavedSet::new());
        assert!(newest.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(newest[0].id, "t1");

        selection.set_sort(SortKey::Oldest);
        let oldest = apply(&templates, &selection, &SavedSet::new());
        assert!(oldest.windows(2).all(|w| w[0].created_at <= w[1].created_at));
        assert_eq!(oldest[0].id, "t2");
    }
}
