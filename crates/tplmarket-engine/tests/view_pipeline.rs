use tplmarket_engine::{RevealWindow, apply};
use tplmarket_testing::fixtures;
use tplmarket_types::{FilterSelection, SavedSet, SortKey};

#[test]
fn top_twenty_by_saved_count_with_ties_in_catalog_order() {
    // 45 templates, saved counts cycling 5, 3, 5, 1
    let catalog = fixtures::catalog(45);
    let selection = FilterSelection::new(); // popular is the default sort

    let sorted = apply(&catalog, &selection, &SavedSet::new());
    assert_eq!(sorted.len(), 45);
    assert!(
        sorted
            .windows(2)
            .all(|w| w[0].saved_count >= w[1].saved_count)
    );

    let window = RevealWindow::new();
    let visible = window.visible(&sorted);
    assert_eq!(visible.len(), 20);

    // The cycle puts count 5 on indices 0, 2, 4, ... — 23 of 45 rows. The
    // first 20 visible are all fives, tied rows in their original order.
    assert!(visible.iter().all(|t| t.saved_count == 5));
    let ids: Vec<&str> = visible.iter().map(|t| t.id.as_str()).collect();
    let expected: Vec<String> = (0..45)
        .filter(|i| i % 4 == 0 || i % 4 == 2)
        .take(20)
        .map(|i| format!("t{}", i + 1))
        .collect();
    assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn output_is_a_subset_satisfying_the_selection() {
    let catalog = fixtures::catalog(45);

    let mut selection = FilterSelection::new();
    selection.toggle_industry("FOOD");
    selection.toggle_format("Story");
    selection.set_sort(SortKey::Newest);

    let result = apply(&catalog, &selection, &SavedSet::new());

    assert!(!result.is_empty());
    assert!(result.len() < catalog.len());
    for template in &result {
        assert!(catalog.iter().any(|t| t.id == template.id));
        assert_eq!(template.category.to_uppercase(), "FOOD");
        assert_eq!(template.format.to_string(), "Story");
    }
    assert!(
        result
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at)
    );
}

#[test]
fn saved_sort_orders_by_recency_of_saving() {
    let catalog = fixtures::catalog(10);
    let saved = SavedSet::from_ids(["t2", "t7", "t4"]);

    let mut selection = FilterSelection::new();
    selection.set_sort(SortKey::Saved);

    let result = apply(&catalog, &selection, &saved);
    let ids: Vec<&str> = result.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["t4", "t7", "t2"]);
}

#[test]
fn window_growth_never_reorders_the_list() {
    let catalog = fixtures::catalog(45);
    let sorted = apply(&catalog, &FilterSelection::new(), &SavedSet::new());

    let mut window = RevealWindow::new();
    let first_page: Vec<String> = window.visible(&sorted).iter().map(|t| t.id.clone()).collect();

    window.load_more();
    let two_pages = window.visible(&sorted);
    assert_eq!(two_pages.len(), 40);
    let prefix: Vec<String> = two_pages[..20].iter().map(|t| t.id.clone()).collect();
    assert_eq!(prefix, first_page);
}
