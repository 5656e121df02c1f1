use serde::{Deserialize, Serialize};

use crate::template::SortKey;

/// Current filter and sort selections.
///
/// Empty fields pass everything. Values are toggled in and out the way the
/// filter bar does it; unknown values are accepted and simply match nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub industries: Vec<String>,
    pub formats: Vec<String>,
    pub languages: Vec<String>,
    pub sort: SortKey,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_industry(&mut self, industry: impl Into<String>) {
        toggle_value(&mut self.industries, industry.into());
    }

    pub fn toggle_format(&mut self, format: impl Into<String>) {
        toggle_value(&mut self.formats, format.into());
    }

    pub fn toggle_language(&mut self, language: impl Into<String>) {
        toggle_value(&mut self.languages, language.into());
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    pub fn is_unfiltered(&self) -> bool {
        self.industries.is_empty()
            && self.formats.is_empty()
            && self.languages.is_empty()
            && self.sort == SortKey::default()
    }
}

fn toggle_value(values: &mut Vec<String>, value: String) {
    if let Some(idx) = values.iter().position(|v| *v == value) {
        values.remove(idx);
    } else {
        values.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_removes_the_value() {
        let mut selection = FilterSelection::new();
        selection.toggle_industry("FASHION");
        assert_eq!(selection.industries, ["FASHION"]);

        selection.toggle_industry("FASHION");
        assert!(selection.industries.is_empty());
        assert!(selection.is_unfiltered());
    }

    #[test]
    fn sort_change_leaves_filters_alone() {
        let mut selection = FilterSelection::new();
        selection.toggle_language("EN");
        selection.set_sort(SortKey::Newest);

        assert_eq!(selection.languages, ["EN"]);
        assert_eq!(selection.sort, SortKey::Newest);
        assert!(!selection.is_unfiltered());
    }
}
