use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Industry vocabulary offered by the filter bar.
pub const INDUSTRIES: [&str; 5] = ["DRINK", "FOOD", "FASHION", "BEAUTY", "HEALTH"];

/// Language vocabulary offered by the filter bar.
pub const LANGUAGES: [&str; 2] = ["LT", "EN"];

/// Visual format of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateFormat {
    Feed,
    Story,
}

impl fmt::Display for TemplateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateFormat::Feed => write!(f, "Feed"),
            TemplateFormat::Story => write!(f, "Story"),
        }
    }
}

impl FromStr for TemplateFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Feed" | "feed" => Ok(TemplateFormat::Feed),
            "Story" | "story" => Ok(TemplateFormat::Story),
            other => Err(Error::Parse(format!("unknown template format: {}", other))),
        }
    }
}

/// Order for the derived template list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Highest saved_count first (default)
    Popular,
    /// created_at descending
    Newest,
    /// created_at ascending
    Oldest,
    /// Most recently saved first; restricts the list to saved templates
    Saved,
}

impl Default for SortKey {
    fn default() -> Self {
        Self::Popular
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Popular => write!(f, "popular"),
            SortKey::Newest => write!(f, "newest"),
            SortKey::Oldest => write!(f, "oldest"),
            SortKey::Saved => write!(f, "saved"),
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(SortKey::Popular),
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "saved" => Ok(SortKey::Saved),
            other => Err(Error::Parse(format!("unknown sort key: {}", other))),
        }
    }
}

/// A catalog template row.
///
/// `image_url` holds whatever the store has: a raw storage file name, an
/// already-resolved absolute URL, or nothing. The catalog repository
/// normalizes it to a displayable URL before the row reaches presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub title: String,
    pub canva_url: String,
    pub category: String,
    pub format: TemplateFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub language: String,
    pub popularity: u32,
    pub saved_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Template {
    pub fn increment_saved(&mut self) {
        self.saved_count += 1;
    }

    /// Clamped at zero; a decrement below zero is dropped.
    pub fn decrement_saved(&mut self) {
        self.saved_count = self.saved_count.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn template() -> Template {
        Template {
            id: "t1".to_string(),
            title: "Fashion - 100 (EN)".to_string(),
            canva_url: "https://www.canva.com/design/sample/view".to_string(),
            category: "FASHION".to_string(),
            format: TemplateFormat::Feed,
            image_url: Some("MUSHI Fashion - 100 (EN).png".to_string()),
            language: "EN".to_string(),
            popularity: 73,
            saved_count: 0,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn decrement_clamps_at_zero() {
        let mut t = template();
        t.decrement_saved();
        assert_eq!(t.saved_count, 0);

        t.increment_saved();
        t.increment_saved();
        t.decrement_saved();
        assert_eq!(t.saved_count, 1);
    }

    #[test]
    fn template_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(template()).unwrap();
        assert_eq!(json["canvaUrl"], "https://www.canva.com/design/sample/view");
        assert_eq!(json["savedCount"], 0);
        assert_eq!(json["imageUrl"], "MUSHI Fashion - 100 (EN).png");
        assert_eq!(json["format"], "Feed");
    }

    #[test]
    fn sort_key_round_trips_lowercase() {
        for key in ["popular", "newest", "oldest", "saved"] {
            let parsed: SortKey = key.parse().unwrap();
            assert_eq!(parsed.to_string(), key);
        }
        assert!("trending".parse::<SortKey>().is_err());
    }
}
