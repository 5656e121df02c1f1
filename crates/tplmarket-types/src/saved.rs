use serde::{Deserialize, Serialize};

/// One user's saved-template ids, in the order they were saved.
///
/// Insertion order is semantic: the `saved` sort ranks templates by
/// descending position in this set (most recently saved first). Backed by a
/// Vec rather than a hash set so that order survives serialization to both
/// the local cache and the user row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedSet(Vec<String>);

impl SavedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ids, keeping the first occurrence of any duplicate.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for id in ids {
            set.insert(id);
        }
        set
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|saved| saved == id)
    }

    /// Insertion position of `id`, if saved. Higher means saved later.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.0.iter().position(|saved| saved == id)
    }

    /// Appends `id` if absent. Returns whether the set changed.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    /// Removes `id` if present. Returns whether the set changed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|saved| saved != id);
        self.0.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_order_and_dedups() {
        let mut set = SavedSet::new();
        assert!(set.insert("t1"));
        assert!(set.insert("t3"));
        assert!(!set.insert("t1"));

        assert_eq!(set.ids(), ["t1", "t3"]);
        assert_eq!(set.position("t3"), Some(1));
    }

    #[test]
    fn remove_reports_change() {
        let mut set = SavedSet::from_ids(["t1", "t2"]);
        assert!(set.remove("t1"));
        assert!(!set.remove("t1"));
        assert_eq!(set.ids(), ["t2"]);
    }

    #[test]
    fn serializes_as_plain_id_array() {
        let set = SavedSet::from_ids(["t1", "t3"]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["t1","t3"]"#);

        let back: SavedSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
