use std::collections::HashMap;

use crate::engine::GroupKey;

/// Read-only lookup from canonical label combinations to concept text.
#[derive(Clone, Debug, Default)]
pub struct ConceptTable {
    entries: HashMap<GroupKey, String>,
}

impl ConceptTable {
    /// Keys may list their labels in any order; they are stored canonically.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(raw_key, text)| (GroupKey::parse(raw_key), text.to_owned()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &GroupKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
