use std::fmt;

use crate::concepts::ConceptTable;

/// Text shown when a combination has no authored concept.
pub const FALLBACK_CONCEPT: &str = "Emerging concept";

/// Components at least this large get a group message every tick.
pub const MIN_GROUP_MESSAGE_SIZE: usize = 3;

/// Canonical identity of a set of labels: sorted, deduplicated, joined.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey(String);

impl GroupKey {
    pub const SEPARATOR: &'static str = " ↔ ";

    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut labels = labels
            .into_iter()
            .map(|label| label.as_ref().trim().to_owned())
            .filter(|label| !label.is_empty())
            .collect::<Vec<_>>();
        labels.sort();
        labels.dedup();
        Self(labels.join(Self::SEPARATOR))
    }

    /// Accepts a separator-joined key in any label order and spacing.
    pub fn parse(raw: &str) -> Self {
        Self::from_labels(raw.split(Self::SEPARATOR.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0
            .split(Self::SEPARATOR)
            .filter(|label| !label.is_empty())
    }

    pub fn member_count(&self) -> usize {
        self.labels().count()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn resolve_concept<'a>(table: &'a ConceptTable, key: &GroupKey) -> &'a str {
    table.get(key).unwrap_or(FALLBACK_CONCEPT)
}

/// Pairs are announced by the edge builder on formation; only larger
/// components are announced by the grouper.
pub fn emits_group_message(member_count: usize) -> bool {
    member_count >= MIN_GROUP_MESSAGE_SIZE
}
