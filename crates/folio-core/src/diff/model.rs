//! Change record types produced by the diff engine.

use crate::path::FieldPath;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How a field differs between the snapshot and the current document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Present now, absent in the snapshot
    Added,
    /// Present in the snapshot, absent now
    Removed,
    /// Both sides are lists of different lengths
    LengthChanged,
    /// Exactly one side is a list
    TypeChanged,
    /// Scalar (or record-vs-scalar) value differs in place
    ValueChanged,
}

impl ChangeKind {
    /// Suffix appended to the display label.
    pub fn suffix(&self) -> &'static str {
        match self {
            ChangeKind::Added => " (added)",
            ChangeKind::Removed => " (removed)",
            ChangeKind::LengthChanged => " (length changed)",
            ChangeKind::TypeChanged => " (type changed)",
            ChangeKind::ValueChanged => "",
        }
    }
}

/// One differing path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub path: FieldPath,
    pub kind: ChangeKind,
    /// Label rendered for the path, before the kind suffix
    pub base_label: String,
}

impl FieldChange {
    /// Full label as shown in change lists, e.g. `items[2] (added)`.
    pub fn label(&self) -> String {
        format!("{}{}", self.base_label, self.kind.suffix())
    }
}

/// Ordered, de-duplicated list of field changes.
///
/// Order is first insertion; a label reported twice keeps its first slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeRecord {
    changes: IndexMap<String, FieldChange>,
}

impl ChangeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: FieldChange) {
        self.changes.entry(change.label()).or_insert(change);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.changes.contains_key(label)
    }

    /// Labels in report order.
    pub fn labels(&self) -> Vec<String> {
        self.changes.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldChange> {
        self.changes.values()
    }
}

/// A top-level section whose changes are reported, with its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedSection {
    /// Key of the section in the document
    pub key: &'static str,
    /// Console identifier for the section editor
    pub id: &'static str,
    pub label: &'static str,
}

/// A changed section with its changed field labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionChange {
    pub key: String,
    pub label: String,
    pub fields: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(label: &str, kind: ChangeKind) -> FieldChange {
        FieldChange {
            path: FieldPath::parse_flattened(label),
            kind,
            base_label: label.to_string(),
        }
    }

    #[test]
    fn test_record_dedups_in_first_insertion_order() {
        let mut record = ChangeRecord::new();
        record.push(change("b", ChangeKind::ValueChanged));
        record.push(change("a", ChangeKind::Added));
        record.push(change("b", ChangeKind::ValueChanged));
        assert_eq!(record.labels(), vec!["b", "a (added)"]);
    }

    #[test]
    fn test_same_path_different_kind_both_kept() {
        let mut record = ChangeRecord::new();
        record.push(change("items", ChangeKind::LengthChanged));
        record.push(change("items", ChangeKind::ValueChanged));
        assert_eq!(record.len(), 2);
    }
}
