//! Recursive field diff.
//!
//! The entry point is [`compute_changed_paths`], which walks a snapshot
//! slice and the current slice of one section side by side and reports
//! every differing path as a labelled [`FieldChange`].

use crate::diff::model::{ChangeKind, ChangeRecord, FieldChange};
use crate::node::Node;
use crate::path::{FieldPath, ENTIRE_SECTION, ITEM};

/// Compute the changed paths between two values (`None` = absent).
///
/// Total over any input and never mutates either side. Labels are rooted
/// at the values passed in, so an empty path renders as `Entire section`.
///
/// # Example
///
/// ```
/// use folio_core::diff::compute_changed_paths;
/// use folio_core::Node;
///
/// let a = Node::from(serde_json::json!({"a": {"b": 1}}));
/// let b = Node::from(serde_json::json!({"a": {"b": 2}}));
/// assert_eq!(compute_changed_paths(Some(&a), Some(&b)).labels(), vec!["a.b"]);
/// ```
pub fn compute_changed_paths(initial: Option<&Node>, current: Option<&Node>) -> ChangeRecord {
    compute_changed_paths_at(&FieldPath::root(), initial, current)
}

/// As [`compute_changed_paths`], with every label prefixed by `base`.
///
/// Section diffs pass the section key so labels read `about.title`.
pub fn compute_changed_paths_at(
    base: &FieldPath,
    initial: Option<&Node>,
    current: Option<&Node>,
) -> ChangeRecord {
    let mut record = ChangeRecord::new();
    collect(initial, current, base, &mut record);
    record
}

fn emit(record: &mut ChangeRecord, path: &FieldPath, fallback: &str, kind: ChangeKind) {
    record.push(FieldChange {
        base_label: path.label_or(fallback),
        path: path.clone(),
        kind,
    });
}

fn collect(
    initial: Option<&Node>,
    current: Option<&Node>,
    path: &FieldPath,
    record: &mut ChangeRecord,
) {
    let (initial, current) = match (initial, current) {
        (None, _) => return emit(record, path, ENTIRE_SECTION, ChangeKind::Added),
        (_, None) => return emit(record, path, ENTIRE_SECTION, ChangeKind::Removed),
        (Some(i), Some(c)) => (i, c),
    };

    match (initial, current) {
        (Node::List(before), Node::List(after)) => {
            if before.len() != after.len() {
                emit(record, path, ENTIRE_SECTION, ChangeKind::LengthChanged);
            }
            for index in 0..before.len().max(after.len()) {
                let child = path.child_index(index);
                match (before.get(index), after.get(index)) {
                    (Some(b), Some(a)) => collect(Some(b), Some(a), &child, record),
                    (Some(_), None) => emit(record, &child, ITEM, ChangeKind::Removed),
                    (None, _) => emit(record, &child, ITEM, ChangeKind::Added),
                }
            }
        }
        (Node::List(_), _) | (_, Node::List(_)) => {
            emit(record, path, ENTIRE_SECTION, ChangeKind::TypeChanged);
        }
        (Node::Record(before), Node::Record(after)) => {
            let keys = before
                .keys()
                .chain(after.keys().filter(|k| !before.contains_key(*k)));
            for key in keys {
                let child = path.child_key(key.as_str());
                match (before.get(key), after.get(key)) {
                    (None, _) => emit(record, &child, ENTIRE_SECTION, ChangeKind::Added),
                    (_, None) => emit(record, &child, ENTIRE_SECTION, ChangeKind::Removed),
                    (b, a) => collect(b, a, &child, record),
                }
            }
        }
        // Scalars, null, and record-vs-scalar pairs
        (before, after) => {
            if before != after {
                emit(record, path, ENTIRE_SECTION, ChangeKind::ValueChanged);
            }
        }
    }
}
