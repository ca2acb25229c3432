//! Section-level change detection.
//!
//! A cheap whole-section comparison picks the sections that moved; only
//! those are field-diffed.

use crate::diff::engine::compute_changed_paths_at;
use crate::diff::model::{SectionChange, TrackedSection};
use crate::node::{Node, Record};
use crate::path::FieldPath;

/// Sections reported in change lists, in report order.
pub const DEFAULT_TRACKED_SECTIONS: &[TrackedSection] = &[
    TrackedSection {
        key: "settings",
        id: "site-settings",
        label: "Site settings",
    },
    TrackedSection {
        key: "home",
        id: "home",
        label: "Home",
    },
    TrackedSection {
        key: "about",
        id: "about",
        label: "About",
    },
    TrackedSection {
        key: "portfolio",
        id: "portfolio",
        label: "Portfolio",
    },
    TrackedSection {
        key: "contact",
        id: "contact",
        label: "Contact",
    },
    TrackedSection {
        key: "collections",
        id: "collections",
        label: "Collections",
    },
    TrackedSection {
        key: "projects",
        id: "projects",
        label: "Projects",
    },
    TrackedSection {
        key: "typography",
        id: "typography",
        label: "Typography",
    },
];

/// Whether a section slice differs by canonical serialization.
///
/// Key order matters here, unlike [`Node`] equality: reordering keys marks
/// the section changed even though the field diff may then be empty.
pub fn section_changed(initial: Option<&Node>, current: Option<&Node>) -> bool {
    initial.map(Node::canonical) != current.map(Node::canonical)
}

/// Tracked sections whose slices differ, in tracked order.
pub fn changed_sections<'a>(
    tracked: &'a [TrackedSection],
    snapshot: &Record,
    current: &Record,
) -> Vec<&'a TrackedSection> {
    tracked
        .iter()
        .filter(|section| section_changed(snapshot.get(section.key), current.get(section.key)))
        .collect()
}

/// Changed sections with their field labels, rooted at the section key.
pub fn section_changes(
    tracked: &[TrackedSection],
    snapshot: &Record,
    current: &Record,
) -> Vec<SectionChange> {
    changed_sections(tracked, snapshot, current)
        .into_iter()
        .map(|section| SectionChange {
            key: section.key.to_string(),
            label: section.label.to_string(),
            fields: compute_changed_paths_at(
                &FieldPath::key(section.key),
                snapshot.get(section.key),
                current.get(section.key),
            )
            .labels(),
        })
        .collect()
}
