//! Commit message prefill from section changes.

use crate::diff::model::SectionChange;

/// Longest summary returned unchanged.
pub const MAX_SUMMARY_LEN: usize = 200;

/// Characters kept when a summary is cut down.
const TRUNCATED_LEN: usize = MAX_SUMMARY_LEN - TRUNCATION_MARKER.len();

const TRUNCATION_MARKER: &str = "...";

/// Fields listed per section before the overflow marker.
pub const MAX_FIELDS_PER_SECTION: usize = 3;

const FIELD_OVERFLOW: &str = ", …";

/// Build the default commit message for a set of changed sections.
///
/// `"Update <fragment>; <fragment>"`, where each fragment is the section
/// label followed by up to three field labels in parentheses. Summaries
/// over [`MAX_SUMMARY_LEN`] characters are cut to exactly that length.
/// No sections yields an empty string.
///
/// # Example
///
/// ```
/// use folio_core::diff::{summarize_changes, SectionChange};
///
/// let about = SectionChange {
///     key: "about".into(),
///     label: "About".into(),
///     fields: vec!["about.title".into()],
/// };
/// assert_eq!(summarize_changes(&[about]), "Update About (about.title)");
/// ```
pub fn summarize_changes(sections: &[SectionChange]) -> String {
    if sections.is_empty() {
        return String::new();
    }

    let fragments: Vec<String> = sections.iter().map(fragment).collect();
    let summary = format!("Update {}", fragments.join("; "));

    if summary.chars().count() <= MAX_SUMMARY_LEN {
        return summary;
    }
    let mut cut: String = summary.chars().take(TRUNCATED_LEN).collect();
    cut.push_str(TRUNCATION_MARKER);
    cut
}

fn fragment(section: &SectionChange) -> String {
    if section.fields.is_empty() {
        return section.label.clone();
    }
    let preview = section
        .fields
        .iter()
        .take(MAX_FIELDS_PER_SECTION)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let overflow = if section.fields.len() > MAX_FIELDS_PER_SECTION {
        FIELD_OVERFLOW
    } else {
        ""
    };
    format!("{} ({}{})", section.label, preview, overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(label: &str, fields: &[&str]) -> SectionChange {
        SectionChange {
            key: label.to_lowercase(),
            label: label.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_input_is_empty_summary() {
        assert_eq!(summarize_changes(&[]), "");
    }

    #[test]
    fn test_label_only_when_no_fields() {
        assert_eq!(summarize_changes(&[section("Home", &[])]), "Update Home");
    }

    #[test]
    fn test_fragments_joined_with_semicolons() {
        let got = summarize_changes(&[
            section("Site settings", &["siteTitle"]),
            section("Home", &["title", "description"]),
        ]);
        assert_eq!(got, "Update Site settings (siteTitle); Home (title, description)");
    }

    #[test]
    fn test_overflow_marker_after_three_fields() {
        let got = summarize_changes(&[section(
            "About",
            &[
                "about.title",
                "about.stats[0].value",
                "about.stats[0].label",
                "about.stats[0].description",
            ],
        )]);
        assert_eq!(
            got,
            "Update About (about.title, about.stats[0].value, about.stats[0].label, …)"
        );
    }

    #[test]
    fn test_exactly_three_fields_has_no_overflow() {
        let got = summarize_changes(&[section("Home", &["a", "b", "c"])]);
        assert_eq!(got, "Update Home (a, b, c)");
    }

    #[test]
    fn test_long_summary_is_cut_to_limit() {
        let long_field = "x".repeat(300);
        let got = summarize_changes(&[section("Projects", &[long_field.as_str()])]);
        assert_eq!(got.chars().count(), MAX_SUMMARY_LEN);
        assert!(got.ends_with("..."));
        assert!(got.starts_with("Update Projects (xxx"));
    }

    #[test]
    fn test_summary_at_limit_is_unchanged() {
        // "Update Home (" + 186 + ")" = 200
        let field = "y".repeat(186);
        let got = summarize_changes(&[section("Home", &[field.as_str()])]);
        assert_eq!(got.chars().count(), 200);
        assert!(got.ends_with(')'));
    }
}
