//! Editable text fields that can take a font override.

use crate::document::ContentDocument;
use crate::node::Node;
use crate::typography::fonts::FontId;
use crate::typography::resolver::TypographyOverrides;
use serde::Serialize;

const HINT_MAX_CHARS: usize = 80;
const HINT_KEEP_CHARS: usize = 77;

/// One field eligible for a font override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontTarget {
    /// Flattened override key
    pub key: String,
    pub label: String,
    /// Short preview of the current value
    pub hint: String,
}

/// Targets grouped by page section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontTargetSection {
    pub key: &'static str,
    pub label: &'static str,
    pub fields: Vec<FontTarget>,
}

/// Preview text for a value: trimmed, cut to 77 chars plus `…` when
/// longer than 80. Non-strings preview as empty.
pub fn summarise_value(value: Option<&Node>) -> String {
    let Some(text) = value.and_then(Node::as_str) else {
        return String::new();
    };
    let trimmed = text.trim();
    if trimmed.chars().count() > HINT_MAX_CHARS {
        let mut cut: String = trimmed.chars().take(HINT_KEEP_CHARS).collect();
        cut.push('…');
        cut
    } else {
        trimmed.to_string()
    }
}

fn target(key: impl Into<String>, label: impl Into<String>, value: Option<&Node>) -> FontTarget {
    FontTarget {
        key: key.into(),
        label: label.into(),
        hint: summarise_value(value),
    }
}

fn list<'a>(section: Option<&'a Node>, key: &str) -> &'a [Node] {
    section
        .and_then(|s| s.get(key))
        .and_then(Node::as_list)
        .unwrap_or_default()
}

fn home_targets(home: Option<&Node>) -> Vec<FontTarget> {
    let field = |key: &str| home.and_then(|h| h.get(key));
    let cta = |key: &str| field(key).and_then(|c| c.get("label"));
    vec![
        target("home.eyebrow", "Eyebrow", field("eyebrow")),
        target("home.title", "Title", field("title")),
        target("home.description", "Description", field("description")),
        target("home.ribbonText", "Ribbon text", field("ribbonText")),
        target("home.primaryCta.label", "Primary CTA label", cta("primaryCta")),
        target("home.secondaryCta.label", "Secondary CTA label", cta("secondaryCta")),
    ]
}

fn about_targets(about: Option<&Node>) -> Vec<FontTarget> {
    let field = |key: &str| about.and_then(|a| a.get(key));
    let mut fields = vec![
        target("about.eyebrow", "Eyebrow", field("eyebrow")),
        target("about.title", "Title", field("title")),
    ];
    for (index, paragraph) in list(about, "paragraphs").iter().enumerate() {
        fields.push(target(
            format!("about.paragraphs.{index}"),
            format!("Paragraph {}", index + 1),
            Some(paragraph),
        ));
    }
    for (index, capability) in list(about, "capabilities").iter().enumerate() {
        fields.push(target(
            format!("about.capabilities.{index}"),
            format!("Capability {}", index + 1),
            Some(capability),
        ));
    }
    for (index, stat) in list(about, "stats").iter().enumerate() {
        let Some(id) = stat.record_id().filter(|id| !id.is_empty()) else {
            continue;
        };
        for part in ["value", "label", "description"] {
            fields.push(target(
                format!("about.stats.{id}.{part}"),
                format!("Stat {} {part}", index + 1),
                stat.get(part),
            ));
        }
    }
    fields
}

fn portfolio_targets(portfolio: Option<&Node>) -> Vec<FontTarget> {
    let field = |key: &str| portfolio.and_then(|p| p.get(key));
    vec![
        target("portfolio.introTitle", "Intro title", field("introTitle")),
        target("portfolio.introDescription", "Intro description", field("introDescription")),
        target("portfolio.filtersLabel", "Filter label", field("filtersLabel")),
    ]
}

fn non_empty_str(node: Option<&Node>) -> Option<&Node> {
    node.filter(|n| n.as_str().is_some_and(|s| !s.is_empty()))
}

fn contact_targets(contact: Option<&Node>) -> Vec<FontTarget> {
    let field = |key: &str| contact.and_then(|c| c.get(key));
    let mut fields = vec![
        target("contact.eyebrow", "Eyebrow", field("eyebrow")),
        target("contact.title", "Title", field("title")),
        target("contact.description", "Description", field("description")),
    ];
    for (index, entry) in list(contact, "entries").iter().enumerate() {
        let Some(id) = entry.record_id().filter(|id| !id.is_empty()) else {
            continue;
        };
        let n = index + 1;
        let display = non_empty_str(entry.get("displayValue")).or_else(|| entry.get("value"));
        fields.push(target(
            format!("contact.entries.{id}.label"),
            format!("Entry {n} label"),
            entry.get("label"),
        ));
        fields.push(target(
            format!("contact.entries.{id}.value"),
            format!("Entry {n} value"),
            entry.get("value"),
        ));
        fields.push(target(
            format!("contact.entries.{id}.displayValue"),
            format!("Entry {n} display value"),
            display,
        ));
        fields.push(target(
            format!("contact.entries.{id}.note"),
            format!("Entry {n} note"),
            entry.get("note"),
        ));
    }
    fields
}

/// Enumerate override targets for the Home, About, Portfolio and Contact
/// pages. Sections without fields are left out.
pub fn build_font_targets(document: &ContentDocument) -> Vec<FontTargetSection> {
    let sections = [
        ("home", "Home", home_targets(document.section("home"))),
        ("about", "About", about_targets(document.section("about"))),
        (
            "portfolio",
            "Portfolio",
            portfolio_targets(document.section("portfolio")),
        ),
        ("contact", "Contact", contact_targets(document.section("contact"))),
    ];
    sections
        .into_iter()
        .filter(|(_, _, fields)| !fields.is_empty())
        .map(|(key, label, fields)| FontTargetSection { key, label, fields })
        .collect()
}

/// Set one font on every listed override key.
pub fn apply_font<S: AsRef<str>>(document: &mut ContentDocument, keys: &[S], font: FontId) {
    let updates: TypographyOverrides = keys
        .iter()
        .map(|key| (key.as_ref(), font.as_str()))
        .collect();
    document.patch_typography(&updates);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> ContentDocument {
        ContentDocument::try_from(Node::from(value)).unwrap()
    }

    fn keys(section: &FontTargetSection) -> Vec<&str> {
        section.fields.iter().map(|f| f.key.as_str()).collect()
    }

    #[test]
    fn test_summarise_value_rules() {
        assert_eq!(summarise_value(None), "");
        assert_eq!(summarise_value(Some(&Node::from(json!(42)))), "");
        assert_eq!(summarise_value(Some(&Node::from("  padded  "))), "padded");
        let long = "a".repeat(81);
        let hint = summarise_value(Some(&Node::from(long.as_str())));
        assert_eq!(hint.chars().count(), 78);
        assert!(hint.ends_with('…'));
        let edge = "b".repeat(80);
        assert_eq!(summarise_value(Some(&Node::from(edge.as_str()))), edge);
    }

    #[test]
    fn test_fixed_sections_always_present() {
        let targets = build_font_targets(&doc(json!({})));
        let section_keys: Vec<&str> = targets.iter().map(|s| s.key).collect();
        assert_eq!(section_keys, vec!["home", "about", "portfolio", "contact"]);
        assert_eq!(targets[0].fields.len(), 6);
        assert!(targets[0].fields.iter().all(|f| f.hint.is_empty()));
    }

    #[test]
    fn test_about_uses_positions_for_text_and_ids_for_stats() {
        let targets = build_font_targets(&doc(json!({
            "about": {
                "title": "Printmaking",
                "paragraphs": ["One", "Two"],
                "capabilities": ["Cap"],
                "stats": [{"id": "stat-a", "value": "28", "label": "Runs"}, {"value": "no id"}]
            }
        })));
        let about = &targets[1];
        assert_eq!(
            keys(about),
            vec![
                "about.eyebrow",
                "about.title",
                "about.paragraphs.0",
                "about.paragraphs.1",
                "about.capabilities.0",
                "about.stats.stat-a.value",
                "about.stats.stat-a.label",
                "about.stats.stat-a.description",
            ]
        );
        assert_eq!(about.fields[3].label, "Paragraph 2");
        assert_eq!(about.fields[5].label, "Stat 1 value");
        assert_eq!(about.fields[5].hint, "28");
    }

    #[test]
    fn test_contact_display_value_hint_falls_back_to_value() {
        let targets = build_font_targets(&doc(json!({
            "contact": {"entries": [{"id": "contact-1", "label": "Email", "value": "hi@x.io"}]}
        })));
        let contact = &targets[3];
        let display = contact
            .fields
            .iter()
            .find(|f| f.key == "contact.entries.contact-1.displayValue")
            .unwrap();
        assert_eq!(display.hint, "hi@x.io");
        assert_eq!(display.label, "Entry 1 display value");
    }

    #[test]
    fn test_apply_font_patches_typography() {
        let mut d = doc(json!({"typography": {"home.title": "serif"}}));
        apply_font(&mut d, &["home.title", "home.eyebrow"], FontId::Poppins);
        let overrides = d.typography();
        assert_eq!(overrides.get("home.title"), Some("poppins"));
        assert_eq!(overrides.get("home.eyebrow"), Some("poppins"));
    }
}
