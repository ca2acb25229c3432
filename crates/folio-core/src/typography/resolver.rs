//! Per-field font resolution.
//!
//! Overrides are a sparse map from flattened field keys to font
//! identifiers. Resolution never fails: an unknown override falls back to
//! the caller's category, and an unknown category falls back to
//! [`GLOBAL_DEFAULT_FAMILY`].

use crate::node::{Node, Record};
use crate::typography::fonts::{FontId, GLOBAL_DEFAULT_FAMILY};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Fallback category used by render surfaces that do not pass one.
pub const DEFAULT_FALLBACK: &str = "display";

/// Flattened field key → font identifier, as stored at `typography`.
///
/// Identifiers are kept verbatim even when unrecognized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypographyOverrides(IndexMap<String, String>);

impl TypographyOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from the `typography` node. Non-string values are
    /// skipped since they can never resolve.
    pub fn from_node(node: Option<&Node>) -> Self {
        let map = node
            .and_then(Node::as_record)
            .map(|record| {
                record
                    .iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, font: impl Into<String>) {
        self.0.insert(key.into(), font.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Resolve with the [`DEFAULT_FALLBACK`] category.
    pub fn family_for(&self, field_path: &str) -> &'static str {
        resolve_font(self, field_path, DEFAULT_FALLBACK)
    }

    /// Record form for writing back into the document.
    pub fn to_record(&self) -> Record {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), Node::from(v.as_str())))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TypographyOverrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Effective CSS font family for one field.
///
/// Direct override if recognized, else the `fallback_category` family if
/// recognized, else `inherit`.
///
/// # Example
///
/// ```
/// use folio_core::typography::{resolve_font, TypographyOverrides};
///
/// let overrides: TypographyOverrides = [("home.title", "serif")].into_iter().collect();
/// assert_eq!(
///     resolve_font(&overrides, "home.title", "display"),
///     "'Georgia', 'Times New Roman', serif"
/// );
/// ```
pub fn resolve_font(
    overrides: &TypographyOverrides,
    field_path: &str,
    fallback_category: &str,
) -> &'static str {
    overrides
        .get(field_path)
        .and_then(FontId::from_id)
        .or_else(|| FontId::from_id(fallback_category))
        .map(|font| font.family())
        .unwrap_or(GLOBAL_DEFAULT_FAMILY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const GEORGIA: &str = "'Georgia', 'Times New Roman', serif";
    const PLAYFAIR: &str = "'Playfair Display', 'Times New Roman', serif";

    #[test]
    fn test_direct_hit() {
        let overrides: TypographyOverrides = [("home.title", "serif")].into_iter().collect();
        assert_eq!(resolve_font(&overrides, "home.title", "display"), GEORGIA);
    }

    #[test]
    fn test_missing_key_uses_fallback() {
        let overrides = TypographyOverrides::new();
        assert_eq!(resolve_font(&overrides, "home.title", "display"), PLAYFAIR);
        assert_eq!(
            resolve_font(&overrides, "home.title", "sans"),
            "'Plus Jakarta Sans', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif"
        );
    }

    #[test]
    fn test_unknown_override_degrades_to_fallback() {
        let overrides: TypographyOverrides = [("home.title", "comic")].into_iter().collect();
        assert_eq!(resolve_font(&overrides, "home.title", "display"), PLAYFAIR);
        assert_eq!(overrides.get("home.title"), Some("comic"));
    }

    #[test]
    fn test_unknown_fallback_is_inherit() {
        let overrides = TypographyOverrides::new();
        assert_eq!(resolve_font(&overrides, "x", "nope"), "inherit");
    }

    #[test]
    fn test_from_node_skips_non_strings() {
        let node = Node::from(json!({"home.title": "serif", "home.eyebrow": 3}));
        let overrides = TypographyOverrides::from_node(Some(&node));
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.family_for("home.eyebrow"), PLAYFAIR);
    }
}
