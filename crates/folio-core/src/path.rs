//! Field paths into the content document.
//!
//! A path has two renderings. The display label (`about.stats[2].label`)
//! is what change records show; it uses list positions. The flattened key
//! (`about.stats.stat-9f1c.label`) is what typography overrides are keyed
//! by; it uses record ids so overrides follow a record when it moves.

use std::fmt;

/// Label used for an empty path at the root of a section diff.
pub const ENTIRE_SECTION: &str = "Entire section";

/// Label used for an empty path under a list.
pub const ITEM: &str = "Item";

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    fn is_numeric_key(key: &str) -> bool {
        !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Address of a value inside the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Single-key path, typically a section key.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Key(key.into())],
        }
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn child_key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Display label with [`ENTIRE_SECTION`] for the empty path.
    pub fn label(&self) -> String {
        self.label_or(ENTIRE_SECTION)
    }

    /// Display label; `fallback` when nothing renders.
    ///
    /// Indices and all-digit keys render bracketed. Empty keys are skipped.
    pub fn label_or(&self, fallback: &str) -> String {
        let rendered = self
            .segments
            .iter()
            .fold(String::new(), |mut acc, segment| {
                match segment {
                    PathSegment::Index(i) => {
                        acc.push_str(&format!("[{i}]"));
                    }
                    PathSegment::Key(key) if key.is_empty() => {}
                    PathSegment::Key(key) if PathSegment::is_numeric_key(key) => {
                        acc.push_str(&format!("[{key}]"));
                    }
                    PathSegment::Key(key) if key.starts_with('[') => {
                        acc.push_str(key);
                    }
                    PathSegment::Key(key) => {
                        if !acc.is_empty() {
                            acc.push('.');
                        }
                        acc.push_str(key);
                    }
                }
                acc
            });
        if rendered.is_empty() {
            fallback.to_string()
        } else {
            rendered
        }
    }

    /// Flattened override key: every segment joined by `.`.
    pub fn flattened(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                PathSegment::Key(key) => key.clone(),
                PathSegment::Index(i) => i.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Parse a flattened key. Every segment becomes a key, including
    /// numeric ones; lookups treat numeric keys on lists as positions.
    pub fn parse_flattened(key: &str) -> Self {
        Self {
            segments: key
                .split('.')
                .filter(|s| !s.is_empty())
                .map(|s| PathSegment::Key(s.to_string()))
                .collect(),
        }
    }

    /// Parse a display label such as `about.stats[2].label`.
    ///
    /// Returns `None` when a bracket is unbalanced or holds a non-number.
    pub fn parse_label(label: &str) -> Option<Self> {
        let mut segments = Vec::new();
        for part in label.split('.') {
            let (head, mut rest) = match part.find('[') {
                Some(pos) => part.split_at(pos),
                None => (part, ""),
            };
            if !head.is_empty() {
                segments.push(PathSegment::Key(head.to_string()));
            }
            while !rest.is_empty() {
                let close = rest.find(']')?;
                let index = rest.get(1..close)?.parse::<usize>().ok()?;
                segments.push(PathSegment::Index(index));
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return None;
                }
            }
        }
        Some(Self { segments })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_brackets_indices() {
        let path = FieldPath::key("about")
            .child_key("stats")
            .child_index(2)
            .child_key("label");
        assert_eq!(path.label(), "about.stats[2].label");
    }

    #[test]
    fn test_label_root_index_has_no_leading_dot() {
        assert_eq!(FieldPath::root().child_index(0).label_or(ITEM), "[0]");
    }

    #[test]
    fn test_label_empty_path_uses_fallback() {
        assert_eq!(FieldPath::root().label(), "Entire section");
        assert_eq!(FieldPath::root().label_or(ITEM), "Item");
    }

    #[test]
    fn test_label_numeric_and_empty_keys() {
        let path = FieldPath::key("a").child_key("").child_key("7").child_key("b");
        assert_eq!(path.label(), "a[7].b");
    }

    #[test]
    fn test_flattened_joins_with_dots() {
        let path = FieldPath::key("contact")
            .child_key("entries")
            .child_key("contact-1")
            .child_key("note");
        assert_eq!(path.flattened(), "contact.entries.contact-1.note");
        assert_eq!(
            FieldPath::key("about").child_key("paragraphs").child_index(1).flattened(),
            "about.paragraphs.1"
        );
    }

    #[test]
    fn test_parse_label_round_trip() {
        let label = "projects[3].gallery[0].alt";
        let path = FieldPath::parse_label(label).unwrap();
        assert_eq!(path.segments().len(), 5);
        assert_eq!(path.label(), label);
    }

    #[test]
    fn test_parse_label_rejects_bad_brackets() {
        assert!(FieldPath::parse_label("items[x]").is_none());
        assert!(FieldPath::parse_label("items[1").is_none());
        assert!(FieldPath::parse_label("items[1]x").is_none());
    }
}
