//! Content document and its editing operations.
//!
//! The document is a record of top-level sections. Beyond the section key
//! set nothing is enforced: fields may be absent, null or oddly shaped,
//! and every operation here tolerates that.

use crate::defaults;
use crate::errors::FolioError;
use crate::ids::create_id;
use crate::node::{Node, Record};
use crate::path::{FieldPath, PathSegment};
use crate::typography::TypographyOverrides;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Every top-level section a document may hold.
pub const SECTION_KEYS: &[&str] = &[
    "home",
    "about",
    "portfolio",
    "contact",
    "collections",
    "projects",
    "settings",
    "typography",
];

/// Sections an imported file must carry.
pub const REQUIRED_IMPORT_KEYS: &[&str] = &[
    "home",
    "about",
    "portfolio",
    "contact",
    "collections",
    "projects",
    "settings",
];

pub const TYPOGRAPHY_KEY: &str = "typography";

/// Direction for [`ContentDocument::move_record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

impl FromStr for MoveDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(MoveDirection::Up),
            "down" => Ok(MoveDirection::Down),
            other => Err(format!("direction must be 'up' or 'down', got '{other}'")),
        }
    }
}

/// The whole site content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Node", into = "Node")]
pub struct ContentDocument {
    sections: Record,
}

/// Immutable copy of a document taken at session start.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    sections: Record,
}

impl Snapshot {
    pub fn sections(&self) -> &Record {
        &self.sections
    }

    pub fn section(&self, key: &str) -> Option<&Node> {
        self.sections.get(key)
    }
}

impl Default for ContentDocument {
    fn default() -> Self {
        Self {
            sections: defaults::default_sections(),
        }
    }
}

impl TryFrom<Node> for ContentDocument {
    type Error = FolioError;

    fn try_from(node: Node) -> Result<Self, Self::Error> {
        match node {
            Node::Record(sections) => Ok(Self { sections }),
            _ => Err(FolioError::NotARecord),
        }
    }
}

impl From<ContentDocument> for Node {
    fn from(doc: ContentDocument) -> Self {
        Node::Record(doc.sections)
    }
}

fn is_section_key(key: &str) -> bool {
    SECTION_KEYS.contains(&key)
}

fn empty_container(list: bool) -> Node {
    if list {
        Node::List(Vec::new())
    } else {
        Node::record()
    }
}

fn find_by_key<'a>(items: &'a mut [Node], key: &str) -> Option<&'a mut Node> {
    match key.parse::<usize>() {
        Ok(index) => items.get_mut(index),
        Err(_) => items.iter_mut().find(|item| item.record_id() == Some(key)),
    }
}

fn merge_into(target: &mut Node, partial: Record) {
    match target.as_record_mut() {
        Some(existing) => existing.extend(partial),
        None => *target = Node::Record(partial),
    }
}

/// Check that a parsed file can stand in for the document.
///
/// # Errors
///
/// - `NotARecord`: the root is not a record
/// - `MissingSection`: a required top-level key is absent
/// - `NotAList`: `collections`, `projects` or `contact.entries` is not a list
pub fn validate_import(node: &Node) -> Result<(), FolioError> {
    let root = node.as_record().ok_or(FolioError::NotARecord)?;
    if let Some(key) = REQUIRED_IMPORT_KEYS.iter().find(|k| !root.contains_key(**k)) {
        return Err(FolioError::MissingSection {
            key: key.to_string(),
        });
    }
    for key in ["collections", "projects"] {
        if !root.get(key).is_some_and(Node::is_list) {
            return Err(FolioError::NotAList {
                path: key.to_string(),
            });
        }
    }
    let entries = root.get("contact").and_then(|c| c.get("entries"));
    if !entries.is_some_and(Node::is_list) {
        return Err(FolioError::NotAList {
            path: "contact.entries".to_string(),
        });
    }
    Ok(())
}

impl ContentDocument {
    /// Wrap existing sections without validation.
    pub fn from_sections(sections: Record) -> Self {
        Self { sections }
    }

    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// `Serialization` for malformed JSON, `NotARecord` for a non-record root.
    pub fn from_json(text: &str) -> Result<Self, FolioError> {
        let node: Node = serde_json::from_str(text)?;
        Self::try_from(node)
    }

    /// Pretty JSON rendering, keys in document order.
    ///
    /// # Errors
    ///
    /// `Serialization` if encoding fails.
    pub fn to_json_pretty(&self) -> Result<String, FolioError> {
        Ok(serde_json::to_string_pretty(&serde_json::Value::from(
            Node::Record(self.sections.clone()),
        ))?)
    }

    /// Validate an imported file and lay it over the defaults.
    ///
    /// # Errors
    ///
    /// See [`validate_import`].
    pub fn import(node: Node) -> Result<Self, FolioError> {
        validate_import(&node)?;
        match node {
            Node::Record(sections) => Ok(Self::merge_over_defaults(sections)),
            _ => Err(FolioError::NotARecord),
        }
    }

    /// Shallow top-level merge of `sections` over the default document.
    pub fn merge_over_defaults(sections: Record) -> Self {
        let mut merged = defaults::default_sections();
        merged.extend(sections);
        Self { sections: merged }
    }

    pub fn sections(&self) -> &Record {
        &self.sections
    }

    pub fn section(&self, key: &str) -> Option<&Node> {
        self.sections.get(key)
    }

    pub fn get_path(&self, path: &FieldPath) -> Option<&Node> {
        let (first, rest) = path.segments().split_first()?;
        let PathSegment::Key(section) = first else {
            return None;
        };
        self.sections
            .get(section)?
            .get_path(&FieldPath::from_segments(rest.to_vec()))
    }

    pub fn typography(&self) -> TypographyOverrides {
        TypographyOverrides::from_node(self.section(TYPOGRAPHY_KEY))
    }

    /// Deep copy for use as a diff baseline.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            sections: self.sections.clone(),
        }
    }

    /// Shallow-merge `partial` into a section.
    ///
    /// A record partial is merged key by key over the existing section (a
    /// missing or non-record section starts empty). Any other partial
    /// replaces the section outright, which is how list sections are set.
    ///
    /// # Errors
    ///
    /// `UnknownSection` if `key` is not a document section.
    pub fn patch_section(&mut self, key: &str, partial: Node) -> Result<(), FolioError> {
        if !is_section_key(key) {
            return Err(FolioError::UnknownSection {
                key: key.to_string(),
            });
        }
        match partial {
            Node::Record(fields) => {
                let section = self
                    .sections
                    .entry(key.to_string())
                    .or_insert_with(Node::record);
                merge_into(section, fields);
            }
            other => {
                self.sections.insert(key.to_string(), other);
            }
        }
        Ok(())
    }

    /// Shallow-merge font selections into the override map.
    pub fn patch_typography(&mut self, updates: &TypographyOverrides) {
        let section = self
            .sections
            .entry(TYPOGRAPHY_KEY.to_string())
            .or_insert_with(Node::record);
        merge_into(section, updates.to_record());
    }

    fn check_section(path: &FieldPath) -> Result<&str, FolioError> {
        match path.segments().first() {
            Some(PathSegment::Key(key)) if is_section_key(key) => Ok(key),
            Some(PathSegment::Key(key)) => Err(FolioError::UnknownSection { key: key.clone() }),
            _ => Err(FolioError::UnknownSection {
                key: path.flattened(),
            }),
        }
    }

    /// Existing list at `path`.
    fn list_mut(&mut self, path: &FieldPath) -> Result<&mut Vec<Node>, FolioError> {
        let section = Self::check_section(path)?;
        let not_a_list = || FolioError::NotAList {
            path: path.flattened(),
        };
        let mut node = self.sections.get_mut(section).ok_or_else(not_a_list)?;
        for segment in &path.segments()[1..] {
            node = match (node, segment) {
                (Node::Record(map), PathSegment::Key(key)) => map.get_mut(key),
                (Node::List(items), PathSegment::Index(index)) => items.get_mut(*index),
                (Node::List(items), PathSegment::Key(key)) => find_by_key(items, key),
                _ => None,
            }
            .ok_or_else(not_a_list)?;
        }
        node.as_list_mut().ok_or_else(not_a_list)
    }

    /// List at `path`, creating missing or null containers on the way.
    fn ensure_list(&mut self, path: &FieldPath) -> Result<&mut Vec<Node>, FolioError> {
        let section = Self::check_section(path)?.to_string();
        let not_a_list = || FolioError::NotAList {
            path: path.flattened(),
        };
        let rest = &path.segments()[1..];
        let mut node = self
            .sections
            .entry(section)
            .or_insert_with(|| empty_container(rest.is_empty()));
        for (position, segment) in rest.iter().enumerate() {
            let last = position + 1 == rest.len();
            if node.is_null() {
                *node = Node::record();
            }
            node = match (node, segment) {
                (Node::Record(map), PathSegment::Key(key)) => Some(
                    map.entry(key.clone())
                        .or_insert_with(|| empty_container(last)),
                ),
                (Node::List(items), PathSegment::Index(index)) => items.get_mut(*index),
                (Node::List(items), PathSegment::Key(key)) => find_by_key(items, key),
                _ => None,
            }
            .ok_or_else(not_a_list)?;
        }
        if node.is_null() {
            *node = Node::List(Vec::new());
        }
        node.as_list_mut().ok_or_else(not_a_list)
    }

    fn new_record(prefix: &str, defaults: Record, fields: Record) -> (String, Node) {
        let mut record = Record::new();
        record.insert("id".to_string(), Node::from(create_id(prefix)));
        record.extend(defaults);
        record.extend(fields);
        let id = record
            .get("id")
            .and_then(Node::as_str)
            .unwrap_or_default()
            .to_string();
        (id, Node::Record(record))
    }

    /// Append a record with a fresh `<prefix>-<uuid>` id. Returns the id.
    ///
    /// An `id` among `fields` wins over the generated one.
    ///
    /// # Errors
    ///
    /// `UnknownSection` for a bad first segment, `NotAList` if something
    /// other than a list (or null) sits at `path`.
    pub fn add_record(
        &mut self,
        path: &FieldPath,
        prefix: &str,
        fields: Record,
    ) -> Result<String, FolioError> {
        let (id, record) = Self::new_record(prefix, Record::new(), fields);
        self.ensure_list(path)?.push(record);
        Ok(id)
    }

    /// Shallow-merge `partial` into the record with `id`.
    ///
    /// # Errors
    ///
    /// `NotAList` if no list sits at `path`, `RecordNotFound` if no record
    /// carries `id`.
    pub fn update_record(
        &mut self,
        path: &FieldPath,
        id: &str,
        partial: Record,
    ) -> Result<(), FolioError> {
        let record = self
            .list_mut(path)?
            .iter_mut()
            .find(|item| item.record_id() == Some(id))
            .ok_or_else(|| FolioError::RecordNotFound {
                path: path.flattened(),
                id: id.to_string(),
            })?;
        merge_into(record, partial);
        Ok(())
    }

    /// Remove every record carrying `id`.
    ///
    /// # Errors
    ///
    /// `NotAList` if no list sits at `path`, `RecordNotFound` if nothing
    /// was removed.
    pub fn remove_record(&mut self, path: &FieldPath, id: &str) -> Result<(), FolioError> {
        let items = self.list_mut(path)?;
        let before = items.len();
        items.retain(|item| item.record_id() != Some(id));
        if items.len() == before {
            return Err(FolioError::RecordNotFound {
                path: path.flattened(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Swap the record with its neighbour. Returns whether anything moved;
    /// an unknown id or a move past either end is a no-op.
    ///
    /// # Errors
    ///
    /// `NotAList` if no list sits at `path`.
    pub fn move_record(
        &mut self,
        path: &FieldPath,
        id: &str,
        direction: MoveDirection,
    ) -> Result<bool, FolioError> {
        let items = self.list_mut(path)?;
        let Some(current) = items.iter().position(|item| item.record_id() == Some(id)) else {
            return Ok(false);
        };
        let next = match direction {
            MoveDirection::Up => current.checked_sub(1),
            MoveDirection::Down => Some(current + 1).filter(|n| *n < items.len()),
        };
        match next {
            Some(next) => {
                items.swap(current, next);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Append a contact entry with empty defaults.
    ///
    /// # Errors
    ///
    /// `NotAList` if `contact.entries` holds something other than a list.
    pub fn add_contact_entry(&mut self, fields: Record) -> Result<String, FolioError> {
        let (id, record) =
            Self::new_record("contact", defaults::new_contact_entry_fields(), fields);
        self.ensure_list(&FieldPath::key("contact").child_key("entries"))?
            .push(record);
        Ok(id)
    }

    /// Append a collection with default name and empty fields.
    ///
    /// # Errors
    ///
    /// `NotAList` if `collections` holds something other than a list.
    pub fn add_collection(&mut self, fields: Record) -> Result<String, FolioError> {
        let (id, record) =
            Self::new_record("collection", defaults::new_collection_fields(), fields);
        self.ensure_list(&FieldPath::key("collections"))?.push(record);
        Ok(id)
    }

    /// Insert a project at the front of the list.
    ///
    /// # Errors
    ///
    /// `NotAList` if `projects` holds something other than a list.
    pub fn add_project(&mut self, fields: Record) -> Result<String, FolioError> {
        let (id, record) = Self::new_record("project", defaults::new_project_fields(), fields);
        self.ensure_list(&FieldPath::key("projects"))?
            .insert(0, record);
        Ok(id)
    }

    /// Remove a collection and unlink projects that pointed at it.
    ///
    /// # Errors
    ///
    /// As [`ContentDocument::remove_record`] on `collections`.
    pub fn remove_collection(&mut self, id: &str) -> Result<(), FolioError> {
        self.remove_record(&FieldPath::key("collections"), id)?;
        if let Some(Node::List(projects)) = self.sections.get_mut("projects") {
            for project in projects.iter_mut().filter_map(Node::as_record_mut) {
                let linked = project.get("collectionId").and_then(Node::as_str) == Some(id);
                if linked {
                    project.insert("collectionId".to_string(), Node::Null);
                }
            }
        }
        Ok(())
    }
}
