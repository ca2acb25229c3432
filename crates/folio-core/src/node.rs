//! Content node model.
//!
//! The content document is schemaless JSON. [`Node`] is its tagged-union
//! form: every consumer matches on the variant instead of probing runtime
//! types. Record keys keep insertion order, which is what the diff engine
//! reports in and what canonical serialization compares on.

use crate::path::{FieldPath, PathSegment};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Ordered key → node map used for records.
pub type Record = IndexMap<String, Node>;

/// One value in the content document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Node>),
    Record(Record),
}

impl Node {
    /// Empty record node.
    pub fn record() -> Self {
        Node::Record(Record::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Node::List(_))
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Node::Record(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Node::Record(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Node::Record(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a record key. Non-records have no keys.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_record().and_then(|map| map.get(key))
    }

    /// The `id` string of a record, if present.
    pub fn record_id(&self) -> Option<&str> {
        self.get("id").and_then(Node::as_str)
    }

    /// Follow a field path down the tree.
    ///
    /// A key segment applied to a list selects by position when the key is
    /// numeric, otherwise by the `id` of the contained records. This lets
    /// flattened override keys (`about.stats.<id>.label`) address values.
    pub fn get_path(&self, path: &FieldPath) -> Option<&Node> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| match (node, segment) {
                (Node::Record(map), PathSegment::Key(key)) => map.get(key),
                (Node::List(items), PathSegment::Index(index)) => items.get(*index),
                (Node::List(items), PathSegment::Key(key)) => match key.parse::<usize>() {
                    Ok(index) => items.get(index),
                    Err(_) => items.iter().find(|item| item.record_id() == Some(key)),
                },
                _ => None,
            })
    }

    /// Serialization used for cheap whole-section comparison.
    ///
    /// Key order is significant. Integral floats print as integers, so
    /// `1.0` and `1` serialize the same way.
    pub fn canonical(&self) -> String {
        canonical_value(self).to_string()
    }

    /// Short name of the variant, used in log fields.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "bool",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::List(_) => "list",
            Node::Record(_) => "record",
        }
    }
}

/// Structural equality.
///
/// Numbers compare by value (`1 == 1.0`); record comparison ignores key
/// order.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Null, Node::Null) => true,
            (Node::Bool(a), Node::Bool(b)) => a == b,
            (Node::Number(a), Node::Number(b)) => numbers_equal(a, b),
            (Node::String(a), Node::String(b)) => a == b,
            (Node::List(a), Node::List(b)) => a == b,
            (Node::Record(a), Node::Record(b)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            _ => false,
        }
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x == y,
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => a == b,
        },
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(n),
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::List(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => {
                Node::Record(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(b),
            Node::Number(n) => Value::Number(n),
            Node::String(s) => Value::String(s),
            Node::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Node::Record(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

fn canonical_value(node: &Node) -> Value {
    match node {
        Node::Number(n) => Value::Number(canonical_number(n)),
        Node::List(items) => Value::Array(items.iter().map(canonical_value).collect()),
        Node::Record(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), canonical_value(v)))
                .collect(),
        ),
        other => Value::from(other.clone()),
    }
}

fn canonical_number(n: &Number) -> Number {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 9.0e15 => {
            Number::from(f as i64)
        }
        _ => n.clone(),
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Number(n.into())
    }
}

impl From<Record> for Node {
    fn from(map: Record) -> Self {
        Node::Record(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_key_order_survives_parse() {
        let node: Node = serde_json::from_str(r#"{"zeta":1,"alpha":2,"mid":3}"#).unwrap();
        let keys: Vec<&str> = node
            .as_record()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_integer_and_float_compare_equal() {
        assert_eq!(Node::from(json!(1)), Node::from(json!(1.0)));
        assert_ne!(Node::from(json!(1)), Node::from(json!(1.5)));
    }

    #[test]
    fn test_record_equality_ignores_key_order() {
        let a = Node::from(json!({"a": 1, "b": 2}));
        let b = Node::from(json!({"b": 2, "a": 1}));
        assert_eq!(a, b);
        assert_ne!(a.canonical(), b.canonical());
    }

    #[test]
    fn test_canonical_prints_integral_floats_as_integers() {
        assert_eq!(Node::from(json!(1.0)).canonical(), "1");
        assert_eq!(Node::from(json!(-0.0)).canonical(), "0");
        assert_eq!(Node::from(json!(2.5)).canonical(), "2.5");
        assert_eq!(
            Node::from(json!({"n": [3.0, 4]})).canonical(),
            Node::from(json!({"n": [3, 4]})).canonical()
        );
    }

    #[test]
    fn test_get_path_resolves_record_ids_inside_lists() {
        let doc = Node::from(json!({
            "about": {"stats": [
                {"id": "stat-1", "label": "Runway capsules"},
                {"id": "stat-2", "label": "Covers"}
            ]}
        }));
        let by_id = FieldPath::parse_flattened("about.stats.stat-2.label");
        let by_pos = FieldPath::parse_flattened("about.stats.0.label");
        assert_eq!(doc.get_path(&by_id), Some(&Node::from("Covers")));
        assert_eq!(doc.get_path(&by_pos), Some(&Node::from("Runway capsules")));
    }

    #[test]
    fn test_get_path_through_scalar_is_none() {
        let doc = Node::from(json!({"home": {"title": "x"}}));
        let path = FieldPath::parse_flattened("home.title.deeper");
        assert!(doc.get_path(&path).is_none());
    }
}
