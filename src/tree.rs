//! The structured tree output model.
//!
//! Tree mode mirrors a deliberately minimal JSON-like model: an object of
//! named fields, an ordered array, a string, or null. Numbers and booleans
//! are rendered strings, so the numeric format directives apply to tree
//! output exactly as they do to text output.
//!
//! By convention every node the engine or a formatter produces is an object
//! carrying a `"type"` label and a `"kind"` category (`"struct"` vs
//! `"class"`, `"list"`, `"circular"`, ...); reference cells additionally
//! carry an `"id"`. The helpers here build those conventional nodes.
//!
//! ## Examples
//!
//! ```rust
//! use reprs::{to_tree, Value};
//!
//! let json = to_tree(&Value::from(true)).unwrap();
//! assert_eq!(json, r#"{"type":"bool","kind":"scalar","value":"true"}"#);
//! ```

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// An ordered field map for tree objects.
pub type TreeMap = IndexMap<String, TreeNode>;

/// A node of the structured tree output.
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode {
    Null,
    Str(String),
    Array(Vec<TreeNode>),
    Object(TreeMap),
}

impl TreeNode {
    /// Starts a conventional node with its `type` and `kind` fields.
    #[must_use]
    pub fn tagged(type_name: &str, kind: &str) -> TreeBuilder {
        let mut map = TreeMap::new();
        map.insert("type".to_string(), TreeNode::Str(type_name.to_string()));
        map.insert("kind".to_string(), TreeNode::Str(kind.to_string()));
        TreeBuilder(map)
    }

    /// Returns the inner map if this node is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&TreeMap> {
        match self {
            TreeNode::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the inner string if this node is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TreeNode::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for TreeNode {
    fn from(value: String) -> Self {
        TreeNode::Str(value)
    }
}

impl From<&str> for TreeNode {
    fn from(value: &str) -> Self {
        TreeNode::Str(value.to_string())
    }
}

impl From<Vec<TreeNode>> for TreeNode {
    fn from(value: Vec<TreeNode>) -> Self {
        TreeNode::Array(value)
    }
}

/// Builder for conventional `type`/`kind`-tagged object nodes.
pub struct TreeBuilder(TreeMap);

impl TreeBuilder {
    /// Adds a field and returns the builder.
    #[must_use]
    pub fn field(mut self, name: &str, value: impl Into<TreeNode>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    /// Finishes the node.
    #[must_use]
    pub fn build(self) -> TreeNode {
        TreeNode::Object(self.0)
    }
}

impl Serialize for TreeNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TreeNode::Null => serializer.serialize_unit(),
            TreeNode::Str(s) => serializer.serialize_str(s),
            TreeNode::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            TreeNode::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl TreeNode {
    /// Writes the node as a JSON string, optionally pretty-printed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the JSON writer fails; the node model itself
    /// always serializes.
    pub fn to_json(&self, pretty: bool) -> crate::Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_builder_keeps_field_order() {
        let node = TreeNode::tagged("Point", "struct")
            .field("fields", TreeNode::Object(TreeMap::new()))
            .build();
        let json = node.to_json(false).unwrap();
        assert_eq!(json, r#"{"type":"Point","kind":"struct","fields":{}}"#);
    }

    #[test]
    fn test_null_and_array() {
        let node = TreeNode::Array(vec![TreeNode::Null, TreeNode::Str("x".to_string())]);
        assert_eq!(node.to_json(false).unwrap(), r#"[null,"x"]"#);
    }

    #[test]
    fn test_pretty_output_is_multiline() {
        let node = TreeNode::tagged("bool", "scalar")
            .field("value", "true")
            .build();
        let json = node.to_json(true).unwrap();
        assert!(json.contains('\n'));
    }
}
