//! Trees that selections are evaluated against.
//!
//! The engine only ever reads a tree through [`TreeNode`], so callers can
//! plug in their own node representation. [`Node`] is the owned
//! implementation used by tests and by collaborators that load trees from
//! JSON.

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

/// Read-only view of a labeled, attributed tree node.
///
/// Implementations must describe a proper tree: a node is reachable from
/// exactly one parent and `children` never leads back to an ancestor.
pub trait TreeNode {
    /// Node label, compared by name predicates.
    fn name(&self) -> &str;

    /// Whether the node carries the given attribute, regardless of its value.
    fn has_attribute(&self, name: &str) -> bool;

    /// Children in document order.
    fn children(&self) -> &[Self]
    where
        Self: Sized;
}

/// Owned tree node with ordered attributes.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, keeping the position of an existing key.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_size).sum::<usize>()
    }
}

impl TreeNode for Node {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

/// One-line form: `dir(name="tlang")`. Children are not rendered.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.attributes.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, (key, value)) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str(")")
    }
}
