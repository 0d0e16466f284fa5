use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attrs::{Attrs, merge_attrs};
use crate::mark::Mark;
use crate::node::Node;

/// Name of the node type that carries text.
pub const TEXT_NODE: &str = "text";

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Type `{0}` is declared more than once")]
    DuplicateType(String),

    #[error("Schema does not declare the `text` node type")]
    MissingTextType,

    #[error("Top node type `{0}` is not declared")]
    MissingTopNode(String),

    #[error("Failed to parse schema: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Declaration of a node type, as written in a schema file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    #[serde(default)]
    pub inline: bool,
    /// Leaf nodes have no content and occupy a single position.
    #[serde(default)]
    pub leaf: bool,
    /// Default attribute values, overridden per instance.
    #[serde(default)]
    pub attrs: Attrs,
}

/// Declaration of a mark type. Declaration order is the mark's rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkSpec {
    pub name: String,
    #[serde(default)]
    pub attrs: Attrs,
}

/// Serializable schema description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaSpec {
    #[serde(default = "default_top_node")]
    pub top_node: String,
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub marks: Vec<MarkSpec>,
}

fn default_top_node() -> String {
    "doc".to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeType {
    name: String,
    inline: bool,
    leaf: bool,
    default_attrs: Attrs,
}

impl NodeType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_text(&self) -> bool {
        self.name == TEXT_NODE
    }

    pub fn is_inline(&self) -> bool {
        self.inline || self.is_text()
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    pub fn default_attrs(&self) -> &Attrs {
        &self.default_attrs
    }

    /// Create a non-text node of this type. Attributes are merged over the defaults.
    pub fn create(&self, attrs: Attrs, content: Vec<Node>) -> Node {
        Node::element(self, merge_attrs(&self.default_attrs, attrs), content)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkType {
    name: String,
    rank: usize,
    default_attrs: Attrs,
}

impl MarkType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn default_attrs(&self) -> &Attrs {
        &self.default_attrs
    }

    pub fn create(&self, attrs: Attrs) -> Mark {
        Mark::new(self, merge_attrs(&self.default_attrs, attrs))
    }
}

/// The set of node and mark types a document may use.
///
/// This is deliberately small: it knows names, inline/leaf flags and default
/// attributes. Content expressions are not modelled.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    top_node: String,
    nodes: Vec<NodeType>,
    marks: Vec<MarkType>,
}

impl Schema {
    pub fn from_spec(spec: SchemaSpec) -> Result<Self, SchemaError> {
        if let Some(name) = first_duplicate(&spec) {
            return Err(SchemaError::DuplicateType(name));
        }

        if !spec.nodes.iter().any(|n| n.name == TEXT_NODE) {
            return Err(SchemaError::MissingTextType);
        }
        if !spec.nodes.iter().any(|n| n.name == spec.top_node) {
            return Err(SchemaError::MissingTopNode(spec.top_node));
        }

        Ok(Self::assemble(spec))
    }

    /// Parse a schema from TOML:
    ///
    /// ```toml
    /// top_node = "doc"
    ///
    /// [[nodes]]
    /// name = "doc"
    ///
    /// [[nodes]]
    /// name = "text"
    ///
    /// [[marks]]
    /// name = "em"
    /// ```
    pub fn from_toml_str(input: &str) -> Result<Self, SchemaError> {
        let spec: SchemaSpec = toml::from_str(input)?;
        Self::from_spec(spec)
    }

    fn assemble(spec: SchemaSpec) -> Self {
        let nodes = spec
            .nodes
            .into_iter()
            .map(|n| NodeType {
                name: n.name,
                inline: n.inline,
                leaf: n.leaf,
                default_attrs: n.attrs,
            })
            .collect();
        let marks = spec
            .marks
            .into_iter()
            .enumerate()
            .map(|(rank, m)| MarkType {
                name: m.name,
                rank,
                default_attrs: m.attrs,
            })
            .collect();

        Self {
            top_node: spec.top_node,
            nodes,
            marks,
        }
    }

    /// A small schema covering the usual block and inline types.
    pub fn basic() -> Self {
        Self::assemble(basic_spec())
    }

    pub fn node_type(&self, name: &str) -> Option<&NodeType> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn mark_type(&self, name: &str) -> Option<&MarkType> {
        self.marks.iter().find(|m| m.name == name)
    }

    pub fn node_types(&self) -> impl Iterator<Item = &NodeType> {
        self.nodes.iter()
    }

    pub fn mark_types(&self) -> impl Iterator<Item = &MarkType> {
        self.marks.iter()
    }

    pub fn top_node(&self) -> &str {
        &self.top_node
    }
}

fn first_duplicate(spec: &SchemaSpec) -> Option<String> {
    let mut seen = HashSet::new();
    spec.nodes
        .iter()
        .map(|n| &n.name)
        .chain(spec.marks.iter().map(|m| &m.name))
        .find(|name| !seen.insert(name.as_str()))
        .cloned()
}

fn node(name: &str, inline: bool, leaf: bool, attrs: Attrs) -> NodeSpec {
    NodeSpec {
        name: name.to_string(),
        inline,
        leaf,
        attrs,
    }
}

fn mark(name: &str, attrs: Attrs) -> MarkSpec {
    MarkSpec {
        name: name.to_string(),
        attrs,
    }
}

fn basic_spec() -> SchemaSpec {
    SchemaSpec {
        top_node: default_top_node(),
        nodes: vec![
            node("doc", false, false, Attrs::new()),
            node("paragraph", false, false, Attrs::new()),
            node("blockquote", false, false, Attrs::new()),
            node("horizontal_rule", false, true, Attrs::new()),
            node("heading", false, false, crate::attrs! { "level" => 1 }),
            node(
                "code_block",
                false,
                false,
                crate::attrs! { "language" => None::<&str> },
            ),
            node(TEXT_NODE, true, false, Attrs::new()),
            node(
                "image",
                true,
                true,
                crate::attrs! { "src" => "", "alt" => None::<&str>, "title" => None::<&str> },
            ),
            node("hard_break", true, true, Attrs::new()),
        ],
        marks: vec![
            mark(
                "link",
                crate::attrs! { "href" => "", "title" => None::<&str> },
            ),
            mark("em", Attrs::new()),
            mark("strong", Attrs::new()),
            mark("code", Attrs::new()),
        ],
    }
}
