use std::fmt;

use crate::attrs::Attrs;
use crate::mark::Mark;
use crate::schema::NodeType;

static NO_ATTRS: Attrs = Attrs::new();

/// A document node.
///
/// Sizes follow the usual rich-text position model: a text node is as long
/// as its text (in chars), a leaf occupies one position, and any other node
/// takes its content size plus two for its opening and closing boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text {
        text: String,
        marks: Vec<Mark>,
    },
    Element {
        name: String,
        attrs: Attrs,
        content: Vec<Node>,
        marks: Vec<Mark>,
        inline: bool,
        leaf: bool,
    },
}

impl Node {
    /// Text nodes must not be empty; callers are expected to check before creating one.
    pub fn text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text {
            text: text.into(),
            marks,
        }
    }

    pub(crate) fn element(node_type: &NodeType, attrs: Attrs, content: Vec<Node>) -> Self {
        Node::Element {
            name: node_type.name().to_string(),
            attrs,
            content: join_adjacent_text(content),
            marks: Vec::new(),
            inline: node_type.is_inline(),
            leaf: node_type.is_leaf(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Text { .. } => crate::schema::TEXT_NODE,
            Node::Element { name, .. } => name,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text { .. })
    }

    pub fn is_inline(&self) -> bool {
        match self {
            Node::Text { .. } => true,
            Node::Element { inline, .. } => *inline,
        }
    }

    pub fn is_leaf(&self) -> bool {
        match self {
            Node::Text { .. } => true,
            Node::Element { leaf, .. } => *leaf,
        }
    }

    pub fn text_str(&self) -> Option<&str> {
        match self {
            Node::Text { text, .. } => Some(text),
            Node::Element { .. } => None,
        }
    }

    pub fn attrs(&self) -> &Attrs {
        match self {
            Node::Text { .. } => &NO_ATTRS,
            Node::Element { attrs, .. } => attrs,
        }
    }

    pub fn marks(&self) -> &[Mark] {
        match self {
            Node::Text { marks, .. } | Node::Element { marks, .. } => marks,
        }
    }

    pub fn content(&self) -> &[Node] {
        match self {
            Node::Text { .. } => &[],
            Node::Element { content, .. } => content,
        }
    }

    /// Replace this node's mark set.
    pub fn with_marks(mut self, new_marks: Vec<Mark>) -> Self {
        match &mut self {
            Node::Text { marks, .. } | Node::Element { marks, .. } => *marks = new_marks,
        }
        self
    }

    /// Number of positions this node occupies in its parent.
    pub fn node_size(&self) -> usize {
        match self {
            Node::Text { text, .. } => text.chars().count(),
            Node::Element { leaf: true, .. } => 1,
            Node::Element { .. } => self.content_size() + 2,
        }
    }

    /// Number of positions inside this node.
    pub fn content_size(&self) -> usize {
        self.content().iter().map(Node::node_size).sum()
    }

    /// All text in this node and its descendants, concatenated.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text { text, .. } => text.clone(),
            Node::Element { content, .. } => content.iter().map(Node::text_content).collect(),
        }
    }

    fn same_text_markup(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Text { marks: a, .. }, Node::Text { marks: b, .. }) => a == b,
            _ => false,
        }
    }
}

/// Merge neighbouring text nodes that carry the same marks and drop empty text.
pub fn join_adjacent_text(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if node.text_str().is_some_and(str::is_empty) {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.same_text_markup(&node) => {
                if let (Node::Text { text, .. }, Node::Text { text: more, .. }) = (last, node) {
                    text.push_str(&more);
                }
            }
            _ => out.push(node),
        }
    }
    out
}

impl fmt::Display for Node {
    /// Compact form such as `doc(paragraph("Hello ", em("world")))`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = match self {
            Node::Text { text, .. } => format!("{text:?}"),
            Node::Element { name, content, .. } if content.is_empty() => name.clone(),
            Node::Element { name, content, .. } => {
                let children: Vec<String> = content.iter().map(ToString::to_string).collect();
                format!("{name}({})", children.join(", "))
            }
        };
        let wrapped = self
            .marks()
            .iter()
            .rev()
            .fold(inner, |acc, mark| format!("{}({acc})", mark.name()));
        f.write_str(&wrapped)
    }
}
