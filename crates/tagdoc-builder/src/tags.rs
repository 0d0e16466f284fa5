//! Tag maps and the two shapes tagged content can take.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

use tagdoc_model::Node;

use crate::error::BuildError;

/// Named positions, relative to the start of the owning node's content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(BTreeMap<String, usize>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(name, pos)| (name.as_str(), *pos))
    }

    pub fn insert(&mut self, name: impl Into<String>, pos: usize) -> Result<(), BuildError> {
        let name = name.into();
        if self.0.contains_key(&name) {
            return Err(BuildError::DuplicateTag { name });
        }
        self.0.insert(name, pos);
        Ok(())
    }

    /// Fold `other` into this map, moving each of its positions by `offset`.
    pub fn merge(&mut self, other: Tags, offset: usize) -> Result<(), BuildError> {
        for (name, pos) in other.0 {
            self.insert(name, pos + offset)?;
        }
        Ok(())
    }

    pub fn shifted(&self, offset: usize) -> Tags {
        Tags(
            self.0
                .iter()
                .map(|(name, pos)| (name.clone(), pos + offset))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, usize); N]> for Tags {
    fn from(entries: [(&str, usize); N]) -> Self {
        Tags(
            entries
                .into_iter()
                .map(|(name, pos)| (name.to_string(), pos))
                .collect(),
        )
    }
}

/// A node together with every tag found in it or its descendants.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedNode {
    node: Node,
    tags: Tags,
}

impl TaggedNode {
    pub fn new(node: Node, tags: Tags) -> Self {
        Self { node, tags }
    }

    pub fn untagged(node: Node) -> Self {
        Self::new(node, Tags::new())
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn tag(&self, name: &str) -> Option<usize> {
        self.tags.get(name)
    }

    /// Drop the tags, keeping the plain node.
    pub fn into_node(self) -> Node {
        self.node
    }

    pub fn into_parts(self) -> (Node, Tags) {
        (self.node, self.tags)
    }
}

impl Deref for TaggedNode {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.node
    }
}

impl fmt::Display for TaggedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.node, f)
    }
}

/// Tags from a string that was nothing but markers.
///
/// Text nodes cannot be empty, so `"<cursor>"` has no node to hang its tag
/// on. The tracker carries the tags until the enclosing builder folds them
/// in at the right position. It never ends up in a finished tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTracker {
    tags: Tags,
}

impl TagTracker {
    pub fn new(tags: Tags) -> Self {
        Self { tags }
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn into_tags(self) -> Tags {
        self.tags
    }
}

/// Output of the text and mark factories.
#[derive(Debug, Clone, PartialEq)]
pub enum TaggedContentItem {
    Node(TaggedNode),
    Tracker(TagTracker),
}

impl TaggedContentItem {
    pub fn tags(&self) -> &Tags {
        match self {
            TaggedContentItem::Node(node) => node.tags(),
            TaggedContentItem::Tracker(tracker) => tracker.tags(),
        }
    }

    pub fn as_node(&self) -> Option<&TaggedNode> {
        match self {
            TaggedContentItem::Node(node) => Some(node),
            TaggedContentItem::Tracker(_) => None,
        }
    }

    pub fn is_tracker(&self) -> bool {
        matches!(self, TaggedContentItem::Tracker(_))
    }
}
