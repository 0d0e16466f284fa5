//! Builder input and the walk that turns it into child nodes plus tags.

use log::trace;
use tagdoc_config::MarkerSyntax;
use tagdoc_model::Node;

use crate::error::BuildError;
use crate::factory::text;
use crate::tags::{TagTracker, TaggedContentItem, TaggedNode, Tags};

/// One unit of input to a node or mark builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Text, possibly containing tag markers.
    Text(String),
    /// A node without tags.
    Node(Node),
    Tagged(TaggedContentItem),
    Seq(Vec<Content>),
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::Text(value.to_string())
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::Text(value)
    }
}

impl From<Node> for Content {
    fn from(value: Node) -> Self {
        Content::Node(value)
    }
}

impl From<TaggedNode> for Content {
    fn from(value: TaggedNode) -> Self {
        Content::Tagged(TaggedContentItem::Node(value))
    }
}

impl From<TagTracker> for Content {
    fn from(value: TagTracker) -> Self {
        Content::Tagged(TaggedContentItem::Tracker(value))
    }
}

impl From<TaggedContentItem> for Content {
    fn from(value: TaggedContentItem) -> Self {
        Content::Tagged(value)
    }
}

impl<T: Into<Content>> From<Vec<T>> for Content {
    fn from(value: Vec<T>) -> Self {
        Content::Seq(value.into_iter().map(Into::into).collect())
    }
}

/// Collect mixed builder input into a `Vec<Content>`.
///
/// ```
/// use tagdoc_builder::{content, Builders};
/// use tagdoc_model::Schema;
///
/// let b = Builders::new(Schema::basic());
/// let p = b.node("paragraph").unwrap();
/// let em = b.mark("em").unwrap();
///
/// let node = p
///     .build(content!["Hello ", em.build(content!["<cursor>world"]).unwrap(), "!"])
///     .unwrap();
/// assert_eq!(node.tag("cursor"), Some(6));
/// ```
#[macro_export]
macro_rules! content {
    () => {
        ::std::vec::Vec::<$crate::Content>::new()
    };
    ($($item:expr),+ $(,)?) => {
        ::std::vec![$($crate::Content::from($item)),+]
    };
}

/// Flatten nested input into tagged items, stripping markers from strings.
pub(crate) fn flatten<I>(
    items: I,
    syntax: MarkerSyntax,
    out: &mut Vec<TaggedContentItem>,
) -> Result<(), BuildError>
where
    I: IntoIterator,
    I::Item: Into<Content>,
{
    for item in items {
        match item.into() {
            Content::Text(s) => out.push(text(&s, syntax)?),
            Content::Node(node) => out.push(TaggedContentItem::Node(TaggedNode::untagged(node))),
            Content::Tagged(item) => out.push(item),
            Content::Seq(seq) => flatten(seq, syntax, out)?,
        }
    }
    Ok(())
}

/// Child nodes of a node under construction and the tags in its coordinates.
#[derive(Debug, Default)]
pub(crate) struct Assembled {
    pub nodes: Vec<Node>,
    pub tags: Tags,
}

/// Lay items out one after another, moving each item's tags into the
/// parent's coordinate space.
///
/// Text tags are offsets into the text, so they shift by the text's start.
/// Any other node's tags are relative to its content, which begins one past
/// its start. Trackers occupy no space.
pub(crate) fn assemble(items: Vec<TaggedContentItem>) -> Result<Assembled, BuildError> {
    let mut out = Assembled::default();
    let mut position = 0;

    for item in items {
        match item {
            TaggedContentItem::Node(tagged) => {
                let (node, tags) = tagged.into_parts();
                let shift = if node.is_text() { position } else { position + 1 };
                trace!(
                    "placing {} at {position} with {} tag(s)",
                    node.name(),
                    tags.len()
                );
                out.tags.merge(tags, shift)?;
                position += node.node_size();
                out.nodes.push(node);
            }
            TaggedContentItem::Tracker(tracker) => {
                trace!("folding {} tracked tag(s) at {position}", tracker.tags().len());
                out.tags.merge(tracker.into_tags(), position)?;
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tagdoc_model::{Attrs, Schema};

    fn items(content: Vec<Content>) -> Vec<TaggedContentItem> {
        let mut out = Vec::new();
        flatten(content, MarkerSyntax::default(), &mut out).unwrap();
        out
    }

    #[test]
    fn flatten_walks_nested_sequences() {
        let flat = items(crate::content!["a", vec!["<x>", "b"], vec![vec!["c"]]]);

        assert_eq!(flat.len(), 4);
        assert!(flat[1].is_tracker());
        assert_eq!(flat[3].as_node().and_then(|n| n.text_str()), Some("c"));
    }

    #[test]
    fn assemble_shifts_text_and_trackers_by_position() {
        let assembled = assemble(items(crate::content!["ab", "<x>", "c<y>d"])).unwrap();

        assert_eq!(assembled.nodes.len(), 2);
        assert_eq!(assembled.tags.get("x"), Some(2));
        assert_eq!(assembled.tags.get("y"), Some(3));
    }

    #[test]
    fn assemble_enters_non_text_nodes() {
        let schema = Schema::basic();
        let paragraph = schema.node_type("paragraph").unwrap();
        let inner = TaggedNode::new(
            paragraph.create(Attrs::new(), vec![Node::text("xyz", vec![])]),
            Tags::from([("inside", 1)]),
        );

        let assembled = assemble(items(crate::content![
            paragraph.create(Attrs::new(), vec![Node::text("ab", vec![])]),
            inner,
            "<after>"
        ]))
        .unwrap();

        // first paragraph occupies 0..4, second starts at 4 and its content at 5
        assert_eq!(assembled.tags.get("inside"), Some(6));
        assert_eq!(assembled.tags.get("after"), Some(9));
    }

    #[test]
    fn assemble_rejects_sibling_duplicates() {
        let result = assemble(items(crate::content!["<cursor>", "<cursor>"]));
        assert!(matches!(result, Err(BuildError::DuplicateTag { .. })));
    }
}
