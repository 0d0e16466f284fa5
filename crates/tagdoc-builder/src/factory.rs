use tagdoc_config::MarkerSyntax;
use tagdoc_model::{Attrs, MarkType, Node, NodeType, merge_attrs};

use crate::content::{Content, assemble, flatten};
use crate::error::BuildError;
use crate::markers::strip_markers;
use crate::tags::{TagTracker, TaggedContentItem, TaggedNode, Tags};

/// Turn a string into content: a text node when anything but markers
/// remains, otherwise a [`TagTracker`] holding the tags.
pub fn text(input: &str, syntax: MarkerSyntax) -> Result<TaggedContentItem, BuildError> {
    let (stripped, tags) = strip_markers(input, syntax)?;
    if stripped.is_empty() {
        return Ok(TaggedContentItem::Tracker(TagTracker::new(tags)));
    }
    Ok(TaggedContentItem::Node(TaggedNode::new(
        Node::text(stripped, Vec::new()),
        tags,
    )))
}

/// Builds nodes of one type.
#[derive(Debug, Clone)]
pub struct NodeFactory {
    node_type: NodeType,
    attrs: Attrs,
    syntax: MarkerSyntax,
}

impl NodeFactory {
    pub fn new(node_type: NodeType, syntax: MarkerSyntax) -> Self {
        Self {
            node_type,
            attrs: Attrs::new(),
            syntax,
        }
    }

    pub fn name(&self) -> &str {
        self.node_type.name()
    }

    /// A factory for the same type with `attrs` layered over the current ones.
    pub fn with_attrs(&self, attrs: Attrs) -> Self {
        Self {
            attrs: merge_attrs(&self.attrs, attrs),
            ..self.clone()
        }
    }

    pub fn build<I>(&self, content: I) -> Result<TaggedNode, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<Content>,
    {
        let mut items = Vec::new();
        flatten(content, self.syntax, &mut items)?;
        let assembled = assemble(items)?;

        if self.node_type.is_leaf() && !(assembled.nodes.is_empty() && assembled.tags.is_empty())
        {
            return Err(BuildError::LeafContent(self.name().to_string()));
        }

        let node = self.node_type.create(self.attrs.clone(), assembled.nodes);
        Ok(TaggedNode::new(node, assembled.tags))
    }
}

/// Applies one mark to content.
#[derive(Debug, Clone)]
pub struct MarkFactory {
    mark_type: MarkType,
    attrs: Attrs,
    syntax: MarkerSyntax,
}

impl MarkFactory {
    pub fn new(mark_type: MarkType, syntax: MarkerSyntax) -> Self {
        Self {
            mark_type,
            attrs: Attrs::new(),
            syntax,
        }
    }

    pub fn name(&self) -> &str {
        self.mark_type.name()
    }

    pub fn with_attrs(&self, attrs: Attrs) -> Self {
        Self {
            attrs: merge_attrs(&self.attrs, attrs),
            ..self.clone()
        }
    }

    /// Mark every inline node in `content`.
    ///
    /// The result keeps the input order. Block nodes pass through unmarked and
    /// tag-only trackers are kept so the enclosing node can place them.
    ///
    /// An existing mark of the same type is replaced, so with nested links
    /// the outer one's attributes win.
    pub fn build<I>(&self, content: I) -> Result<Vec<TaggedContentItem>, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<Content>,
    {
        let mut items = Vec::new();
        flatten(content, self.syntax, &mut items)?;

        let mut names = Tags::new();
        for item in &items {
            names.merge(item.tags().clone(), 0)?;
        }

        let mark = self.mark_type.create(self.attrs.clone());
        let marked = items
            .into_iter()
            .map(|item| match item {
                TaggedContentItem::Node(tagged) if tagged.is_inline() => {
                    let (node, tags) = tagged.into_parts();
                    let marks = mark.add_to_set(node.marks());
                    TaggedContentItem::Node(TaggedNode::new(node.with_marks(marks), tags))
                }
                other => other,
            })
            .collect();

        Ok(marked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tagdoc_model::{AttrValue, Schema, attrs};

    fn node_factory(name: &str) -> NodeFactory {
        let schema = Schema::basic();
        NodeFactory::new(
            schema.node_type(name).unwrap().clone(),
            MarkerSyntax::default(),
        )
    }

    fn mark_factory(name: &str) -> MarkFactory {
        let schema = Schema::basic();
        MarkFactory::new(
            schema.mark_type(name).unwrap().clone(),
            MarkerSyntax::default(),
        )
    }

    #[test]
    fn text_with_content_is_a_node() {
        let item = text("ab<c>d", MarkerSyntax::default()).unwrap();

        let node = item.as_node().unwrap();
        assert_eq!(node.text_str(), Some("abd"));
        assert_eq!(node.tag("c"), Some(2));
    }

    #[test]
    fn text_of_only_markers_is_a_tracker() {
        let item = text("<a><b>", MarkerSyntax::default()).unwrap();

        assert!(item.is_tracker());
        assert_eq!(item.tags(), &Tags::from([("a", 0), ("b", 0)]));
    }

    #[test]
    fn with_attrs_layers_over_defaults() {
        let heading = node_factory("heading").with_attrs(attrs! { "level" => 3 });
        let node = heading.build(["Title"]).unwrap();

        assert_eq!(node.attrs()["level"], AttrValue::Int(3));
        assert_eq!(heading.name(), "heading");
    }

    #[test]
    fn leaf_rejects_content() {
        let hr = node_factory("horizontal_rule");

        assert!(hr.build(crate::content![]).is_ok());
        assert!(matches!(
            hr.build(["oops"]),
            Err(BuildError::LeafContent(name)) if name == "horizontal_rule"
        ));
        assert!(matches!(
            hr.build(["<cursor>"]),
            Err(BuildError::LeafContent(_))
        ));
    }

    #[test]
    fn mark_applies_to_inline_nodes_only() {
        let em = mark_factory("em");
        let paragraph = node_factory("paragraph").build(["block"]).unwrap();

        let items = em
            .build(crate::content!["one<a>", "<b>", paragraph])
            .unwrap();

        assert_eq!(items.len(), 3);
        let first = items[0].as_node().unwrap();
        assert_eq!(first.marks().len(), 1);
        assert_eq!(first.marks()[0].name(), "em");
        assert_eq!(first.tag("a"), Some(3));
        assert!(items[1].is_tracker());
        assert!(items[2].as_node().unwrap().marks().is_empty());
    }

    #[test]
    fn mark_rejects_duplicate_tags() {
        let em = mark_factory("em");
        let result = em.build(["<x>a", "b<x>"]);

        assert!(matches!(result, Err(BuildError::DuplicateTag { .. })));
    }

    #[test]
    fn mark_attrs_reach_the_mark() {
        let link = mark_factory("link").with_attrs(attrs! { "href" => "https://example.com" });
        let items = link.build(["site"]).unwrap();

        let mark = &items[0].as_node().unwrap().marks()[0];
        assert_eq!(
            mark.attrs()["href"],
            AttrValue::Str("https://example.com".into())
        );
        assert_eq!(mark.attrs()["title"], AttrValue::Null);
    }

    #[test]
    fn outer_link_replaces_inner() {
        let link = mark_factory("link");
        let inner = link
            .with_attrs(attrs! { "href" => "a" })
            .build(["x"])
            .unwrap();
        let items = link.with_attrs(attrs! { "href" => "b" }).build(inner).unwrap();

        let marks = items[0].as_node().unwrap().marks();
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].attrs()["href"], AttrValue::Str("b".into()));
    }
}
