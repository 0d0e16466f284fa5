//! Reading an initial selection out of a tagged document.

use crate::error::SelectionError;
use crate::tags::TaggedNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaggedSelection {
    /// The whole document.
    All,
    /// The node starting at `pos`.
    Node { pos: usize },
    /// A text range; `anchor == head` for a plain cursor.
    Text { anchor: usize, head: usize },
}

impl TaggedSelection {
    pub fn cursor(pos: usize) -> Self {
        TaggedSelection::Text {
            anchor: pos,
            head: pos,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TaggedSelection::Text { anchor, head } if anchor == head)
    }
}

/// Derive the selection a tagged document asks for.
///
/// Checked in order: `<all>`, `<node>`, `<cursor>`, `<start>`/`<end>`,
/// `<anchor>`/`<head>`. The first one present wins. Without any of them the
/// document has no selection.
pub fn selection_from_tags(doc: &TaggedNode) -> Result<Option<TaggedSelection>, SelectionError> {
    let size = doc.content_size();
    let tag = |name: &'static str| -> Result<Option<usize>, SelectionError> {
        match doc.tag(name) {
            Some(pos) if pos > size => Err(SelectionError::OutOfRange { tag: name, pos, size }),
            found => Ok(found),
        }
    };

    if tag("all")?.is_some() {
        return Ok(Some(TaggedSelection::All));
    }

    if let Some(pos) = tag("node")? {
        if pos == size {
            return Err(SelectionError::OutOfRange {
                tag: "node",
                pos,
                size,
            });
        }
        return Ok(Some(TaggedSelection::Node { pos }));
    }

    if let Some(pos) = tag("cursor")? {
        return Ok(Some(TaggedSelection::cursor(pos)));
    }

    for (from, to) in [("start", "end"), ("anchor", "head")] {
        match (tag(from)?, tag(to)?) {
            (Some(anchor), head) => {
                return Ok(Some(TaggedSelection::Text {
                    anchor,
                    head: head.unwrap_or(anchor),
                }));
            }
            (None, Some(_)) => {
                return Err(SelectionError::UnpairedTag {
                    tag: to,
                    requires: from,
                });
            }
            (None, None) => {}
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::Tags;
    use crate::{Builders, content};
    use pretty_assertions::assert_eq;
    use tagdoc_model::Schema;

    fn doc(paragraph_text: &str) -> TaggedNode {
        let b = Builders::new(Schema::basic());
        let p = b.node("paragraph").unwrap().build([paragraph_text]).unwrap();
        b.doc(content![p]).unwrap()
    }

    #[test]
    fn cursor_is_collapsed() {
        let selection = selection_from_tags(&doc("ab<cursor>c")).unwrap();

        assert_eq!(selection, Some(TaggedSelection::cursor(3)));
        assert!(selection.unwrap().is_empty());
    }

    #[test]
    fn start_end_range() {
        let selection = selection_from_tags(&doc("<start>abc<end>")).unwrap();
        assert_eq!(
            selection,
            Some(TaggedSelection::Text { anchor: 1, head: 4 })
        );
    }

    #[test]
    fn head_before_anchor_is_kept() {
        let selection = selection_from_tags(&doc("<head>abc<anchor>")).unwrap();
        assert_eq!(
            selection,
            Some(TaggedSelection::Text { anchor: 4, head: 1 })
        );
    }

    #[test]
    fn start_without_end_collapses() {
        let selection = selection_from_tags(&doc("a<start>b")).unwrap();
        assert_eq!(selection, Some(TaggedSelection::cursor(2)));
    }

    #[test]
    fn all_wins_over_cursor() {
        let selection = selection_from_tags(&doc("<all>a<cursor>")).unwrap();
        assert_eq!(selection, Some(TaggedSelection::All));
    }

    #[test]
    fn node_selection_before_paragraph() {
        let b = Builders::new(Schema::basic());
        let p = b.node("paragraph").unwrap().build(["x"]).unwrap();
        let d = b.doc(content!["<node>", p]).unwrap();

        assert_eq!(
            selection_from_tags(&d).unwrap(),
            Some(TaggedSelection::Node { pos: 0 })
        );
    }

    #[test]
    fn node_at_end_is_out_of_range() {
        let b = Builders::new(Schema::basic());
        let p = b.node("paragraph").unwrap().build(["x"]).unwrap();
        let d = b.doc(content![p, "<node>"]).unwrap();

        assert_eq!(
            selection_from_tags(&d),
            Err(SelectionError::OutOfRange {
                tag: "node",
                pos: 3,
                size: 3
            })
        );
    }

    #[test]
    fn end_without_start_is_unpaired() {
        assert_eq!(
            selection_from_tags(&doc("abc<end>")),
            Err(SelectionError::UnpairedTag {
                tag: "end",
                requires: "start"
            })
        );
    }

    #[test]
    fn head_without_anchor_is_unpaired() {
        assert_eq!(
            selection_from_tags(&doc("ab<head>c")),
            Err(SelectionError::UnpairedTag {
                tag: "head",
                requires: "anchor"
            })
        );
    }

    #[test]
    fn cursor_past_content_is_out_of_range() {
        let d = doc("abc");
        let stray = TaggedNode::new(d.node().clone(), Tags::from([("cursor", 99)]));

        assert_eq!(
            selection_from_tags(&stray),
            Err(SelectionError::OutOfRange {
                tag: "cursor",
                pos: 99,
                size: 5
            })
        );
    }

    #[test]
    fn cursor_at_content_end_is_allowed() {
        let d = doc("abc");
        let end = TaggedNode::new(d.node().clone(), Tags::from([("cursor", 5)]));

        assert_eq!(
            selection_from_tags(&end).unwrap(),
            Some(TaggedSelection::cursor(5))
        );
    }

    #[test]
    fn no_selection_tags() {
        assert_eq!(selection_from_tags(&doc("<other>text")).unwrap(), None);
    }
}
