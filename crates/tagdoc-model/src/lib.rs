//! # tagdoc-model
//!
//! The small document model that tagdoc builders produce: a [`Schema`] of
//! declared node and mark types, [`Node`] trees and [`Mark`] sets.
//!
//! It is not an editor. There is no content validation and no transaction
//! machinery, only what is needed to assemble documents and count positions.

pub mod attrs;
pub mod mark;
pub mod node;
pub mod schema;

pub use attrs::{AttrValue, Attrs, merge_attrs};
pub use mark::Mark;
pub use node::{Node, join_adjacent_text};
pub use schema::{MarkSpec, MarkType, NodeSpec, NodeType, Schema, SchemaError, SchemaSpec, TEXT_NODE};
