//! # tagdoc-builder
//!
//! Declarative document builders for editor tests, with position tags.
//!
//! Content strings may contain markers such as `<cursor>`. Builders strip
//! the markers, build the tree, and report where every marker ended up,
//! relative to the content of each node on the way up:
//!
//! ```
//! use tagdoc_builder::{content, Builders};
//! use tagdoc_model::Schema;
//!
//! let b = Builders::new(Schema::basic());
//! let p = b.node("paragraph")?.build(["Hello ", "<cursor>", "world!"])?;
//! assert_eq!(p.text_content(), "Hello world!");
//! assert_eq!(p.tag("cursor"), Some(6));
//!
//! let doc = b.doc(content![p])?;
//! assert_eq!(doc.tag("cursor"), Some(7));
//! # Ok::<(), tagdoc_builder::BuildError>(())
//! ```
//!
//! ## Tag trackers
//!
//! Text nodes cannot be empty, so a string made only of markers (`"<cursor>"`)
//! becomes a [`TagTracker`]: tags with no node. The enclosing builder folds
//! its tags in at the current position and drops it.
//!
//! ## Modules
//!
//! - [`markers`] - marker stripping
//! - [`tags`] - tag maps, tagged nodes and trackers
//! - [`content`] - builder input and position bookkeeping
//! - [`factory`] - `text`, node and mark factories
//! - [`builders`] - the name → factory table for a schema
//! - [`selection`] - initial selection from `<cursor>`, `<start>`... tags

pub mod builders;
pub mod content;
pub mod error;
pub mod factory;
pub mod markers;
pub mod selection;
pub mod tags;

pub use builders::Builders;
pub use content::Content;
pub use error::{BuildError, SelectionError};
pub use factory::{MarkFactory, NodeFactory, text};
pub use markers::strip_markers;
pub use selection::{TaggedSelection, selection_from_tags};
pub use tags::{TagTracker, TaggedContentItem, TaggedNode, Tags};
pub use tagdoc_config::MarkerSyntax;
