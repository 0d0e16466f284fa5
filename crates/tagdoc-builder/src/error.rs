use std::path::PathBuf;

use tagdoc_config::ConfigError;
use tagdoc_model::SchemaError;

/// Errors raised while building tagged content.
///
/// All of them point at a mistake in the test input; none are recoverable.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Unterminated tag marker at char {offset} in {input:?}")]
    MalformedTag { input: String, offset: usize },

    #[error("Tag `{name}` is declared more than once")]
    DuplicateTag { name: String },

    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    #[error("Unknown mark type: {0}")]
    UnknownMarkType(String),

    #[error("Leaf node `{0}` cannot hold content or tags")]
    LeafContent(String),

    #[error("Failed to read schema at {path}: {source}")]
    SchemaRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Tag `{tag}` needs a matching `{requires}` tag")]
    UnpairedTag {
        tag: &'static str,
        requires: &'static str,
    },

    #[error("Tag `{tag}` at {pos} is outside the document (size {size})")]
    OutOfRange {
        tag: &'static str,
        pos: usize,
        size: usize,
    },
}
