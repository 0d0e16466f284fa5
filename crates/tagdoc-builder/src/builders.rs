use std::collections::BTreeMap;

use log::debug;
use tagdoc_config::{Config, MarkerSyntax};
use tagdoc_model::Schema;

use crate::content::Content;
use crate::error::BuildError;
use crate::factory::{MarkFactory, NodeFactory, text};
use crate::tags::{TaggedContentItem, TaggedNode};

/// Factories for every node and mark type in a schema, looked up by name.
///
/// The table is filled once, when the builders are created. The `text` node
/// type has no node factory; use [`Builders::text`] instead.
#[derive(Debug, Clone)]
pub struct Builders {
    schema: Schema,
    syntax: MarkerSyntax,
    nodes: BTreeMap<String, NodeFactory>,
    marks: BTreeMap<String, MarkFactory>,
}

impl Builders {
    pub fn new(schema: Schema) -> Self {
        Self::with_syntax(schema, MarkerSyntax::default())
    }

    pub fn with_syntax(schema: Schema, syntax: MarkerSyntax) -> Self {
        let nodes: BTreeMap<_, _> = schema
            .node_types()
            .filter(|t| !t.is_text())
            .map(|t| (t.name().to_string(), NodeFactory::new(t.clone(), syntax)))
            .collect();
        let marks: BTreeMap<_, _> = schema
            .mark_types()
            .map(|t| (t.name().to_string(), MarkFactory::new(t.clone(), syntax)))
            .collect();

        debug!(
            "built {} node and {} mark factories (markers {}name{})",
            nodes.len(),
            marks.len(),
            syntax.open(),
            syntax.close()
        );

        Self {
            schema,
            syntax,
            nodes,
            marks,
        }
    }

    /// Builders for the configured schema file, or the basic schema when
    /// none is configured.
    pub fn from_config(config: &Config) -> Result<Self, BuildError> {
        config.marker.validate()?;

        let schema = match &config.schema_path {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|source| BuildError::SchemaRead {
                        path: path.clone(),
                        source,
                    })?;
                Schema::from_toml_str(&content)?
            }
            None => Schema::basic(),
        };
        Ok(Self::with_syntax(schema, config.marker))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn syntax(&self) -> MarkerSyntax {
        self.syntax
    }

    pub fn node(&self, name: &str) -> Result<&NodeFactory, BuildError> {
        self.nodes
            .get(name)
            .ok_or_else(|| BuildError::UnknownNodeType(name.to_string()))
    }

    pub fn mark(&self, name: &str) -> Result<&MarkFactory, BuildError> {
        self.marks
            .get(name)
            .ok_or_else(|| BuildError::UnknownMarkType(name.to_string()))
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn mark_names(&self) -> impl Iterator<Item = &str> {
        self.marks.keys().map(String::as_str)
    }

    pub fn text(&self, input: &str) -> Result<TaggedContentItem, BuildError> {
        text(input, self.syntax)
    }

    /// Build the schema's top node from `content`.
    pub fn doc<I>(&self, content: I) -> Result<TaggedNode, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<Content>,
    {
        self.node(self.schema.top_node())?.build(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tagdoc_config::ConfigError;

    #[test]
    fn table_covers_schema_types() {
        let b = Builders::new(Schema::basic());

        let nodes: Vec<&str> = b.node_names().collect();
        assert!(nodes.contains(&"paragraph"));
        assert!(nodes.contains(&"image"));
        assert!(!nodes.contains(&"text"));
        assert_eq!(b.mark_names().count(), 4);
    }

    #[test]
    fn unknown_names_are_errors() {
        let b = Builders::new(Schema::basic());

        assert!(matches!(
            b.node("table"),
            Err(BuildError::UnknownNodeType(name)) if name == "table"
        ));
        assert!(matches!(
            b.node("text"),
            Err(BuildError::UnknownNodeType(_))
        ));
        assert!(matches!(
            b.mark("underline"),
            Err(BuildError::UnknownMarkType(_))
        ));
    }

    #[test]
    fn from_config_without_schema_uses_basic() {
        let b = Builders::from_config(&Config::default()).unwrap();

        assert_eq!(b.schema(), &Schema::basic());
        assert_eq!(b.syntax(), MarkerSyntax::default());
    }

    #[test]
    fn from_config_reports_missing_schema_file() {
        let config = Config {
            schema_path: Some(PathBuf::from("/definitely/not/here/schema.toml")),
            ..Config::default()
        };

        assert!(matches!(
            Builders::from_config(&config),
            Err(BuildError::SchemaRead { .. })
        ));
    }

    #[test]
    fn from_config_rejects_word_char_delimiter() {
        let config: Config = toml::from_str("[marker]\nopen = 'a'\n").unwrap();

        assert!(matches!(
            Builders::from_config(&config),
            Err(BuildError::Config(ConfigError::InvalidMarker { open: 'a', .. }))
        ));
    }

    #[test]
    fn from_config_rejects_identical_delimiters() {
        let config: Config = toml::from_str("[marker]\nopen = '|'\nclose = '|'\n").unwrap();

        assert!(matches!(
            Builders::from_config(&config),
            Err(BuildError::Config(ConfigError::InvalidMarker { .. }))
        ));
    }
}
