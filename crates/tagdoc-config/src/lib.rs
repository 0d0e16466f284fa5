use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid tag marker delimiters {open:?} and {close:?}: {reason}")]
    InvalidMarker {
        open: char,
        close: char,
        reason: &'static str,
    },
}

/// Delimiters around a tag name in builder content, `<` and `>` by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSyntax {
    open: char,
    close: char,
}

impl Default for MarkerSyntax {
    fn default() -> Self {
        Self {
            open: '<',
            close: '>',
        }
    }
}

impl MarkerSyntax {
    pub fn new(open: char, close: char) -> Result<Self, ConfigError> {
        let syntax = Self { open, close };
        syntax.validate()?;
        Ok(syntax)
    }

    pub fn open(&self) -> char {
        self.open
    }

    pub fn close(&self) -> char {
        self.close
    }

    /// Tag names are word characters, so neither delimiter may be one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reason = if self.open == self.close {
            Some("open and close must differ")
        } else if is_tag_name_char(self.open) || is_tag_name_char(self.close) {
            Some("delimiters cannot be word characters")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ConfigError::InvalidMarker {
                open: self.open,
                close: self.close,
                reason,
            }),
            None => Ok(()),
        }
    }
}

/// Characters allowed in a tag name.
pub fn is_tag_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Settings handed unchanged to an editor-rendering test helper.
///
/// `settings` are manager settings; `props` are partial render-prop
/// overrides. Neither is interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderEditorParameter {
    pub settings: toml::Table,
    pub props: toml::Table,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Optional TOML schema file used instead of the built-in schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<PathBuf>,
    pub marker: MarkerSyntax,
    pub render: RenderEditorParameter,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.marker.validate()?;

        // Expand shell variables and tilde in the schema path
        config.schema_path = config
            .schema_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/tagdoc");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
