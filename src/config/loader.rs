//! Configuration structures and loading logic.

use crate::config::policy::CollisionPolicy;
use crate::error::{Error, Result};
use crate::images::THUMBNAIL_MARKER;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory when `--config`
/// is not given.
pub const DEFAULT_CONFIG_FILE: &str = "wiki-transformer.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub converter: ConverterConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub images: ImagesConfig,
}

/// External converter invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Converter executable, resolved through `PATH`.
    #[serde(default = "default_program")]
    pub program: String,

    /// Markup dialect of the wiki source text (`-f`).
    #[serde(default = "default_source_format")]
    pub source_format: String,

    /// Markup dialect to produce (`-t`).
    #[serde(default = "default_target_format")]
    pub target_format: String,

    /// Extension of the temporary input file.
    #[serde(default = "default_source_format")]
    pub source_extension: String,

    /// Extension of the converted output file.
    #[serde(default = "default_target_format")]
    pub target_extension: String,

    /// Kill the converter after this many seconds. Unbounded when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Redmine API key, sent only to the wiki host.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout. Unbounded when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Image harvest settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// URL path fragment identifying scaled previews.
    #[serde(default = "default_thumbnail_marker")]
    pub thumbnail_marker: String,

    /// Handling of same-named images within one page.
    #[serde(default)]
    pub collision_policy: CollisionPolicy,

    /// Whether to show the download progress bar.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            source_format: default_source_format(),
            target_format: default_target_format(),
            source_extension: default_source_format(),
            target_extension: default_target_format(),
            timeout_secs: None,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            thumbnail_marker: default_thumbnail_marker(),
            collision_policy: CollisionPolicy::default(),
            show_progress: true,
        }
    }
}

fn default_program() -> String {
    "pandoc".to_string()
}

fn default_source_format() -> String {
    "textile".to_string()
}

fn default_target_format() -> String {
    "mediawiki".to_string()
}

fn default_user_agent() -> String {
    concat!("wiki-transformer/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_thumbnail_marker() -> String {
    THUMBNAIL_MARKER.to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the explicitly requested file, or the default file when present.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file means built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
