//! Configuration module for the wiki-transformer.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - CLI argument merging
//! - Configuration validation

pub mod loader;
pub mod policy;
pub mod validation;

pub use loader::{Config, ConverterConfig, HttpConfig, ImagesConfig, DEFAULT_CONFIG_FILE};
pub use policy::CollisionPolicy;
pub use validation::{validate_config, validate_wiki_url};
