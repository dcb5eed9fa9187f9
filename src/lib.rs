//! wiki-transformer - migrate Redmine wiki pages to MediaWiki markup.
//!
//! This library fetches a wiki page through the Redmine REST API, converts
//! its Textile body with an external converter (pandoc by default) and
//! downloads the images the rendered page references.
//!
//! # Features
//!
//! - Deterministic, filesystem-safe output names
//! - Pluggable converter behind the [`Converter`] trait
//! - Thumbnail filtering and collision-aware image storage
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use wiki_transformer::{pipeline, Config, HarvestSettings, PandocConverter, WikiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let url = "https://redmine.example.com/projects/demo/wiki/Start";
//!     let config = Config::default();
//!     let client = WikiClient::new(&config.http, url)?;
//!     let converter = PandocConverter::from_config(&config.converter);
//!     let settings = HarvestSettings::from_config(&config.images);
//!
//!     let report = pipeline::run(&client, &converter, &settings, url, Path::new("out")).await?;
//!     println!("{}", report.converted_file.display());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod convert;
pub mod error;
pub mod fs;
pub mod images;
pub mod output;
pub mod pipeline;

// Re-exports for convenience
pub use api::{WikiClient, WikiPage};
pub use config::{CollisionPolicy, Config};
pub use context::ConversionContext;
pub use convert::{convert_page, Converter, PandocConverter};
pub use error::{Error, Result};
pub use images::{harvest_images, HarvestReport, HarvestSettings};
pub use pipeline::RunReport;
