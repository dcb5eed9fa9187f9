//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{CollisionPolicy, Config};

/// Redmine wiki to MediaWiki transformer CLI.
#[derive(Parser, Debug)]
#[command(
    name = "wiki-transformer",
    version,
    about = "Transforms a Redmine wiki page from Textile to MediaWiki",
    long_about = "Fetches a Redmine wiki page, converts its Textile markup to MediaWiki with pandoc \
                  and downloads every image shown on the page.\n\n\
                  Outputs land in <OUTPUT_DIR>/<title>_<hash>.mediawiki and <OUTPUT_DIR>/<title>_<hash>/."
)]
pub struct Args {
    /// URL of the Redmine wiki page.
    #[arg(short, long)]
    pub url: String,

    /// Directory for the converted page and the image folder.
    #[arg(short, long = "output-dir")]
    pub output_dir: PathBuf,

    /// Path to configuration file (defaults to ./wiki-transformer.toml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Converter executable.
    #[arg(long)]
    pub converter: Option<String>,

    /// Source markup dialect passed to the converter.
    #[arg(long = "from")]
    pub source_format: Option<String>,

    /// Target markup dialect passed to the converter.
    #[arg(long = "to")]
    pub target_format: Option<String>,

    /// Extension of the converted file.
    #[arg(long)]
    pub extension: Option<String>,

    /// What to do when two images share a file name.
    #[arg(long, value_enum)]
    pub collision_policy: Option<CollisionPolicyArg>,

    /// Redmine API key for private wikis.
    #[arg(long, env = "REDMINE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Hide progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI collision policy argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CollisionPolicyArg {
    /// Later image replaces the earlier one.
    Overwrite,
    /// Later image gets a suffix derived from its URL.
    Suffix,
    /// Abort the image download.
    Fail,
}

impl From<CollisionPolicyArg> for CollisionPolicy {
    fn from(arg: CollisionPolicyArg) -> Self {
        match arg {
            CollisionPolicyArg::Overwrite => CollisionPolicy::Overwrite,
            CollisionPolicyArg::Suffix => CollisionPolicy::Suffix,
            CollisionPolicyArg::Fail => CollisionPolicy::Fail,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(program) = &self.converter {
            config.converter.program = program.clone();
        }

        if let Some(format) = &self.source_format {
            config.converter.source_format = format.clone();
            config.converter.source_extension = format.clone();
        }

        if let Some(format) = &self.target_format {
            config.converter.target_format = format.clone();
            config.converter.target_extension = format.clone();
        }

        // An explicit extension wins over the one derived from --to
        if let Some(extension) = &self.extension {
            config.converter.target_extension = extension.trim_start_matches('.').to_string();
        }

        if let Some(policy) = self.collision_policy {
            config.images.collision_policy = policy.into();
        }

        if let Some(key) = &self.api_key {
            config.http.api_key = Some(key.clone());
        }

        if self.quiet {
            config.images.show_progress = false;
        }
    }
}
