//! Error types for the wiki-transformer application.
//!
//! Every pipeline stage has its own error type carrying the file, URL or
//! directory it failed on. The top-level [`Error`] wraps them with a short
//! user-facing message; the wrapped error is reachable through
//! [`std::error::Error::source`] so the CLI can print the full cause chain.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Pipeline stages
    #[error("Output directory cannot be used")]
    Path(#[from] PathError),

    #[error("Failed to retrieve wiki page")]
    Fetch(#[from] FetchError),

    #[error("Wiki page title '{0}' does not contain any usable file name characters")]
    EmptyTitle(String),

    #[error("Failed to convert wiki page")]
    Convert(#[from] ConvertError),

    #[error("Error downloading images")]
    Harvest(#[from] HarvestError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_)
            | Error::ConfigValidation { .. }
            | Error::MissingConfig(_)
            | Error::TomlParse(_) => exit_codes::CONFIG_ERROR,
            Error::Path(_) => exit_codes::CONFIG_ERROR,
            Error::Fetch(_) | Error::EmptyTitle(_) => exit_codes::FETCH_ERROR,
            Error::Convert(_) => exit_codes::CONVERT_ERROR,
            Error::Harvest(_) => exit_codes::DOWNLOAD_ERROR,
            Error::Io(_) => exit_codes::ABORT,
        }
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const ABORT: i32 = 1;
    pub const FETCH_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const CONVERT_ERROR: i32 = 4;
    pub const DOWNLOAD_ERROR: i32 = 5;
}

/// The output directory or the image directory cannot be used.
#[derive(Error, Debug)]
pub enum PathError {
    #[error("The path '{}' exists but it is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Could not create directory at '{}'", path.display())]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write to the directory '{}'", path.display())]
    NotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a page or HTML request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    NotFound,
    Communication,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchErrorKind::NotFound => write!(f, "Wiki page not found"),
            FetchErrorKind::Communication => write!(f, "Communication error with the server"),
        }
    }
}

/// A wiki API or HTML request failed.
#[derive(Error, Debug)]
#[error("{kind} ({url}): {detail}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub url: String,
    pub detail: String,
}

impl FetchError {
    pub fn not_found(url: &str, detail: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::NotFound,
            url: url.to_string(),
            detail: detail.into(),
        }
    }

    pub fn communication(url: &str, detail: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Communication,
            url: url.to_string(),
            detail: detail.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == FetchErrorKind::NotFound
    }
}

/// The external converter step failed.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to write temporary input file '{}'", path.display())]
    TempWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid output file name '{name}' in '{}': {reason}", dir.display())]
    InvalidOutputPath {
        name: String,
        dir: PathBuf,
        reason: String,
    },

    #[error("Converter '{program}' not found. Please install it and ensure it's in your PATH.")]
    ConverterNotFound { program: String },

    #[error("Failed to run converter '{program}'")]
    ProcessFailed {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Converter '{program}' exited with {status}: {stderr}")]
    ProcessExited {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Converter '{program}' did not finish within {secs} seconds")]
    Timeout { program: String, secs: u64 },

    #[error("Failed to remove temporary input file '{}'", path.display())]
    TempCleanupFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Image references could not be read from the page HTML.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Could not fetch page HTML from {url}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("Invalid page URL '{url}'")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Why a single image request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFetchErrorKind {
    NotFound,
    HttpStatus(u16),
    Communication,
}

impl fmt::Display for ImageFetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFetchErrorKind::NotFound => write!(f, "Image url not found"),
            ImageFetchErrorKind::HttpStatus(code) => write!(f, "Image download failed: HTTP {}", code),
            ImageFetchErrorKind::Communication => {
                write!(f, "Communication error with the server while fetching image")
            }
        }
    }
}

/// An image request failed.
#[derive(Error, Debug)]
#[error("{kind} ({url}): {detail}")]
pub struct ImageFetchError {
    pub kind: ImageFetchErrorKind,
    pub url: String,
    pub detail: String,
}

impl ImageFetchError {
    pub fn new(kind: ImageFetchErrorKind, url: &str, detail: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.to_string(),
            detail: detail.into(),
        }
    }
}

/// The image harvest step failed.
///
/// Images saved before the failure stay on disk.
#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Error extracting image URLs")]
    Extract(#[from] ExtractError),

    #[error("Could not prepare the image directory")]
    Directory(#[from] PathError),

    #[error("Cannot derive a file name from image URL '{url}'")]
    InvalidImageUrl { url: String },

    #[error("Error fetching image from {url}")]
    Download {
        url: String,
        #[source]
        source: ImageFetchError,
    },

    #[error("Image download returned empty body for URL: {url}")]
    EmptyBody { url: String },

    #[error("Image '{file_name}' from {url} collides with the image already saved from {previous}")]
    Collision {
        file_name: String,
        url: String,
        previous: String,
    },

    #[error("Error saving image to '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
