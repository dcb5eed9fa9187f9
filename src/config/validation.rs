//! Configuration validation logic.

use crate::config::loader::{Config, ConverterConfig};
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Converter dialect names such as `textile`, `mediawiki` or `gfm+smart`.
static FORMAT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_+-]+$").unwrap());

/// File extensions without the leading dot.
static EXTENSION_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_converter(&config.converter)?;
    validate_thumbnail_marker(&config.images.thumbnail_marker)?;

    if config.http.user_agent.trim().is_empty() {
        return Err(Error::MissingConfig("http.user_agent".to_string()));
    }

    if let Some(key) = &config.http.api_key {
        if key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                field: "http.api_key".to_string(),
                message: "API key is empty. Remove it or provide a real key.".to_string(),
            });
        }
    }

    Ok(())
}

/// Validate the converter invocation settings.
pub fn validate_converter(converter: &ConverterConfig) -> Result<()> {
    if converter.program.trim().is_empty() {
        return Err(Error::MissingConfig("converter.program".to_string()));
    }

    for (field, value) in [
        ("converter.source_format", &converter.source_format),
        ("converter.target_format", &converter.target_format),
    ] {
        if !FORMAT_PATTERN.is_match(value) {
            return Err(Error::ConfigValidation {
                field: field.to_string(),
                message: format!("'{}' is not a valid converter format name", value),
            });
        }
    }

    for (field, value) in [
        ("converter.source_extension", &converter.source_extension),
        ("converter.target_extension", &converter.target_extension),
    ] {
        if !EXTENSION_PATTERN.is_match(value) {
            return Err(Error::ConfigValidation {
                field: field.to_string(),
                message: format!(
                    "'{}' is not a valid file extension (letters, digits, '_' and '-' only, no leading dot)",
                    value
                ),
            });
        }
    }

    if converter.timeout_secs == Some(0) {
        return Err(Error::ConfigValidation {
            field: "converter.timeout_secs".to_string(),
            message: "Timeout must be at least 1 second".to_string(),
        });
    }

    Ok(())
}

/// Validate the thumbnail marker.
pub fn validate_thumbnail_marker(marker: &str) -> Result<()> {
    if marker.trim().is_empty() {
        return Err(Error::ConfigValidation {
            field: "images.thumbnail_marker".to_string(),
            message: "Marker must not be empty, it would filter out every image".to_string(),
        });
    }
    Ok(())
}

/// Validate the wiki page URL given on the command line.
pub fn validate_wiki_url(input: &str) -> Result<()> {
    let parsed = Url::parse(input.trim()).map_err(|e| Error::ConfigValidation {
        field: "url".to_string(),
        message: format!("'{}' is not a valid URL: {}", input, e),
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::ConfigValidation {
            field: "url".to_string(),
            message: format!("Only http and https URLs are supported (got '{}')", parsed.scheme()),
        });
    }

    if parsed.host_str().is_none() {
        return Err(Error::ConfigValidation {
            field: "url".to_string(),
            message: format!("URL '{}' has no host", input),
        });
    }

    Ok(())
}
