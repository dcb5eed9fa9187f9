//! Filename generation and manipulation.

use md5::{Digest, Md5};
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use url::Url;

use crate::error::{Error, Result};

static FORBIDDEN_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]").unwrap());

static UNDERSCORE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{2,}").unwrap());

/// Turn an arbitrary title into a filesystem-safe name.
///
/// Diacritics are stripped (`Č` becomes `C`), every character outside
/// `[A-Za-z0-9._-]` becomes `_`, runs of `_` collapse to one and leading or
/// trailing `_` are removed. Empty input gives an empty name.
pub fn sanitize_filename(raw: &str) -> String {
    let without_marks: String = raw
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let replaced = FORBIDDEN_CHARS.replace_all(&without_marks, "_");
    let collapsed = UNDERSCORE_RUNS.replace_all(&replaced, "_");

    collapsed.trim_matches('_').to_string()
}

/// Deterministic decimal suffix for a URL.
///
/// The same URL always yields the same digits, so re-processing a page
/// overwrites its earlier output instead of creating a second copy.
pub fn unique_suffix(url: &str) -> String {
    let digest = Md5::digest(url.as_bytes());
    let value = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    value.to_string()
}

/// Build the per-page identifier `<sanitized title>_<unique suffix>`.
pub fn unique_title(title: &str, url: &str) -> Result<String> {
    let sanitized = sanitize_filename(title);
    if sanitized.is_empty() {
        return Err(Error::EmptyTitle(title.to_string()));
    }
    Ok(format!("{}_{}", sanitized, unique_suffix(url)))
}

/// Last segment of the URL path, including its extension.
///
/// Percent-encoding is decoded. Returns `None` when the URL cannot be parsed
/// or its path does not end in a usable file name.
pub fn last_path_segment(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.last()?;
    if segment.is_empty() {
        return None;
    }

    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());

    if decoded == "." || decoded == ".." || decoded.contains(['/', '\\', '\0']) {
        return None;
    }

    Some(decoded)
}

/// Insert `_<suffix>` before the file extension.
///
/// Given "diagram.png" and "1234", produces "diagram_1234.png".
pub fn suffixed_filename(filename: &str, suffix: &str) -> String {
    match filename.rfind('.') {
        Some(dot_pos) if dot_pos > 0 => {
            let name = &filename[..dot_pos];
            let ext = &filename[dot_pos..];
            format!("{}_{}{}", name, suffix, ext)
        }
        _ => format!("{}_{}", filename, suffix),
    }
}
