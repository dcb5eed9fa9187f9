//! Per-run conversion context.

use std::path::{Path, PathBuf};

use crate::api::WikiPage;
use crate::error::Result;
use crate::fs::{converted_file_path, image_dir, unique_title};

/// Identifiers and paths derived once from the fetched page.
///
/// Built after the page is fetched and never modified afterwards; each
/// pipeline stage borrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionContext {
    unique_title: String,
    raw_text: String,
    source_url: String,
    output_dir: PathBuf,
}

impl ConversionContext {
    /// Derive the context for `page` fetched from `source_url`.
    pub fn new(page: &WikiPage, source_url: &str, output_dir: &Path) -> Result<Self> {
        Ok(Self {
            unique_title: unique_title(&page.title, source_url)?,
            raw_text: page.text.clone(),
            source_url: source_url.to_string(),
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Base name of the converted file and name of the image folder.
    pub fn unique_title(&self) -> &str {
        &self.unique_title
    }

    /// Page body in the wiki's source markup.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// URL of the rendered page.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `output_dir/unique_title`
    pub fn image_dir(&self) -> PathBuf {
        image_dir(&self.output_dir, &self.unique_title)
    }

    pub fn converted_path(&self, extension: &str) -> PathBuf {
        converted_file_path(&self.output_dir, &self.unique_title, extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fs::unique_suffix;

    fn page(title: &str) -> WikiPage {
        serde_json::from_value(serde_json::json!({ "title": title, "text": "h1. Body" })).unwrap()
    }

    #[test]
    fn test_context_paths() {
        let url = "https://redmine.example.com/projects/demo/wiki/Návod";
        let out = Path::new("out");
        let ctx = ConversionContext::new(&page("Návod k použití"), url, out).unwrap();

        let expected_title = format!("Navod_k_pouziti_{}", unique_suffix(url));
        assert_eq!(ctx.unique_title(), expected_title);
        assert_eq!(ctx.raw_text(), "h1. Body");
        assert_eq!(ctx.source_url(), url);
        assert_eq!(ctx.image_dir(), out.join(&expected_title));
        assert_eq!(
            ctx.converted_path("mediawiki"),
            out.join(format!("{expected_title}.mediawiki"))
        );
    }

    #[test]
    fn test_context_is_deterministic() {
        let url = "https://redmine.example.com/projects/demo/wiki/Start";
        let a = ConversionContext::new(&page("Start"), url, Path::new("out")).unwrap();
        let b = ConversionContext::new(&page("Start"), url, Path::new("out")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unusable_title() {
        let result = ConversionContext::new(&page("!!!"), "https://x.test/w", Path::new("out"));
        assert!(matches!(result, Err(Error::EmptyTitle(_))));
    }
}
