//! Image reference extraction from rendered wiki HTML.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

use crate::api::WikiClient;
use crate::error::ExtractError;

/// URL path fragment Redmine uses for scaled previews of attachments.
pub const THUMBNAIL_MARKER: &str = "/attachments/thumbnail/";

static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img[src]").unwrap());

static BASE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("base[href]").unwrap());

/// Absolute URLs of every `<img src>` in `html`, in document order.
///
/// Relative references resolve against `<base href>` when the document has
/// one, otherwise against `page_url`. Empty, `data:` and unresolvable
/// references are skipped.
pub fn extract_image_urls(html: &str, page_url: &str) -> Result<Vec<String>, ExtractError> {
    let page = Url::parse(page_url).map_err(|source| ExtractError::InvalidBaseUrl {
        url: page_url.to_string(),
        source,
    })?;

    let document = Html::parse_document(html);

    let base = document
        .select(&BASE_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("href"))
        .and_then(|href| page.join(href.trim()).ok())
        .unwrap_or(page);

    let mut urls = Vec::new();
    for element in document.select(&IMG_SELECTOR) {
        let Some(src) = element.value().attr("src").map(str::trim) else {
            continue;
        };
        if src.is_empty() {
            continue;
        }
        if src.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("data:")) {
            tracing::debug!("Skipping inline image data");
            continue;
        }

        match base.join(src) {
            Ok(url) => urls.push(String::from(url)),
            Err(e) => tracing::debug!("Skipping image reference '{}': {}", src, e),
        }
    }

    tracing::debug!("Found {} image references", urls.len());
    Ok(urls)
}

/// Fetch the page HTML and extract its image URLs.
///
/// Every call issues a fresh request.
pub async fn fetch_image_urls(
    client: &WikiClient,
    page_url: &str,
) -> Result<Vec<String>, ExtractError> {
    let html = client
        .fetch_html(page_url)
        .await
        .map_err(|source| ExtractError::Fetch {
            url: page_url.to_string(),
            source,
        })?;

    extract_image_urls(&html, page_url)
}

/// Drop URLs pointing at thumbnails, keeping the rest in order.
pub fn filter_thumbnails(urls: Vec<String>, marker: &str) -> Vec<String> {
    urls.into_iter()
        .filter(|url| !is_thumbnail(url, marker))
        .collect()
}

fn is_thumbnail(url: &str, marker: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().contains(marker),
        Err(_) => url.contains(marker),
    }
}
