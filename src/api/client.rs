//! Wiki HTTP client.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{header, Client, Response, StatusCode};
use url::Url;

use crate::api::types::{WikiPage, WikiPageResponse};
use crate::config::HttpConfig;
use crate::error::{Error, FetchError, ImageFetchError, ImageFetchErrorKind, Result};

/// Header carrying the Redmine API key.
const API_KEY_HEADER: &str = "X-Redmine-API-Key";

/// Suffix selecting the JSON representation of a wiki page.
const JSON_SUFFIX: &str = ".json";

/// Build the API endpoint for a wiki page URL.
pub fn json_url(wiki_url: &str) -> String {
    let trimmed = wiki_url.trim().trim_end_matches('/');
    if trimmed.ends_with(JSON_SUFFIX) {
        trimmed.to_string()
    } else {
        format!("{}{}", trimmed, JSON_SUFFIX)
    }
}

/// HTTP client for the wiki API, the rendered page and its images.
///
/// Every call issues exactly one request; nothing is retried or cached.
pub struct WikiClient {
    client: Client,
    api_key: Option<String>,
    wiki_host: Option<String>,
}

impl WikiClient {
    /// Create a client for the wiki hosting `wiki_url`.
    ///
    /// The API key, when configured, is only sent to that host.
    pub fn new(config: &HttpConfig, wiki_url: &str) -> Result<Self> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        let wiki_host = Url::parse(wiki_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string));

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            wiki_host,
        })
    }

    fn is_wiki_host(&self, url: &str) -> bool {
        match (&self.wiki_host, Url::parse(url)) {
            (Some(host), Ok(parsed)) => parsed.host_str() == Some(host.as_str()),
            _ => false,
        }
    }

    /// Make a GET request.
    async fn get(&self, url: &str) -> std::result::Result<Response, reqwest::Error> {
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            if self.is_wiki_host(url) {
                request = request.header(API_KEY_HEADER, key);
            }
        }

        let response = request.send().await?;
        tracing::debug!("Response status: {}", response.status());

        Ok(response)
    }

    /// Fetch and deserialize a wiki page from its JSON endpoint.
    pub async fn fetch_page(&self, json_url: &str) -> std::result::Result<WikiPage, FetchError> {
        let text = self.fetch_text(json_url).await?;

        let payload: WikiPageResponse = serde_json::from_str(&text).map_err(|e| {
            FetchError::communication(
                json_url,
                format!(
                    "Failed to parse wiki page: {} - Response: {}",
                    e,
                    &text[..floor_char_boundary(&text, 200)]
                ),
            )
        })?;

        tracing::debug!(
            "Fetched wiki page '{}' (version {:?})",
            payload.wiki_page.title,
            payload.wiki_page.version
        );

        Ok(payload.wiki_page)
    }

    /// Fetch the rendered HTML of a page.
    pub async fn fetch_html(&self, page_url: &str) -> std::result::Result<String, FetchError> {
        let html = self.fetch_text(page_url).await?;
        tracing::debug!("Fetched {} bytes of HTML from {}", html.len(), page_url);
        Ok(html)
    }

    async fn fetch_text(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = self
            .get(url)
            .await
            .map_err(|e| FetchError::communication(url, e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::not_found(url, format!("HTTP {}", status)));
        }
        if !status.is_success() {
            return Err(FetchError::communication(url, format!("HTTP {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::communication(url, format!("Failed to read body: {}", e)))
    }

    /// Download the raw bytes of one image.
    pub async fn fetch_image_bytes(
        &self,
        url: &str,
    ) -> std::result::Result<Bytes, ImageFetchError> {
        let response = self.get(url).await.map_err(|e| {
            ImageFetchError::new(ImageFetchErrorKind::Communication, url, e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ImageFetchError::new(
                ImageFetchErrorKind::NotFound,
                url,
                format!("HTTP {}", status),
            ));
        }
        if !status.is_success() {
            return Err(ImageFetchError::new(
                ImageFetchErrorKind::HttpStatus(status.as_u16()),
                url,
                status.canonical_reason().unwrap_or("unexpected status"),
            ));
        }

        if let Some(content_type) = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !content_type.starts_with("image/") {
                tracing::warn!("Image {} served as '{}'", url, content_type);
            }
        }

        response.bytes().await.map_err(|e| {
            ImageFetchError::new(
                ImageFetchErrorKind::Communication,
                url,
                format!("Failed to read image body: {}", e),
            )
        })
    }
}

/// Largest char boundary not above `max`, for truncating response excerpts.
fn floor_char_boundary(text: &str, max: usize) -> usize {
    if text.len() <= max {
        return text.len();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    end
}
