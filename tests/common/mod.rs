#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use wiki_transformer::config::{CollisionPolicy, HttpConfig};
use wiki_transformer::error::ConvertError;
use wiki_transformer::{Converter, HarvestSettings, WikiClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PAGE_PATH: &str = "/projects/demo/wiki/Start";

/// Copies the input to the output and counts its invocations.
#[derive(Default)]
pub struct CopyConverter {
    calls: AtomicUsize,
}

impl CopyConverter {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Converter for CopyConverter {
    async fn convert(&self, input: &Path, output: &Path) -> Result<(), ConvertError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::fs::copy(input, output)
            .await
            .map_err(|source| ConvertError::ProcessFailed {
                program: "copy".into(),
                source,
            })?;
        Ok(())
    }

    fn source_extension(&self) -> &str {
        "textile"
    }

    fn target_extension(&self) -> &str {
        "mediawiki"
    }
}

pub fn page_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), PAGE_PATH)
}

pub fn client(server: &MockServer) -> WikiClient {
    WikiClient::new(&HttpConfig::default(), &page_url(server)).unwrap()
}

pub fn settings(policy: CollisionPolicy) -> HarvestSettings {
    HarvestSettings {
        collision_policy: policy,
        show_progress: false,
        ..HarvestSettings::default()
    }
}

pub async fn mount_page_json(server: &MockServer, title: &str, text: &str) {
    let body = serde_json::json!({
        "wiki_page": {
            "title": title,
            "text": text,
            "version": 3,
            "author": { "id": 5, "name": "Jana Nováková" },
            "comments": "",
            "created_on": "2024-02-01T10:00:00Z",
            "updated_on": "2024-03-01T12:30:00Z"
        }
    });
    Mock::given(method("GET"))
        .and(path(format!("{}.json", PAGE_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_page_html(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path(PAGE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body.to_string(), "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

pub async fn mount_image(server: &MockServer, image_path: &str, bytes: &[u8]) {
    Mock::given(method("GET"))
        .and(path(image_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(bytes.to_vec(), "image/png"))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, resource: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(resource))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// HTML page referencing the given image sources.
pub fn html_with_images(sources: &[&str]) -> String {
    let imgs: String = sources
        .iter()
        .map(|src| format!("<p><img src=\"{}\"></p>\n", src))
        .collect();
    format!("<html><body><h1>Start</h1>\n{}</body></html>", imgs)
}
