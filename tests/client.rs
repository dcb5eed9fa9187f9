mod common;

use wiki_transformer::api::json_url;
use wiki_transformer::config::HttpConfig;
use wiki_transformer::error::{FetchErrorKind, ImageFetchErrorKind};
use wiki_transformer::WikiClient;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{client, mount_image, mount_page_json, mount_status, page_url, PAGE_PATH};

#[tokio::test]
async fn fetch_page_parses_wiki_record() {
    let server = MockServer::start().await;
    mount_page_json(&server, "Start", "h1. Welcome").await;

    let page = client(&server)
        .fetch_page(&json_url(&page_url(&server)))
        .await
        .expect("fetch ok");

    assert_eq!(page.title, "Start");
    assert_eq!(page.text, "h1. Welcome");
    assert_eq!(page.version, Some(3));
    assert_eq!(page.author.unwrap().name, "Jana Nováková");
}

#[tokio::test]
async fn fetch_page_not_found() {
    let server = MockServer::start().await;
    mount_status(&server, &format!("{}.json", PAGE_PATH), 404).await;

    let err = client(&server)
        .fetch_page(&json_url(&page_url(&server)))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FetchErrorKind::NotFound);
    assert!(err.url.ends_with("Start.json"));
}

#[tokio::test]
async fn fetch_page_server_error_is_communication_failure() {
    let server = MockServer::start().await;
    mount_status(&server, &format!("{}.json", PAGE_PATH), 500).await;

    let err = client(&server)
        .fetch_page(&json_url(&page_url(&server)))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FetchErrorKind::Communication);
}

#[tokio::test]
async fn fetch_page_rejects_malformed_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}.json", PAGE_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"issues\": []}", "application/json"))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_page(&json_url(&page_url(&server)))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FetchErrorKind::Communication);
    assert!(err.detail.contains("Failed to parse"), "{}", err.detail);
}

#[tokio::test]
async fn api_key_header_is_sent_to_wiki_host() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}.json", PAGE_PATH)))
        .and(header("X-Redmine-API-Key", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "wiki_page": { "title": "Start", "text": "" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = HttpConfig {
        api_key: Some("s3cret".to_string()),
        ..HttpConfig::default()
    };
    let client = WikiClient::new(&config, &page_url(&server)).unwrap();
    let page = client
        .fetch_page(&json_url(&page_url(&server)))
        .await
        .expect("authorized fetch");
    assert_eq!(page.title, "Start");
}

#[tokio::test]
async fn fetch_image_bytes_returns_body() {
    let server = MockServer::start().await;
    mount_image(&server, "/attachments/download/1/a.png", b"PNGDATA").await;

    let bytes = client(&server)
        .fetch_image_bytes(&format!("{}/attachments/download/1/a.png", server.uri()))
        .await
        .expect("image ok");
    assert_eq!(&bytes[..], b"PNGDATA");
}

#[tokio::test]
async fn fetch_image_bytes_maps_statuses() {
    let server = MockServer::start().await;
    mount_status(&server, "/missing.png", 404).await;
    mount_status(&server, "/broken.png", 503).await;
    let client = client(&server);

    let missing = client
        .fetch_image_bytes(&format!("{}/missing.png", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(missing.kind, ImageFetchErrorKind::NotFound);

    let broken = client
        .fetch_image_bytes(&format!("{}/broken.png", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(broken.kind, ImageFetchErrorKind::HttpStatus(503));
}
