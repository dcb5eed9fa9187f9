mod common;

use wiki_transformer::config::CollisionPolicy;
use wiki_transformer::error::{exit_codes, Error};
use wiki_transformer::fs::unique_suffix;
use wiki_transformer::pipeline;
use wiremock::MockServer;

use common::{
    client, html_with_images, mount_image, mount_page_html, mount_page_json, mount_status,
    page_url, settings, CopyConverter, PAGE_PATH,
};

#[tokio::test]
async fn converts_page_and_harvests_images() {
    let server = MockServer::start().await;
    mount_page_json(&server, "Návod k použití", "h1. Návod\n\n!diagram.png!").await;
    mount_page_html(&server, &html_with_images(&["/attachments/download/7/diagram.png"])).await;
    mount_image(&server, "/attachments/download/7/diagram.png", b"png").await;
    let out = tempfile::tempdir().unwrap();
    let converter = CopyConverter::default();
    let url = page_url(&server);

    let report = pipeline::run(
        &client(&server),
        &converter,
        &settings(CollisionPolicy::Suffix),
        &url,
        out.path(),
    )
    .await
    .expect("run ok");

    let unique = format!("Navod_k_pouziti_{}", unique_suffix(&url));
    assert_eq!(report.title, "Návod k použití");
    assert_eq!(report.context.unique_title(), unique);
    assert_eq!(
        report.converted_file,
        out.path().join(format!("{unique}.mediawiki"))
    );
    assert_eq!(
        std::fs::read_to_string(&report.converted_file).unwrap(),
        "h1. Návod\n\n!diagram.png!"
    );
    assert_eq!(
        std::fs::read(out.path().join(&unique).join("diagram.png")).unwrap(),
        b"png"
    );
    assert_eq!(converter.calls(), 1);
}

#[tokio::test]
async fn missing_page_aborts_before_conversion() {
    let server = MockServer::start().await;
    mount_status(&server, &format!("{}.json", PAGE_PATH), 404).await;
    let out = tempfile::tempdir().unwrap();
    let converter = CopyConverter::default();

    let err = pipeline::run(
        &client(&server),
        &converter,
        &settings(CollisionPolicy::Suffix),
        &page_url(&server),
        out.path(),
    )
    .await
    .unwrap_err();

    assert!(matches!(&err, Error::Fetch(e) if e.is_not_found()), "{err}");
    assert_eq!(err.exit_code(), exit_codes::FETCH_ERROR);
    assert_eq!(converter.calls(), 0);
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn output_path_that_is_a_file_is_rejected() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();
    let file = out.path().join("not-a-dir");
    std::fs::write(&file, "x").unwrap();
    let converter = CopyConverter::default();

    let err = pipeline::run(
        &client(&server),
        &converter,
        &settings(CollisionPolicy::Suffix),
        &page_url(&server),
        &file,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Path(_)), "{err}");
    assert_eq!(err.exit_code(), exit_codes::CONFIG_ERROR);
    assert_eq!(converter.calls(), 0);
}

#[tokio::test]
async fn harvest_failure_keeps_converted_file() {
    let server = MockServer::start().await;
    mount_page_json(&server, "Start", "h1. Start").await;
    mount_page_html(&server, &html_with_images(&["/img/gone.png"])).await;
    mount_status(&server, "/img/gone.png", 404).await;
    let out = tempfile::tempdir().unwrap();
    let url = page_url(&server);

    let err = pipeline::run(
        &client(&server),
        &CopyConverter::default(),
        &settings(CollisionPolicy::Suffix),
        &url,
        out.path(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Harvest(_)), "{err}");
    assert_eq!(err.exit_code(), exit_codes::DOWNLOAD_ERROR);
    let converted = out
        .path()
        .join(format!("Start_{}.mediawiki", unique_suffix(&url)));
    assert!(converted.exists());
}

#[tokio::test]
async fn second_run_overwrites_the_same_paths() {
    let server = MockServer::start().await;
    mount_page_json(&server, "Start", "h1. Start").await;
    mount_page_html(&server, &html_with_images(&["/img/a.png"])).await;
    mount_image(&server, "/img/a.png", b"image").await;
    let out = tempfile::tempdir().unwrap();
    let client = client(&server);
    let converter = CopyConverter::default();
    let settings = settings(CollisionPolicy::Suffix);
    let url = page_url(&server);

    let first = pipeline::run(&client, &converter, &settings, &url, out.path())
        .await
        .expect("first run");
    std::fs::write(&first.converted_file, "stale").unwrap();

    let second = pipeline::run(&client, &converter, &settings, &url, out.path())
        .await
        .expect("second run");

    assert_eq!(first.converted_file, second.converted_file);
    assert_eq!(first.images.directory, second.images.directory);
    assert_eq!(
        std::fs::read_to_string(&second.converted_file).unwrap(),
        "h1. Start"
    );
    // converted file plus image folder, nothing else
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 2);
}
