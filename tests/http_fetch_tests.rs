mod common;

use std::time::Duration;

use common::RecordingSink;
use endpoint_hunter::config::Config;
use endpoint_hunter::fetch::{FetchError, Fetcher, HttpFetcher};
use endpoint_hunter::scan::scan_and_save;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET")).and(path(route)).respond_with(template).mount(server).await;
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(&Config::default()).unwrap()
}

#[tokio::test]
async fn fetches_text_body() {
    let server = MockServer::start().await;
    serve(&server, "/", ResponseTemplate::new(200).set_body_raw("<p>'/api/x'</p>", "text/html; charset=utf-8")).await;

    let url = format!("{}/", server.uri());
    let page = fetcher().fetch(&url).await.unwrap();
    assert_eq!(page.url, url);
    assert_eq!(page.body, "<p>'/api/x'</p>");
    assert!(page.content_type.starts_with("text/html"));
}

#[tokio::test]
async fn accepts_javascript_and_css() {
    let server = MockServer::start().await;
    serve(&server, "/app.js", ResponseTemplate::new(200).set_body_raw("x()", "application/javascript")).await;
    serve(&server, "/site.css", ResponseTemplate::new(200).set_body_raw("a{}", "text/css")).await;

    let f = fetcher();
    assert!(f.fetch(&format!("{}/app.js", server.uri())).await.is_ok());
    assert!(f.fetch(&format!("{}/site.css", server.uri())).await.is_ok());
}

#[tokio::test]
async fn non_200_is_status_error() {
    let server = MockServer::start().await;
    serve(&server, "/gone", ResponseTemplate::new(404)).await;
    serve(&server, "/created", ResponseTemplate::new(201).set_body_raw("ok", "text/plain")).await;

    let f = fetcher();
    let err = f.fetch(&format!("{}/gone", server.uri())).await.unwrap_err();
    assert!(matches!(err, FetchError::Status(404)));
    let err = f.fetch(&format!("{}/created", server.uri())).await.unwrap_err();
    assert!(matches!(err, FetchError::Status(201)));
}

#[tokio::test]
async fn image_is_non_text() {
    let server = MockServer::start().await;
    serve(&server, "/logo.png", ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G'], "image/png")).await;

    let err = fetcher().fetch(&format!("{}/logo.png", server.uri())).await.unwrap_err();
    match err {
        FetchError::NonText(ct) => assert_eq!(ct, "image/png"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/slow",
        ResponseTemplate::new(200).set_body_raw("late", "text/plain").set_delay(Duration::from_secs(3)),
    )
    .await;

    let config = Config { timeout_secs: 1, ..Config::default() };
    let f = HttpFetcher::new(&config).unwrap();
    let err = f.fetch(&format!("{}/slow", server.uri())).await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout));
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // nothing listens on port 1
    let err = fetcher().fetch("http://127.0.0.1:1/").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn scan_over_http() {
    let server = MockServer::start().await;
    let seed_body = r#"<html><head><script src=/app.js></script><link rel=icon href=/favicon.png></head>
        <body><script>const users = "/api/users";</script></body></html>"#;
    serve(&server, "/", ResponseTemplate::new(200).set_body_raw(seed_body, "text/html")).await;
    serve(
        &server,
        "/app.js",
        ResponseTemplate::new(200).set_body_raw("post('/api/login'); log('not a path');", "application/javascript"),
    )
    .await;
    serve(&server, "/favicon.png", ResponseTemplate::new(200).set_body_raw(vec![0u8; 4], "image/png")).await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("endpoints.txt");
    let sink = RecordingSink::new();
    let seed = format!("{}/", server.uri());

    let report = scan_and_save(&seed, &fetcher(), &sink, 2, &out).await.unwrap();

    assert_eq!(report.paths, vec!["/api/login", "/api/users"]);
    assert_eq!(report.resources_found, 2);
    assert_eq!(report.resources_skipped, 1);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "/api/login\n/api/users");
    assert_eq!(sink.failed_urls(), vec![format!("{}/favicon.png", server.uri())]);
}
