use liblod::fetch::{FetchError, Fetcher, HttpClient, RequestSpec};
use liblod::HttpClientConfig;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> HttpClient {
    HttpClient::new(HttpClientConfig::default()).unwrap()
}

fn turtle_about(subject: &str) -> String {
    format!("<{}> <http://www.w3.org/2000/01/rdf-schema#label> \"Thing\"@en .\n", subject)
}

#[tokio::test]
async fn test_turtle_document_fetched() {
    let mock_server = MockServer::start().await;
    let uri = format!("{}/thing", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/thing"))
        .and(header("user-agent", "liblod/Rust"))
        .and(header_exists("accept"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(turtle_about(&uri), "text/turtle"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client().get(&uri).await;

    assert!(response.is_success());
    assert_eq!(response.status, 200);
    assert_eq!(response.error_code(), 0);
    assert_eq!(response.target, uri);
    assert_eq!(response.content_location.as_deref(), Some(uri.as_str()));
    assert!(response.media_type.as_deref().is_some_and(|m| m.starts_with("text/turtle")));
    assert!(response.payload.as_deref().is_some_and(|p| p.contains("Thing")));
}

#[tokio::test]
async fn test_content_location_header_resolved() {
    let mock_server = MockServer::start().await;
    let uri = format!("{}/thing", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/thing"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(turtle_about(&uri), "text/turtle")
                .insert_header("Content-Location", "/thing.ttl"),
        )
        .mount(&mock_server)
        .await;

    let response = client().get(&uri).await;

    assert!(response.is_success());
    assert_eq!(
        response.content_location,
        Some(format!("{}/thing.ttl", mock_server.uri()))
    );
}

#[tokio::test]
async fn test_content_location_header_kept_literal() {
    let mock_server = MockServer::start().await;
    let uri = format!("{}/thing", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/thing"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(turtle_about(&uri), "text/turtle")
                .insert_header("Content-Location", "/thing.ttl?a=1&amp;b=2"),
        )
        .mount(&mock_server)
        .await;

    let response = client().get(&uri).await;

    assert!(response.is_success());
    assert_eq!(
        response.content_location,
        Some(format!("{}/thing.ttl?a=1&amp;b=2", mock_server.uri()))
    );
}

#[tokio::test]
async fn test_see_other_redirect_followed() {
    let mock_server = MockServer::start().await;
    let uri = format!("{}/id/thing", mock_server.uri());
    let doc = format!("{}/data/thing.ttl", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/id/thing"))
        .respond_with(ResponseTemplate::new(303).insert_header("Location", "/data/thing.ttl"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/thing.ttl"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(turtle_about(&uri), "text/turtle"))
        .mount(&mock_server)
        .await;

    let response = client().get(&uri).await;

    assert!(response.is_success());
    assert_eq!(response.target, uri);
    assert_eq!(response.content_location, Some(doc));
}

#[tokio::test]
async fn test_html_page_with_rdf_link_followed() {
    let mock_server = MockServer::start().await;
    let uri = format!("{}/page", mock_server.uri());

    let html = r#"<html><head>
        <link rel="alternate" type="text/turtle" href="/x.ttl">
    </head><body>hello</body></html>"#;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html; charset=utf-8"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/x.ttl"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(turtle_about(&uri), "text/turtle"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client().get(&uri).await;

    assert!(response.is_success());
    assert_eq!(response.target, uri);
    assert_eq!(
        response.content_location,
        Some(format!("{}/x.ttl", mock_server.uri()))
    );
    assert!(response.payload.as_deref().is_some_and(|p| p.contains(&uri)));
}

#[tokio::test]
async fn test_html_page_without_rdf_link() {
    let mock_server = MockServer::start().await;
    let uri = format!("{}/page", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><head><title>x</title></head></html>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let response = client().get(&uri).await;

    assert_eq!(response.error, Some(FetchError::NoRdfLink));
    assert_eq!(response.error_code(), 5);
    assert_eq!(response.status, 200);
    assert!(response.payload.is_none());
}

#[tokio::test]
async fn test_client_and_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_raw("nope", "text/turtle"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = client();

    let missing = client.get(&format!("{}/missing", mock_server.uri())).await;
    assert_eq!(missing.status, 404);
    assert_eq!(missing.error_code(), 3);
    assert!(missing.err_msg().is_some_and(|m| m.contains("404")));

    let broken = client.get(&format!("{}/broken", mock_server.uri())).await;
    assert_eq!(broken.status, 500);
    assert_eq!(broken.error_code(), 2);
    assert!(broken.payload.is_none());
}

#[tokio::test]
async fn test_missing_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bare"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"<a> <b> <c> .".to_vec()))
        .mount(&mock_server)
        .await;

    let response = client().get(&format!("{}/bare", mock_server.uri())).await;

    assert_eq!(response.error, Some(FetchError::NoContentType));
    assert_eq!(response.error_code(), 4);
}

#[tokio::test]
async fn test_redirect_loop_reports_too_many_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/loop"))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig {
        max_redirects: 3,
        ..Default::default()
    };
    let client = HttpClient::new(config).unwrap();
    let response = client.get(&format!("{}/loop", mock_server.uri())).await;

    assert_eq!(response.error, Some(FetchError::TooManyRedirects(3)));
    assert_eq!(response.error_code(), 6);
}

#[tokio::test]
async fn test_html_link_cycle_reports_too_many_indirections() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<link rel="alternate" type="text/turtle" href="/b">"#,
            "text/html",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<link rel="alternate" type="application/rdf+xml" href="/a">"#,
            "text/html",
        ))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig {
        max_redirects: 2,
        ..Default::default()
    };
    let client = HttpClient::new(config).unwrap();
    let uri = format!("{}/a", mock_server.uri());
    let response = client.get(&uri).await;

    assert_eq!(response.error, Some(FetchError::TooManyIndirections(2)));
    assert_eq!(response.error_code(), 7);
    assert_eq!(response.target, uri);
}

#[tokio::test]
async fn test_batch_preserves_input_order() {
    let mock_server = MockServer::start().await;

    for name in ["one", "two", "three", "four"] {
        let uri = format!("{}/{}", mock_server.uri(), name);
        Mock::given(method("GET"))
            .and(path(format!("/{}", name)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(turtle_about(&uri), "text/turtle")
                    .set_delay(std::time::Duration::from_millis(if name == "one" { 150 } else { 0 })),
            )
            .mount(&mock_server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&mock_server)
        .await;

    let names = ["one", "gone", "two", "three", "four"];
    let requests: Vec<RequestSpec> = names
        .iter()
        .map(|n| RequestSpec::new(format!("{}/{}", mock_server.uri(), n)))
        .collect();

    let responses = client().get_all(requests.clone()).await;

    assert_eq!(responses.len(), names.len());
    for (request, response) in requests.iter().zip(&responses) {
        assert_eq!(response.target, request.original_uri);
    }
    assert!(responses[0].is_success());
    assert_eq!(responses[1].error_code(), 3);
    assert!(responses[2..].iter().all(|r| r.is_success()));
}

#[tokio::test]
async fn test_batch_order_with_html_follow_up() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(turtle_about(&format!("{}/a", base)), "text/turtle")
                .set_delay(std::time::Duration::from_millis(100)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<html><head><link rel="alternate" type="text/turtle" href="/b.ttl"></head></html>"#,
            "text/html",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b.ttl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(turtle_about(&format!("{}/b", base)), "text/turtle"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(turtle_about(&format!("{}/c", base)), "text/turtle"),
        )
        .mount(&mock_server)
        .await;

    let requests: Vec<RequestSpec> = ["a", "b", "c"]
        .iter()
        .map(|n| RequestSpec::new(format!("{}/{}", base, n)))
        .collect();

    let responses = client().get_all(requests).await;

    assert_eq!(responses.len(), 3);
    assert!(responses.iter().all(|r| r.is_success()));

    let targets: Vec<&str> = responses.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(
        targets,
        vec![format!("{}/a", base), format!("{}/b", base), format!("{}/c", base)]
    );

    let locations: Vec<Option<String>> = responses.iter().map(|r| r.content_location.clone()).collect();
    assert_eq!(
        locations,
        vec![
            Some(format!("{}/a", base)),
            Some(format!("{}/b.ttl", base)),
            Some(format!("{}/c", base)),
        ]
    );
    assert!(responses[1].payload.as_deref().is_some_and(|p| p.contains(&format!("{}/b>", base))));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let client = client();
    // Port 9 (discard) on localhost is almost never listening
    let response = client.get("http://127.0.0.1:9/nothing").await;

    assert_eq!(response.error_code(), 1);
    assert_eq!(response.status, 0);
    assert!(matches!(response.error, Some(FetchError::Transport(_))));
}

#[tokio::test]
async fn test_empty_batch() {
    let responses = client().get_all(Vec::new()).await;
    assert!(responses.is_empty());
}
