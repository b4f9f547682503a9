//! Integration tests for `PageClient` against a local mock server.
//!
//! Uses `wiremock` so no real network traffic is made. Covers the search
//! URL encoding contract, page fetching, and the error statuses callers
//! degrade to empty documents.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use asinmap_core::{AppConfig, ResultSet};
use asinmap_scraper::{parse_search_results, Page, PageClient, ScraperError};

/// Builds a `PageClient` whose searches hit the mock server.
fn test_client(server: &MockServer) -> PageClient {
    let config = AppConfig {
        log_level: "debug".to_string(),
        search_base_url: format!("{}/s?field-keywords=", server.uri()),
        user_agent: "asinmap-test/0.1".to_string(),
        inter_request_delay_ms: 0,
    };
    PageClient::new(&config).expect("failed to build test PageClient")
}

fn search_results_html(entries: &[(&str, &str)]) -> String {
    let items: String = entries
        .iter()
        .map(|(title, href)| {
            format!(
                r#"<li class="s-result-item"><a class="s-access-detail-page" title="{title}" href="{href}">{title}</a></li>"#
            )
        })
        .collect();
    format!("<html><body><ul>{items}</ul></body></html>")
}

#[tokio::test]
async fn search_url_appends_encoded_terms_to_the_base() {
    let server = MockServer::start().await;
    let client = test_client(&server);

    assert_eq!(
        client.search_url("Red Boot Size 9"),
        format!("{}/s?field-keywords=Red%2BBoot%2BSize%2B9", server.uri())
    );
}

#[tokio::test]
async fn fetch_search_page_returns_the_body() {
    let server = MockServer::start().await;

    let body = search_results_html(&[("Red Boot Size 9", "/dp/B000RED09")]);
    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let html = client
        .fetch_search_page("Red Boot Size 9")
        .await
        .expect("expected a page body");

    let results = parse_search_results(&Page::parse(&html));
    let listings = results.listings();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "Red Boot Size 9");
    assert_eq!(listings[0].link, "/dp/B000RED09");
}

#[tokio::test]
async fn no_results_page_parses_to_the_sentinel_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><h1 id="noResultsTitle">No results</h1></body></html>"#,
        ))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let html = client
        .fetch_search_page("Unfindable Thing")
        .await
        .expect("expected a page body");

    assert_eq!(parse_search_results(&Page::parse(&html)), ResultSet::NoResults);
}

#[tokio::test]
async fn non_2xx_status_is_a_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dp/B000GONE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let url = format!("{}/dp/B000GONE", server.uri());
    let result = client.fetch_page(&url).await;

    assert!(
        matches!(result, Err(ScraperError::UnexpectedStatus { status: 404, .. })),
        "expected UnexpectedStatus(404), got: {result:?}"
    );
}

#[tokio::test]
async fn unreachable_server_is_a_typed_error() {
    let server = MockServer::start().await;
    let client = test_client(&server);
    // Nothing listens on this port once the server is dropped.
    let dead_url = format!("{}/dp/B000DEAD", server.uri());
    drop(server);

    let result = client.fetch_page(&dead_url).await;
    assert!(
        matches!(result, Err(ScraperError::Http(_))),
        "expected Http error, got: {result:?}"
    );
}
