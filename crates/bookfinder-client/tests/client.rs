//! Integration tests for `BooksClient` using wiremock HTTP mocks.

use std::time::Duration;

use bookfinder_client::{BooksClient, FetchError, LoadError};
use bookfinder_core::{OrderBy, QuerySettings, NOT_FOR_SALE, UNKNOWN_AUTHOR};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> BooksClient {
    BooksClient::with_base_url(base_url, 5, 5, "bookfinder-test/0.1")
        .expect("client construction should not fail")
}

fn volumes_url(server: &MockServer) -> String {
    format!("{}/books/v1/volumes", server.uri())
}

fn two_volume_body() -> serde_json::Value {
    json!({
        "kind": "books#volumes",
        "totalItems": 2,
        "items": [
            {
                "volumeInfo": {
                    "title": "Android Programming",
                    "authors": ["Bill Phillips"],
                    "imageLinks": { "smallThumbnail": "http://books.google.com/t1" },
                    "infoLink": "https://books.google.com/books?id=a1"
                },
                "saleInfo": {
                    "saleability": "FOR_SALE",
                    "retailPrice": { "amount": 9.99, "currencyCode": "USD" }
                }
            },
            {
                "volumeInfo": {
                    "title": "Android Internals",
                    "infoLink": "https://books.google.com/books?id=a2"
                },
                "saleInfo": { "saleability": "NOT_FOR_SALE" }
            }
        ]
    })
}

#[tokio::test]
async fn search_sends_query_parameters_and_parses_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .and(query_param("q", "android"))
        .and(query_param("maxResults", "2"))
        .and(query_param("orderBy", "newest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_volume_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&volumes_url(&server));
    let settings = QuerySettings::new("android", 2, OrderBy::NEWEST).unwrap();
    let books = client
        .search(&settings)
        .await
        .expect("search should succeed")
        .expect("non-empty body should yield Some");

    assert_eq!(books.len(), 2);
    assert_eq!(books[0].title, "Android Programming");
    assert_eq!(books[0].author, "Bill Phillips");
    assert_eq!(books[0].price_label, "9.99USD");
    assert_eq!(
        books[0].image_url.as_deref(),
        Some("http://books.google.com/t1")
    );
    assert_eq!(books[1].author, UNKNOWN_AUTHOR);
    assert_eq!(books[1].price_label, NOT_FOR_SALE);
    assert!(books[1].image_url.is_none());
}

#[tokio::test]
async fn fetch_text_returns_raw_body_on_200() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"totalItems\":0}"))
        .mount(&server)
        .await;

    let client = test_client(&volumes_url(&server));
    let body = client
        .fetch_text(&volumes_url(&server))
        .await
        .expect("fetch should succeed");
    assert_eq!(body, "{\"totalItems\":0}");
}

#[tokio::test]
async fn response_without_items_is_empty_sequence() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "kind": "books#volumes", "totalItems": 0 })),
        )
        .mount(&server)
        .await;

    let client = test_client(&volumes_url(&server));
    let books = client.fetch_books(&volumes_url(&server)).await.unwrap();
    assert_eq!(books, Some(Vec::new()));
}

#[tokio::test]
async fn empty_body_is_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = test_client(&volumes_url(&server));
    let books = client.fetch_books(&volumes_url(&server)).await.unwrap();
    assert!(books.is_none());
}

#[tokio::test]
async fn non_200_status_returns_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_json(two_volume_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&volumes_url(&server));
    let err = client
        .fetch_books(&volumes_url(&server))
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            LoadError::Fetch(FetchError::UnexpectedStatus { status: 503, .. })
        ),
        "got: {err:?}"
    );
    assert!(err.is_connectivity());
}

#[tokio::test]
async fn non_ok_success_status_is_still_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = test_client(&volumes_url(&server));
    let err = client.fetch_text(&volumes_url(&server)).await.unwrap_err();
    assert!(
        matches!(err, FetchError::UnexpectedStatus { status: 204, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_json_returns_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&volumes_url(&server));
    let err = client
        .fetch_books(&volumes_url(&server))
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)), "got: {err:?}");
    assert!(!err.is_connectivity());
}

#[tokio::test]
async fn unreachable_host_returns_fetch_error() {
    let client = test_client("http://127.0.0.1:1/books/v1/volumes");
    let settings = QuerySettings::new("android", 10, OrderBy::RELEVANCE).unwrap();
    let err = client.search(&settings).await.unwrap_err();

    assert!(
        matches!(err, LoadError::Fetch(FetchError::Http(_))),
        "got: {err:?}"
    );
    assert!(err.is_connectivity());
}

#[tokio::test]
async fn slow_response_hits_read_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(two_volume_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = BooksClient::with_base_url(&volumes_url(&server), 5, 1, "bookfinder-test/0.1")
        .expect("client construction should not fail");
    let err = client
        .fetch_text(&volumes_url(&server))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Http(_)), "got: {err:?}");
}
