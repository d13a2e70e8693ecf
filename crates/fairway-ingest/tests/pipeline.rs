//! End-to-end pipeline tests against a wiremock SerpAPI and the in-memory
//! document store.

use fairway_ingest::run_ingest;
use fairway_serp::{SearchSettings, SerpClient};
use fairway_store::memory::MemoryStore;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> SerpClient {
    SerpClient::with_base_url("test-key", 30, SearchSettings::default(), 0, 0, base_url)
        .expect("client construction should not fail")
}

fn golf_page0() -> serde_json::Value {
    serde_json::json!({
        "shopping_results": [
            {
                "title": "PING G430 Driver",
                "extracted_price": 100.0,
                "link": "https://shop.example/driver",
                "source": "Golf Town",
                "product_id": "P1"
            },
            {
                "title": "PING G430 Driver (sale)",
                "extracted_price": 90.0,
                "link": "https://other.example/driver",
                "source": "TaylorMade Direct",
                "product_id": "P1"
            }
        ]
    })
}

fn golf_page1() -> serde_json::Value {
    serde_json::json!({
        "shopping_results": [
            {
                "title": "Odyssey Putter",
                "extracted_price": 50.0,
                "link": "https://shop.example/putter"
            }
        ]
    })
}

async fn mount_query(server: &MockServer, query: &str, page0: serde_json::Value, page1: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", query))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page0))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", query))
        .and(query_param("start", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page1))
        .mount(server)
        .await;
}

#[tokio::test]
async fn run_replaces_collection_with_aggregated_snapshot() {
    let server = MockServer::start().await;
    mount_query(&server, "golf", golf_page0(), golf_page1()).await;

    let store = MemoryStore::new();
    store.seed("offers", 3).await;

    let client = test_client(&server.uri());
    let summary = run_ingest(&client, &store, "offers", 2, "CAD", &["golf".to_string()])
        .await
        .expect("run should succeed");

    assert_eq!(summary.products, 2);
    assert_eq!(summary.offers, 3);
    assert!(summary.failed_queries.is_empty());

    // Stale documents are gone; only the new snapshot remains.
    assert_eq!(store.delete_commits().await, 1);
    let docs = store.documents("offers").await;
    assert_eq!(docs.len(), 2);

    let grouped = &docs[0];
    assert_eq!(grouped["product_id"], "P1");
    assert_eq!(grouped["offers"].as_array().unwrap().len(), 2);
    // rust_decimal serializes as a string.
    assert_eq!(grouped["lowest_price"], "90");
    assert_eq!(grouped["product_query"], "golf");

    let standalone = &docs[1];
    assert!(standalone["product_id"].is_null());
    assert_eq!(standalone["lowest_price"], "50");
}

#[tokio::test]
async fn failed_query_is_isolated_from_the_rest() {
    let server = MockServer::start().await;
    mount_query(&server, "golf", golf_page0(), golf_page1()).await;
    // The "golf bags" query fails on every page.
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "golf bags"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let client = test_client(&server.uri());
    let queries = vec!["golf bags".to_string(), "golf".to_string()];
    let summary = run_ingest(&client, &store, "offers", 2, "CAD", &queries)
        .await
        .expect("run should succeed despite one failed query");

    assert_eq!(summary.failed_queries, vec!["golf bags".to_string()]);
    assert_eq!(summary.products, 2);
    assert_eq!(summary.offers, 3);
    assert_eq!(store.len("offers").await, 2);
}

#[tokio::test]
async fn run_with_no_viable_results_writes_nothing() {
    let server = MockServer::start().await;
    let empty = serde_json::json!({ "shopping_results": [] });
    mount_query(&server, "golf", empty.clone(), empty).await;

    let store = MemoryStore::new();
    store.seed("offers", 1).await;

    let client = test_client(&server.uri());
    let summary = run_ingest(&client, &store, "offers", 2, "CAD", &["golf".to_string()])
        .await
        .expect("run should succeed");

    assert_eq!(summary.products, 0);
    assert_eq!(summary.offers, 0);
    assert!(store.is_empty("offers").await, "clear still ran");
    assert_eq!(store.insert_commits().await, 0);
}

#[tokio::test]
async fn summary_message_reports_totals() {
    let server = MockServer::start().await;
    mount_query(&server, "golf", golf_page0(), golf_page1()).await;

    let store = MemoryStore::new();
    let client = test_client(&server.uri());
    let summary = run_ingest(&client, &store, "offers", 2, "CAD", &["golf".to_string()])
        .await
        .expect("run should succeed");

    assert_eq!(
        summary.message(),
        "Ingestion complete. Saved 2 products containing 3 offers."
    );
}
