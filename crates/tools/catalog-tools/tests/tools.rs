use std::sync::Arc;

use catalog_async::{ClientLifecycle, Settings};
use catalog_tools::build_registry;
use catalog_tools::types::{ItemDetailsInput, PopularItemsInput, SearchItemsInput};
use catalog_tools::{CatalogTools, categories, items, popular, search};
use serde_json::json;
use wiremock::matchers::{any, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tools_for(server: &MockServer) -> CatalogTools {
    let lifecycle = ClientLifecycle::new(
        Settings::new()
            .with_api_base(server.uri())
            .with_api_key("test-key"),
    );
    CatalogTools::new(Arc::new(lifecycle))
}

fn search_input(query: &str, limit: u32) -> SearchItemsInput {
    SearchItemsInput {
        query: query.into(),
        limit,
    }
}

#[tokio::test]
async fn search_clamps_large_limit_and_passes_small_one() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "coffee"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "coffee"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let tools = tools_for(&server);
    search::search_items(&tools, search_input("coffee", 200)).await;
    search::search_items(&tools, search_input("coffee", 5)).await;
}

#[tokio::test]
async fn search_reshapes_minimal_hit() {
    let server = MockServer::start().await;

    Mock::given(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"results": [{"id": "1", "name": "Foo"}]})),
        )
        .mount(&server)
        .await;

    let reply = search::search_items(&tools_for(&server), search_input("foo", 10)).await;
    assert_eq!(
        serde_json::to_value(&reply).unwrap(),
        json!([{"id": "1", "title": "Foo", "description": "", "url": null, "tags": []}])
    );
}

#[tokio::test]
async fn search_failure_is_inline_error() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let reply = search::search_items(&tools_for(&server), search_input("x", 1)).await;
    assert_eq!(
        reply.error(),
        Some("Search failed: Invalid API key or authentication failed")
    );
}

#[tokio::test]
async fn malformed_results_are_inline_error() {
    let server = MockServer::start().await;

    Mock::given(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": "oops"})))
        .mount(&server)
        .await;

    let reply = search::search_items(&tools_for(&server), search_input("x", 1)).await;
    let msg = reply.error().unwrap();
    assert!(msg.starts_with("Search failed: "), "got: {msg}");
}

#[tokio::test]
async fn item_details_reshape_and_fallbacks() {
    let server = MockServer::start().await;

    Mock::given(path("/items/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "42",
            "title": "Pour Over",
            "description": " Bright cup. ",
            "full_description": "Long text\n",
            "url": "https://example.com/42",
            "date": "2024-01-02",
            "creator": "Sam",
            "tags": ["coffee"],
            "category": "Drinks",
            "extra": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = items::get_item_details(
        &tools_for(&server),
        ItemDetailsInput {
            item_id: "42".into(),
        },
    )
    .await;

    assert_eq!(
        serde_json::to_value(&reply).unwrap(),
        json!({
            "id": "42",
            "title": "Pour Over",
            "description": "Bright cup.",
            "full_description": "Long text",
            "url": "https://example.com/42",
            "created_date": "2024-01-02",
            "author": "Sam",
            "tags": ["coffee"],
            "category": "Drinks",
            "metadata": {}
        })
    );
}

#[tokio::test]
async fn item_not_found_is_inline_error_object() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let reply = items::get_item_details(
        &tools_for(&server),
        ItemDetailsInput {
            item_id: "gone".into(),
        },
    )
    .await;

    assert_eq!(
        serde_json::to_value(&reply).unwrap(),
        json!({"error": "Failed to get item details: Resource not found: /items/gone"})
    );
}

#[tokio::test]
async fn categories_are_reshaped() {
    let server = MockServer::start().await;

    Mock::given(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [
            {"id": "c1", "name": "Drinks", "description": "Hot and cold", "count": 12, "icon": "cup"},
            {"id": "c2", "name": "Snacks", "items": 3}
        ]})))
        .mount(&server)
        .await;

    let reply = categories::list_categories(&tools_for(&server)).await;
    assert_eq!(
        serde_json::to_value(&reply).unwrap(),
        json!([
            {"id": "c1", "name": "Drinks", "description": "Hot and cold", "item_count": 12, "icon": "cup"},
            {"id": "c2", "name": "Snacks", "description": null, "item_count": 3, "icon": null}
        ])
    );
}

#[tokio::test]
async fn categories_failure_is_inline_error() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .mount(&server)
        .await;

    let reply = categories::list_categories(&tools_for(&server)).await;
    assert_eq!(
        reply.error(),
        Some("Failed to list categories: API error 500: db down")
    );
}

#[tokio::test]
async fn popular_without_category_uses_popular_endpoint() {
    let server = MockServer::start().await;

    Mock::given(path("/popular"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [
            {"id": 7, "title": "Latte", "score": 0, "rating": 4.8}
        ]})))
        .expect(1)
        .mount(&server)
        .await;

    let reply = popular::get_popular_items(
        &tools_for(&server),
        PopularItemsInput {
            limit: 10,
            category: None,
        },
    )
    .await;

    assert_eq!(
        serde_json::to_value(&reply).unwrap(),
        json!([{
            "id": 7,
            "title": "Latte",
            "description": "",
            "url": null,
            "tags": [],
            "popularity_score": 4.8
        }])
    );
}

#[tokio::test]
async fn popular_with_category_uses_matched_id() {
    let server = MockServer::start().await;

    Mock::given(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [
            {"id": "c9", "name": "Drinks"}
        ]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/categories/c9/items"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [
            {"id": "i1", "name": "Mocha"}
        ]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let reply = popular::get_popular_items(
        &tools_for(&server),
        PopularItemsInput {
            limit: 75,
            category: Some("dRiNkS".into()),
        },
    )
    .await;

    let value = serde_json::to_value(&reply).unwrap();
    assert_eq!(value[0]["title"], "Mocha");
    assert_eq!(value[0]["popularity_score"], serde_json::Value::Null);
}

#[tokio::test]
async fn popular_with_unknown_category_skips_items_request() {
    let server = MockServer::start().await;

    Mock::given(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [
            {"id": "c1", "name": "Food"}
        ]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path_regex(r"^/categories/.+/items$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(0)
        .mount(&server)
        .await;

    let reply = popular::get_popular_items(
        &tools_for(&server),
        PopularItemsInput {
            limit: 10,
            category: Some("Drinks".into()),
        },
    )
    .await;

    assert_eq!(
        serde_json::to_value(&reply).unwrap(),
        json!([{"error": "Category 'Drinks' not found"}])
    );
}

#[tokio::test]
async fn popular_with_empty_category_behaves_like_none() {
    let server = MockServer::start().await;

    Mock::given(path("/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let reply = popular::get_popular_items(
        &tools_for(&server),
        PopularItemsInput {
            limit: 10,
            category: Some(String::new()),
        },
    )
    .await;
    assert_eq!(serde_json::to_value(&reply).unwrap(), json!([]));
}

#[tokio::test]
async fn popular_failure_is_inline_error() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let reply = popular::get_popular_items(
        &tools_for(&server),
        PopularItemsInput {
            limit: 10,
            category: None,
        },
    )
    .await;
    assert_eq!(
        reply.error(),
        Some("Failed to get popular items: Rate limit exceeded - try again later")
    );
}

#[tokio::test]
async fn registry_dispatch_returns_error_records_as_data() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let registry = build_registry(tools_for(&server));
    let out = registry
        .dispatch_json("search_items", json!({"query": "tea"}))
        .await
        .unwrap();
    assert_eq!(
        out,
        json!([{"error": "Search failed: Invalid API key or authentication failed"}])
    );
}

#[tokio::test]
async fn tools_share_one_client() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let tools = tools_for(&server);
    categories::list_categories(&tools).await;
    search::search_items(&tools, search_input("a", 1)).await;

    let client = tools.lifecycle().get_or_create().await;
    assert_eq!(client.pools_created(), 1);

    tools.lifecycle().shutdown().await;
    assert!(!tools.lifecycle().is_live().await);
}

#[tokio::test]
async fn null_description_and_null_category_name_are_tolerated() {
    let server = MockServer::start().await;

    Mock::given(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [
            {"id": "1", "title": "Foo", "description": null}
        ]})))
        .mount(&server)
        .await;
    Mock::given(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [
            {"id": "c0", "name": null},
            {"id": "c1", "name": "Drinks"}
        ]})))
        .mount(&server)
        .await;
    Mock::given(path("/categories/c1/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let tools = tools_for(&server);

    let reply = search::search_items(&tools, search_input("foo", 10)).await;
    let value = serde_json::to_value(&reply).unwrap();
    assert_eq!(value[0]["description"], "");

    let reply = popular::get_popular_items(
        &tools,
        PopularItemsInput {
            limit: 10,
            category: Some("drinks".into()),
        },
    )
    .await;
    assert_eq!(serde_json::to_value(&reply).unwrap(), json!([]));
}
