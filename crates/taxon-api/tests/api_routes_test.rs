//! HTTP tests driving the router in-process with an in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use taxon_api::{build_router, AppState, ServerConfig};
use taxon_db::MemoryIndexStore;
use taxon_index::{encode_segment, Settings, TaxonomyRegistry};

fn test_app() -> Router {
    let registry =
        TaxonomyRegistry::activate(&Settings::default(), Arc::new(MemoryIndexStore::new()))
            .expect("default settings activate");
    build_router(AppState::new(registry), &ServerConfig::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, json)
}

fn tags_url() -> String {
    format!("/~taxonomy/{}/", encode_segment("tags"))
}

#[tokio::test]
async fn test_health_check_ok() {
    let app = test_app();
    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_namespace_index_lists_builtin_taxonomies() {
    let app = test_app();
    let (status, json) = send(&app, "GET", "/~taxonomy/", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json["taxonomies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["tags", "categories"]);
}

#[tokio::test]
async fn test_index_then_browse_term_pages() {
    let app = test_app();
    let item = json!({
        "location": "/posts/hello.html",
        "taxonomy": { "categories": ["News"] },
        "created": "2026-01-02T03:04:05Z",
        "content": "<p>Shipping #Rust today</p>"
    });
    let (status, json) = send(&app, "PUT", "/api/v1/locations", Some(item)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcomes"][0]["terms"], json!(["rust"]));
    assert_eq!(json["outcomes"][1]["terms"], json!(["news"]));

    let (status, list) = send(&app, "GET", &tags_url(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["terms"][0]["term"], "rust");
    assert_eq!(list["terms"][0]["count"], 1);

    let term_url = list["terms"][0]["url"].as_str().unwrap().to_string();
    let (status, page) = send(&app, "GET", &term_url, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["entries"][0]["location"], "/posts/hello.html");
}

#[tokio::test]
async fn test_page_out_of_range_is_not_found() {
    let app = test_app();
    let (status, _) = send(&app, "GET", &format!("{}?page=1", tags_url()), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, json) = send(&app, "GET", &format!("{}?page=2", tags_url()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());
    let (status, _) = send(&app, "GET", &format!("{}?page=two", tags_url()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_taxonomy_is_not_found() {
    let app = test_app();
    let uri = format!("/~taxonomy/{}/", encode_segment("nope"));
    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deindex_location() {
    let app = test_app();
    let item = json!({ "location": "/a", "content": "#one #two" });
    send(&app, "PUT", "/api/v1/locations", Some(item)).await;

    let (status, json) = send(&app, "DELETE", "/api/v1/locations?location=/a", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], 2);

    let (_, list) = send(&app, "GET", &tags_url(), None).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn test_empty_location_is_rejected() {
    let app = test_app();
    let item = json!({ "location": "  ", "content": "#one" });
    let (status, _) = send(&app, "PUT", "/api/v1/locations", Some(item)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_render_links_terms_outside_code() {
    let app = test_app();
    let body = json!({ "html": "<p>#rust</p><code>#rust</code>" });
    let (status, json) = send(&app, "POST", "/api/v1/render", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["changed"], true);
    let html = json["html"].as_str().unwrap();
    assert!(html.contains("data-tags=\"rust\""));
    assert!(html.ends_with("<code>#rust</code>"));
}
