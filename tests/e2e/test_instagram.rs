use crate::e2e::helpers;

use helpers::fake_upstream::{instagram_post, CannedResponse};
use helpers::{TestContext, TestEnv, INSTAGRAM_TOKEN};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

const CACHE_CONTROL: &str = "s-maxage=300, stale-while-revalidate=300";

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_normalized_posts(ctx: &TestContext) {
    ctx.upstream.set_instagram(CannedResponse::json(json!({
        "data": [instagram_post("101", "Opening ceremony"), instagram_post("102", "Day two")]
    })));

    let response = ctx.client.get("/api/social/instagram?limit=2").await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("cache-control", CACHE_CONTROL);

    assert_eq!(
        response.body.as_ref().unwrap(),
        &json!({
            "items": [
                {
                    "id": "101",
                    "platform": "instagram",
                    "text": "Opening ceremony",
                    "mediaUrl": "https://cdn.example.com/101.jpg",
                    "permalink": "https://www.instagram.com/p/101/",
                    "timestamp": "2024-03-01T10:00:00+0000",
                    "username": "vihaya.official"
                },
                {
                    "id": "102",
                    "platform": "instagram",
                    "text": "Day two",
                    "mediaUrl": "https://cdn.example.com/102.jpg",
                    "permalink": "https://www.instagram.com/p/102/",
                    "timestamp": "2024-03-01T10:00:00+0000",
                    "username": "vihaya.official"
                }
            ]
        })
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_forward_limit_fields_and_token(ctx: &TestContext) {
    ctx.client.get("/api/social/instagram?limit=2").await.unwrap();

    let query = ctx
        .upstream
        .instagram_request()
        .and_then(|r| r.query)
        .expect("Instagram was not called");

    assert!(query.contains("limit=2"), "query: {query}");
    assert!(
        query.contains(&format!("access_token={}", INSTAGRAM_TOKEN)),
        "query: {query}"
    );
    assert!(query.contains("fields=id%2Ccaption%2Cmedia_type%2Cmedia_url%2Cpermalink%2Cthumbnail_url%2Ctimestamp%2Cusername"), "query: {query}");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_default_limit_to_nine(ctx: &TestContext) {
    ctx.client.get("/api/social/instagram").await.unwrap();
    let query = ctx.upstream.instagram_request().and_then(|r| r.query).unwrap();
    assert!(query.contains("limit=9"), "query: {query}");

    ctx.client.get("/api/social/instagram?limit=abc").await.unwrap();
    let query = ctx.upstream.instagram_request().and_then(|r| r.query).unwrap();
    assert!(query.contains("limit=9"), "query: {query}");
    assert!(!query.contains("NaN"), "query: {query}");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_thumbnail_when_media_url_is_missing(ctx: &TestContext) {
    ctx.upstream.set_instagram(CannedResponse::json(json!({
        "data": [{
            "id": "reel-1",
            "media_type": "VIDEO",
            "thumbnail_url": "https://cdn.example.com/reel-1-thumb.jpg",
            "permalink": "https://www.instagram.com/reel/reel-1/"
        }]
    })));

    let response = ctx.client.get("/api/social/instagram").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.items()[0]["mediaUrl"],
        json!("https://cdn.example.com/reel-1-thumb.jpg")
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_treat_missing_data_as_empty_feed(ctx: &TestContext) {
    ctx.upstream
        .set_instagram(CannedResponse::json(json!({ "paging": { "cursors": {} } })));

    let response = ctx.client.get("/api/social/instagram").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert!(response.items().is_empty());
    assert_eq!(response.field("error"), None);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_treat_null_data_as_empty_feed(ctx: &TestContext) {
    ctx.upstream
        .set_instagram(CannedResponse::json(json!({ "data": null })));

    let response = ctx.client.get("/api/social/instagram").await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("cache-control", CACHE_CONTROL);
    assert!(response.items().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_forward_upstream_rejection(ctx: &TestContext) {
    let error_body = r#"{"error":{"message":"Error validating access token","type":"OAuthException","code":190}}"#;
    ctx.upstream
        .set_instagram(CannedResponse::raw(StatusCode::BAD_REQUEST, error_body));

    let response = ctx.client.get("/api/social/instagram").await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_header_missing("cache-control");
    assert!(response.items().is_empty());
    assert_eq!(response.field("error"), Some(error_body));
    assert_eq!(ctx.upstream.instagram_hits(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_forward_upstream_server_errors_without_retrying(ctx: &TestContext) {
    ctx.upstream.set_instagram(CannedResponse::raw(
        StatusCode::SERVICE_UNAVAILABLE,
        "Service temporarily unavailable",
    ));

    let response = ctx.client.get("/api/social/instagram").await.unwrap();

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.field("error"), Some("Service temporarily unavailable"));
    assert_eq!(ctx.upstream.instagram_hits(), 1);
}

#[tokio::test]
async fn it_should_retry_server_errors_when_enabled() {
    let ctx = TestContext::start(
        TestEnv::configured()
            .set("UPSTREAM_MAX_RETRIES", "2")
            .set("UPSTREAM_RETRY_BASE_DELAY_MS", "1"),
    )
    .await;
    ctx.upstream
        .set_instagram(CannedResponse::raw(StatusCode::BAD_GATEWAY, "bad gateway"));

    let response = ctx.client.get("/api/social/instagram").await.unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.field("error"), Some("bad gateway"));
    assert_eq!(ctx.upstream.instagram_hits(), 3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_map_non_json_success_body_to_internal_error(ctx: &TestContext) {
    ctx.upstream
        .set_instagram(CannedResponse::raw(StatusCode::OK, "<html>maintenance</html>"));

    let response = ctx.client.get("/api/social/instagram").await.unwrap();

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.items().is_empty());
    assert!(response.field("error").is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn it_should_report_missing_token_without_failing() {
    let ctx = TestContext::start(TestEnv::configured().unset("INSTAGRAM_ACCESS_TOKEN")).await;

    let response = ctx.client.get("/api/social/instagram").await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header_missing("cache-control");
    assert_eq!(
        response.body.as_ref().unwrap(),
        &json!({ "items": [], "message": "INSTAGRAM_ACCESS_TOKEN not configured" })
    );
    assert_eq!(ctx.upstream.instagram_hits(), 0);
}

#[tokio::test]
async fn it_should_treat_empty_token_as_missing() {
    let ctx = TestContext::start(TestEnv::configured().set("INSTAGRAM_ACCESS_TOKEN", "")).await;

    let response = ctx.client.get("/api/social/instagram").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.field("message"),
        Some("INSTAGRAM_ACCESS_TOKEN not configured")
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_identical_items_for_repeated_requests(ctx: &TestContext) {
    ctx.upstream.set_instagram(CannedResponse::json(json!({
        "data": [instagram_post("3", "c"), instagram_post("1", "a"), instagram_post("2", "b")]
    })));

    let first = ctx.client.get("/api/social/instagram").await.unwrap();
    let second = ctx.client.get("/api/social/instagram").await.unwrap();

    assert_eq!(first.items(), second.items());
    let ids: Vec<&str> = first
        .items()
        .iter()
        .filter_map(|i| i["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["3", "1", "2"]);
}
