//! HTTP-level tests for the API routes.

mod helpers;

use axum::http::StatusCode;
use md5::{Digest, Md5};
use serde_json::Value;

use helpers::{EMAIL, PASSWORD, TOKEN, TestApp};

#[tokio::test]
async fn test_index_envelope() {
    let app = TestApp::new().await;
    let res = app.get("/api").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["service"], "API");
    assert_eq!(res.body["api"], 1);
    assert_eq!(res.body["method"], "GET");
    assert!(res.body["time"].as_i64().unwrap() > 0);
    assert_eq!(res.body["rel"], "http://api.test/api");
    assert_eq!(res.body["href"], "http://api.test/api");
    assert!(res.body.get("errors").is_none());
    assert!(res.body.get("error").is_none());
    assert_eq!(res.header("access-control-allow-methods"), Some("GET,HEAD"));
}

#[tokio::test]
async fn test_body_is_pretty_json_in_envelope_order() {
    let app = TestApp::new().await;
    let res = app.get("/api").await;
    let text = String::from_utf8(res.raw.clone()).unwrap();

    assert!(text.starts_with("{\n  \"service\": \"API\",\n  \"api\": 1,\n  \"method\": \"GET\",\n  \"time\": "));
}

#[tokio::test]
async fn test_version_query_overrides_configured_version() {
    let app = TestApp::new().await;
    let res = app.get("/api?version=3").await;
    assert_eq!(res.body["api"], 3);
}

#[tokio::test]
async fn test_response_headers() {
    let app = TestApp::new().await;
    let res = app.get("/api").await;

    let digest = format!("{:x}", Md5::digest(&res.raw));
    assert_eq!(res.header("etag"), Some(digest.as_str()));
    assert_eq!(res.header("content-length"), Some(res.raw.len().to_string().as_str()));
    assert_eq!(res.header("content-type"), Some("application/json; charset=utf-8"));
    assert_eq!(res.header("access-control-allow-origin"), Some("*"));
    assert_eq!(res.header("access-control-allow-credentials"), Some("false"));
    assert_eq!(res.header("access-control-max-age"), Some("0"));
    assert_eq!(res.header("cache-control"), Some("no-cache, no-store, must-revalidate"));
    assert_eq!(res.header("pragma"), Some("no-cache"));
    assert!(res.header("expires").is_some());
    assert!(res.header("set-cookie").is_none());
}

#[tokio::test]
async fn test_head_has_headers_but_no_body() {
    let app = TestApp::new().await;
    let get = app.get("/api").await;
    let head = app.request("HEAD", "/api", None).await;

    assert_eq!(head.status, StatusCode::OK);
    assert!(head.raw.is_empty());
    assert!(head.header("etag").is_some());
    assert!(head.header("content-length").is_some());

    let mut get_names: Vec<_> = get.headers.keys().map(|k| k.as_str().to_string()).collect();
    let mut head_names: Vec<_> = head.headers.keys().map(|k| k.as_str().to_string()).collect();
    get_names.sort();
    head_names.sort();
    assert_eq!(get_names, head_names);
}

#[tokio::test]
async fn test_user_with_query_token() {
    let app = TestApp::new().await;
    let res = app.get(&format!("/api/user?access_token={TOKEN}")).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["access_token"], TOKEN);
    assert!(res.body.get("error").is_none());
    assert!(res.body.get("errors").is_none());
}

#[tokio::test]
async fn test_user_with_repeated_query_keys() {
    let app = TestApp::new().await;
    let res = app
        .get(&format!("/api/user?access_token={TOKEN}&page=1&page=2"))
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["access_token"], TOKEN);
    assert!(res.body.get("errors").is_none());
}

#[tokio::test]
async fn test_user_with_basic_password() {
    let app = TestApp::new().await;
    let res = app.request("GET", "/api/user", Some((EMAIL, PASSWORD))).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["access_token"], TOKEN);
}

#[tokio::test]
async fn test_user_with_basic_token() {
    let app = TestApp::new().await;
    let res = app.request("GET", "/api/user", Some((EMAIL, TOKEN))).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["access_token"], TOKEN);
}

#[tokio::test]
async fn test_user_without_credentials_is_rejected() {
    let app = TestApp::new().await;
    let res = app.get("/api/user").await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"]["code"], "invalid_request");
    assert!(res.body["error"].get("state").is_none());
    assert_eq!(
        res.errors().get("4007").map(String::as_str),
        Some("Missing bearer access token")
    );
    assert!(res.body.get("access_token").is_none());
}

#[tokio::test]
async fn test_user_with_wrong_password_is_rejected() {
    let app = TestApp::new().await;
    let res = app.request("GET", "/api/user", Some((EMAIL, "nope"))).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.errors().contains_key("4007"));
}

#[tokio::test]
async fn test_store_failure_renders_full_envelope() {
    let app = TestApp::with_broken_store();
    let res = app.get("/api/user?access_token=anything").await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["service"], "API");
    assert_eq!(res.body["api"], 1);
    assert_eq!(res.body["method"], "GET");
    assert!(res.body["time"].as_i64().unwrap() > 0);
    assert_eq!(res.body["href"], "http://api.test/api/user");
    assert_eq!(
        res.errors().get("5001").map(String::as_str),
        Some("account store unavailable")
    );
    assert!(res.body.get("access_token").is_none());

    let digest = format!("{:x}", Md5::digest(&res.raw));
    assert_eq!(res.header("etag"), Some(digest.as_str()));
    assert_eq!(res.header("access-control-allow-origin"), Some("*"));
    assert!(res.header("expires").is_some());
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new().await;
    let res = app.get("/api/nothing/here").await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.errors().get("4998").map(String::as_str),
        Some("Unknown API Request")
    );
    assert_eq!(res.body["href"], "http://api.test/api/nothing/here");
}

#[tokio::test]
async fn test_oauth_errors_unpaged() {
    let app = TestApp::new().await;
    let res = app.get("/api/oauth/errors").await;

    assert_eq!(res.body["oauth_errors"].as_array().unwrap().len(), 11);
    assert!(res.body.get("paging").is_none());
}

#[tokio::test]
async fn test_oauth_errors_paged() {
    let app = TestApp::new().await;
    let res = app.get("/api/oauth/errors?page=1&per_page=5").await;

    let items = res.body["oauth_errors"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["code"], "invalid_request");

    let paging = &res.body["paging"];
    assert_eq!(paging["page"], 1);
    assert_eq!(paging["per_page"], 5);
    assert_eq!(paging["total_pages"], 3);
    assert_eq!(paging["total_results"], 11);
    assert_eq!(paging["sort_direction"], 0);
    assert_eq!(paging["page_previous"], "");
    assert_eq!(
        paging["page_next"],
        "http://api.test/api/oauth/errors?per_page=5&sort_direction=0&page=2"
    );
}

#[tokio::test]
async fn test_oauth_errors_reversed_last_page() {
    let app = TestApp::new().await;
    let res = app.get("/api/oauth/errors?page=3&per_page=5&sort_direction=1").await;

    let items = res.body["oauth_errors"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["code"], "invalid_request");
    assert_eq!(res.body["paging"]["results_from"], 11);
    assert_eq!(res.body["paging"]["results_to"], 11);
    assert_eq!(res.body["paging"]["page_next"], Value::String(String::new()));
}
