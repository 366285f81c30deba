// src/tests/router_tests/health_tests.rs
use crate::router::handle;
use crate::tests::utils::*;
use serde_json::json;
use std::sync::Arc;

#[test]
fn health_is_ok_with_timestamp_and_counties() {
    let state = test_state(&test_config(""), Arc::new(FakeFetcher::new()));

    let resp = handle(get("/api/health"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["counties"], json!(["Lancaster County"]));
    assert_eq!(body["demoMode"], "off");
    assert_eq!(body["fallback"], "demo");
    assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
}

#[test]
fn health_does_not_touch_upstreams() {
    let fetcher = Arc::new(FakeFetcher::new());
    let state = test_state(&test_config(""), fetcher.clone());

    handle(get("/api/health"), &state).unwrap();
    assert!(fetcher.requests().is_empty());
}

#[test]
fn test_gis_reports_reachability() {
    let fetcher = Arc::new(FakeFetcher::new().respond(LANCASTER_PARCELS_URL, json!({ "count": 10 })));
    let state = test_state(&test_config(""), fetcher);

    let body = body_json(handle(get("/api/test-gis"), &state).unwrap());
    let results = body["results"].as_array().unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["county"], "Lancaster County");
    assert_eq!(results[0]["role"], "parcels");
    assert_eq!(results[0]["reachable"], true);
}
