// src/tests/router_tests/page_tests.rs
use crate::errors::ServerError;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::tests::utils::*;
use std::sync::Arc;

#[test]
fn home_page_has_form_and_script() {
    let state = test_state(&test_config(""), Arc::new(FakeFetcher::new()));

    let resp = handle(get("/"), &state).unwrap();
    assert_eq!(resp.status(), 200);
    let content_type = resp
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = body_string(resp);
    assert!(body.contains("id=\"lookup-form\""));
    assert!(body.contains("/api/lookup"));
    assert!(body.contains("id=\"lookup-result\""));
}

#[test]
fn unknown_routes_are_not_found() {
    let state = test_state(&test_config(""), Arc::new(FakeFetcher::new()));

    let err = expect_err(handle(get("/nope"), &state));
    assert!(matches!(err, ServerError::NotFound));
    let page = error_to_response(err, false);
    assert_eq!(page.status(), 404);
    assert!(body_string(page).contains("Error 404"));

    let err = expect_err(handle(get("/api/lookup"), &state));
    let resp = error_to_response(err, true);
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp)["error"], "Not Found");
}
