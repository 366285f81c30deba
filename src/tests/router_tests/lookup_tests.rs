// src/tests/router_tests/lookup_tests.rs
use crate::fetch::FetchError;
use crate::router::handle;
use crate::tests::utils::*;
use serde_json::json;
use std::sync::Arc;

fn lancaster_parcel() -> serde_json::Value {
    json!({ "features": [{ "attributes": {
        "PIN": "333-19920-0-0000",
        "OWNER_NAME": "COUNTY OF LANCASTER",
        "CALC_ACRES": 0.81,
        "ZONING": "CBD",
        "LAND_USE": "Government"
    } }] })
}

#[test]
fn configured_county_returns_real_parcel() {
    let fetcher = Arc::new(
        FakeFetcher::new()
            .respond(GEOCODER_URL, geocoder_match(40.0397, -76.3055, "Lancaster County", "Lancaster"))
            .respond(LANCASTER_PARCELS_URL, lancaster_parcel()),
    );
    let state = test_state(&test_config(""), fetcher.clone());

    let resp = handle(
        post_json("/api/lookup", r#"{"address": "50 N Duke St, Lancaster, PA 17602"}"#),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert_eq!(body["success"], true);
    assert_eq!(body["geocode"]["county"], "Lancaster County");
    assert!(body["parcel"]["county"].as_str().unwrap().contains("Lancaster"));
    assert_eq!(body["parcel"]["dataSource"], "real");
    assert_eq!(body["parcel"]["owner"], "COUNTY OF LANCASTER");
    assert_eq!(body["parcel"]["situs"], "N/A");
    assert!(body.get("notice").is_none());
    assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());

    // one geocode call, one parcel call
    assert_eq!(fetcher.requests().len(), 2);
}

#[test]
fn legacy_path_is_an_alias() {
    let fetcher = Arc::new(
        FakeFetcher::new()
            .respond(GEOCODER_URL, geocoder_match(40.0397, -76.3055, "Lancaster County", "Lancaster"))
            .respond(LANCASTER_PARCELS_URL, lancaster_parcel()),
    );
    let state = test_state(&test_config(""), fetcher);

    let resp = handle(
        post_json("/api/lookup-property", r#"{"address": "50 N Duke St"}"#),
        &state,
    )
    .unwrap();
    assert_eq!(body_json(resp)["parcel"]["parcelId"], "333-19920-0-0000");
}

#[test]
fn unregistered_county_gets_tagged_demo_data() {
    let fetcher = Arc::new(
        FakeFetcher::new().respond(GEOCODER_URL, geocoder_match(40.34, -76.41, "Lebanon County", "Lebanon")),
    );
    let state = test_state(&test_config(""), fetcher.clone());

    let resp = handle(post_json("/api/lookup", r#"{"address": "400 S 8th St, Lebanon"}"#), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert_eq!(body["parcel"]["dataSource"], "demo");
    assert_eq!(body["parcel"]["county"], "Lebanon County");
    assert_eq!(body["parcel"]["situs"], "Property Address (Demo Data)");
    assert!(body["notice"].as_str().unwrap().contains("Lebanon County"));
    assert!(body.get("error").is_none());
    // no parcel source was called
    assert_eq!(fetcher.requests().len(), 1);
}

#[test]
fn failing_source_falls_back_to_demo_under_demo_policy() {
    let fetcher = Arc::new(
        FakeFetcher::new()
            .respond(GEOCODER_URL, geocoder_match(40.0397, -76.3055, "Lancaster County", "Lancaster"))
            .fail(
                LANCASTER_PARCELS_URL,
                FetchError::Status { url: LANCASTER_PARCELS_URL.to_string(), status: 502 },
            ),
    );
    let state = test_state(&test_config(""), fetcher);

    let body = body_json(
        handle(post_json("/api/lookup", r#"{"address": "50 N Duke St"}"#), &state).unwrap(),
    );
    assert_eq!(body["parcel"]["dataSource"], "demo");
    assert_eq!(body["parcel"]["municipality"], "Lancaster City");
    assert!(body["notice"].as_str().unwrap().contains("could not be reached"));
}

#[test]
fn error_policy_surfaces_source_failures() {
    let fetcher = Arc::new(
        FakeFetcher::new()
            .respond(GEOCODER_URL, geocoder_match(40.0397, -76.3055, "Lancaster County", "Lancaster"))
            .respond(LANCASTER_PARCELS_URL, json!({ "features": [] })),
    );
    let state = test_state(&test_config(r#"fallback = "error""#), fetcher);

    let err = expect_err(handle(post_json("/api/lookup", r#"{"address": "50 N Duke St"}"#), &state));
    assert_eq!(err.status(), 500);
    assert_eq!(err.to_string(), "Failed to retrieve parcel data");
}

#[test]
fn error_policy_rejects_unregistered_county() {
    let fetcher = Arc::new(
        FakeFetcher::new().respond(GEOCODER_URL, geocoder_match(40.34, -76.41, "Lebanon County", "Lebanon")),
    );
    let state = test_state(&test_config(r#"fallback = "error""#), fetcher);

    let err = expect_err(handle(post_json("/api/lookup", r#"{"address": "Lebanon"}"#), &state));
    assert_eq!(err.status(), 500);
}

#[test]
fn demo_mode_inside_pennsylvania_skips_real_source() {
    let fetcher = Arc::new(
        FakeFetcher::new()
            .respond(GEOCODER_URL, geocoder_match(40.0397, -76.3055, "Lancaster County", "Lancaster"))
            .respond(LANCASTER_PARCELS_URL, lancaster_parcel()),
    );
    let state = test_state(&test_config(r#"demo_mode = "inside_pennsylvania""#), fetcher.clone());

    let body = body_json(
        handle(post_json("/api/lookup", r#"{"address": "50 N Duke St"}"#), &state).unwrap(),
    );
    assert_eq!(body["parcel"]["dataSource"], "demo");
    assert!(fetcher.requests_to(LANCASTER_PARCELS_URL).is_empty());
}

#[test]
fn demo_mode_always_applies_outside_pennsylvania() {
    // Lancaster County, Nebraska: registered name, coordinates well west of the PA box.
    let fetcher = Arc::new(
        FakeFetcher::new()
            .respond(GEOCODER_URL, geocoder_match(40.8136, -96.7026, "Lancaster County", "Lincoln"))
            .respond(LANCASTER_PARCELS_URL, lancaster_parcel()),
    );
    let state = test_state(&test_config(r#"demo_mode = "always""#), fetcher.clone());

    let body = body_json(
        handle(post_json("/api/lookup", r#"{"address": "555 S 10th St, Lincoln"}"#), &state).unwrap(),
    );
    assert_eq!(body["success"], true);
    assert_eq!(body["parcel"]["dataSource"], "demo");
    assert!(body["notice"].as_str().unwrap().contains("Demo mode"));
    assert!(fetcher.requests_to(LANCASTER_PARCELS_URL).is_empty());
    assert_eq!(fetcher.requests().len(), 1);
}

#[test]
fn feature_without_attributes_falls_back_to_demo() {
    let fetcher = Arc::new(
        FakeFetcher::new()
            .respond(GEOCODER_URL, geocoder_match(40.0397, -76.3055, "Lancaster County", "Lancaster"))
            .respond(LANCASTER_PARCELS_URL, json!({ "features": [{ "geometry": { "x": -76.3, "y": 40.0 } }] })),
    );
    let state = test_state(&test_config(""), fetcher);

    let body = body_json(
        handle(post_json("/api/lookup", r#"{"address": "50 N Duke St"}"#), &state).unwrap(),
    );
    assert_eq!(body["parcel"]["dataSource"], "demo");
    assert!(body["notice"].is_string());
}

#[test]
fn failed_geocode_is_an_error_without_parcel() {
    let fetcher = Arc::new(FakeFetcher::new().respond(GEOCODER_URL, json!([])));
    let state = test_state(&test_config(""), fetcher.clone());

    let err = expect_err(handle(post_json("/api/lookup", r#"{"address": "zzzz not a place"}"#), &state));
    assert_eq!(err.status(), 500);
    assert!(fetcher.requests_to(LANCASTER_PARCELS_URL).is_empty());

    let resp = crate::responses::error_to_response(err, true);
    assert_eq!(resp.status(), 500);
    let body = body_json(resp);
    assert_eq!(body["success"], false);
    assert!(body.get("parcel").is_none());
    assert_eq!(body["details"], "Check server logs for more information");
}

#[test]
fn unreachable_geocoder_is_an_error() {
    let fetcher = Arc::new(FakeFetcher::new());
    let state = test_state(&test_config(""), fetcher);

    let err = expect_err(handle(post_json("/api/lookup", r#"{"address": "50 N Duke St"}"#), &state));
    assert_eq!(err.to_string(), "Geocoding service failed");
}

#[test]
fn missing_or_blank_address_is_bad_request() {
    let fetcher = Arc::new(FakeFetcher::new());
    let state = test_state(&test_config(""), fetcher.clone());

    for body in [r#"{}"#, r#"{"address": ""}"#, r#"{"address": "   "}"#, r#"{"address": null}"#] {
        let err = expect_err(handle(post_json("/api/lookup", body), &state));
        assert_eq!(err.status(), 400, "body {body}");
        assert_eq!(err.to_string(), "Address is required");
    }

    let resp = crate::responses::error_to_response(
        expect_err(handle(post_json("/api/lookup", "{}"), &state)),
        true,
    );
    let body = body_json(resp);
    assert_eq!(body["error"], "Address is required");
    assert!(body.get("details").is_none());

    // nothing reached the geocoder
    assert!(fetcher.requests().is_empty());
}

#[test]
fn non_json_body_is_bad_request() {
    let state = test_state(&test_config(""), Arc::new(FakeFetcher::new()));

    let err = expect_err(handle(post_json("/api/lookup", "address=50+N+Duke"), &state));
    assert_eq!(err.status(), 400);
}

#[test]
fn oversized_body_is_rejected() {
    let state = test_state(&test_config(""), Arc::new(FakeFetcher::new()));
    let huge = format!(r#"{{"address": "{}"}}"#, "a".repeat(70 * 1024));

    let err = expect_err(handle(post_json("/api/lookup", &huge), &state));
    assert_eq!(err.to_string(), "Request body too large");
}
