// src/tests/utils.rs
use crate::config::AppConfig;
use crate::errors::{ResultResp, ServerError};
use crate::fetch::{FetchError, FetchRequest, JsonFetcher};
use crate::state::AppState;
use astra::{Body, Request, Response};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, Mutex};

/// In-memory `JsonFetcher` that answers with canned JSON keyed by URL
/// (query string excluded) and records every request it receives.
#[derive(Default)]
pub struct FakeFetcher {
    responses: HashMap<String, Result<Value, FetchError>>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, body: Value) -> Self {
        self.responses.insert(url.to_string(), Ok(body));
        self
    }

    pub fn fail(mut self, url: &str, err: FetchError) -> Self {
        self.responses.insert(url.to_string(), Err(err));
        self
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, url: &str) -> Vec<FetchRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url == url)
            .collect()
    }
}

impl JsonFetcher for FakeFetcher {
    fn get_json(&self, request: &FetchRequest) -> Result<Value, FetchError> {
        self.requests.lock().unwrap().push(request.clone());

        self.responses
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::Network {
                    url: request.url.clone(),
                    message: "connection refused".to_string(),
                })
            })
    }
}

pub const GEOCODER_URL: &str = "https://geo.test/search";
pub const LANCASTER_PARCELS_URL: &str = "https://gis.test/lancaster/parcels/query";

/// Config with the fake geocoder and a single Lancaster County ArcGIS source.
/// `top_level` is TOML placed before any table.
pub fn test_config(top_level: &str) -> AppConfig {
    let src = format!(
        r#"
        {top_level}

        [geocoder]
        url = "{GEOCODER_URL}"

        [[counties]]
        name = "Lancaster County"
        label = "Lancaster County GIS"
        source = "arcgis"
        url = "{LANCASTER_PARCELS_URL}"
        "#
    );
    toml::from_str(&src).unwrap_or_else(|e| panic!("bad test config: {e}"))
}

pub fn test_state(config: &AppConfig, fetcher: Arc<FakeFetcher>) -> AppState {
    AppState::from_config(config, fetcher).unwrap_or_else(|e| panic!("bad test state: {e}"))
}

/// One Nominatim match in the given county.
pub fn geocoder_match(lat: f64, lon: f64, county: &str, city: &str) -> Value {
    json!([{
        "lat": lat.to_string(),
        "lon": lon.to_string(),
        "display_name": format!("{city}, {county}, Pennsylvania, United States"),
        "address": { "city": city, "county": county, "state": "Pennsylvania" }
    }])
}

pub fn post_json(path: &str, body: &str) -> Request {
    http::Request::builder()
        .method(http::Method::POST)
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(path: &str) -> Request {
    http::Request::builder()
        .method(http::Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> Value {
    serde_json::from_str(&body_string(resp)).unwrap()
}

pub fn expect_err(result: ResultResp) -> ServerError {
    match result {
        Ok(resp) => panic!("expected an error, got status {}", resp.status()),
        Err(err) => err,
    }
}
