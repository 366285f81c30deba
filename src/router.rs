use crate::domain::{GeocodeResult, ParcelRecord};
use crate::errors::ServerError;
use crate::lookup::LookupError;
use crate::probe::{probe_endpoints, ProbeResult};
use crate::responses::{html_response, json_response, ResultResp};
use crate::state::AppState;
use crate::templates;
use astra::Request;
use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::{error, info, warn};

const MAX_BODY_BYTES: u64 = 64 * 1024;

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => html_response(templates::pages::home_page()),
        ("POST", "/api/lookup") | ("POST", "/api/lookup-property") => {
            let body: LookupRequest = read_json(&mut req)?;
            lookup(state, body.address.as_deref().unwrap_or(""))
        }
        ("GET", "/api/health") => health(state),
        ("GET", "/api/test-gis") => test_gis(state),
        _ => Err(ServerError::NotFound),
    }
}

/// Whether errors for this request should be rendered as JSON.
pub fn is_api_path(path: &str) -> bool {
    path.starts_with("/api/")
}

pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Deserialize)]
struct LookupRequest {
    #[serde(default)]
    address: Option<String>,
}

#[derive(Serialize)]
struct LookupResponse<'a> {
    success: bool,
    geocode: &'a GeocodeResult,
    parcel: &'a ParcelRecord,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<&'a str>,
}

fn lookup(state: &AppState, address: &str) -> ResultResp {
    let outcome = state.lookup.lookup(address).map_err(|e| {
        match &e {
            LookupError::MissingAddress => warn!("lookup rejected: {e}"),
            _ => error!(%address, "lookup failed: {e}"),
        }
        ServerError::from(e)
    })?;
    info!(
        county = %outcome.parcel.county,
        data_source = outcome.parcel.data_source.as_str(),
        "lookup complete"
    );

    json_response(
        200,
        &LookupResponse {
            success: true,
            geocode: &outcome.geocode,
            parcel: &outcome.parcel,
            timestamp: timestamp(),
            notice: outcome.notice.as_deref(),
        },
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse<'a> {
    status: &'static str,
    timestamp: String,
    counties: Vec<&'a str>,
    demo_mode: crate::config::DemoMode,
    fallback: crate::config::FallbackPolicy,
}

fn health(state: &AppState) -> ResultResp {
    json_response(
        200,
        &HealthResponse {
            status: "ok",
            timestamp: timestamp(),
            counties: state.registry().names(),
            demo_mode: state.demo_mode,
            fallback: state.fallback,
        },
    )
}

#[derive(Serialize)]
struct ProbeResponse {
    timestamp: String,
    results: Vec<ProbeResult>,
}

fn test_gis(state: &AppState) -> ResultResp {
    let results = probe_endpoints(
        state.fetcher.as_ref(),
        state.registry(),
        &state.regrid_url,
        state.probe_timeout,
    );

    json_response(
        200,
        &ProbeResponse {
            timestamp: timestamp(),
            results,
        },
    )
}

fn read_json<T: DeserializeOwned>(req: &mut Request) -> Result<T, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Could not read request body: {e}")))?;

    if buf.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::BadRequest("Request body too large".into()));
    }

    serde_json::from_slice(&buf)
        .map_err(|_| ServerError::BadRequest("Request body must be JSON like {\"address\": \"...\"}".into()))
}
