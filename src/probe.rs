// probe.rs
use crate::fetch::JsonFetcher;
use crate::parcels::arcgis::count_query;
use crate::registry::{CountyRegistry, CountySource};
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Reachability of one configured endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub county: String,
    /// "parcels", "assessment" or "regrid"
    pub role: &'static str,
    pub url: String,
    pub reachable: bool,
    /// Set for endpoints that are listed but not called.
    pub skipped: bool,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Probe every configured county endpoint, one after another, with a short timeout.
/// Regrid is not probed since every call is billed against the token.
pub fn probe_endpoints(
    fetcher: &dyn JsonFetcher,
    registry: &CountyRegistry,
    regrid_url: &str,
    timeout: Duration,
) -> Vec<ProbeResult> {
    let mut results = Vec::new();

    for county in registry.iter() {
        match &county.source {
            CountySource::ArcGis(layer) => {
                results.push(probe_one(fetcher, &county.name, "parcels", &layer.url, timeout));
            }
            CountySource::TwoStep { parcel, join } => {
                results.push(probe_one(fetcher, &county.name, "parcels", &parcel.url, timeout));
                results.push(probe_one(fetcher, &county.name, "assessment", &join.url, timeout));
            }
            CountySource::Regrid => results.push(ProbeResult {
                county: county.name.clone(),
                role: "regrid",
                url: regrid_url.to_string(),
                reachable: false,
                skipped: true,
                elapsed_ms: 0,
                error: None,
            }),
        }
    }

    let up = results.iter().filter(|r| r.reachable).count();
    info!(probed = results.len(), reachable = up, "endpoint probe finished");
    results
}

fn probe_one(
    fetcher: &dyn JsonFetcher,
    county: &str,
    role: &'static str,
    url: &str,
    timeout: Duration,
) -> ProbeResult {
    let started = Instant::now();
    let outcome = fetcher.get_json(&count_query(url, timeout));
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let error = match outcome {
        Ok(body) => service_error(&body),
        Err(e) => Some(e.to_string()),
    };
    if let Some(e) = &error {
        warn!(%county, %url, error = %e, "endpoint unreachable");
    }

    ProbeResult {
        county: county.to_string(),
        role,
        url: url.to_string(),
        reachable: error.is_none(),
        skipped: false,
        elapsed_ms,
        error,
    }
}

/// ArcGIS answers failures with 200 and an `error` object.
fn service_error(body: &Value) -> Option<String> {
    let err = body.get("error")?;
    Some(
        err.get("message")
            .and_then(Value::as_str)
            .unwrap_or("service returned an error")
            .to_string(),
    )
}
