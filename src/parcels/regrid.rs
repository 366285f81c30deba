// src/parcels/regrid.rs

use crate::config::RegridSettings;
use crate::fetch::{FetchRequest, JsonFetcher};
use crate::parcels::SourceError;
use serde_json::{Map, Value};

/// Point lookup against the Regrid parcel API, authenticated with a bearer token.
pub fn point_request(settings: &RegridSettings, token: &str, lat: f64, lon: f64) -> FetchRequest {
    FetchRequest::new(&settings.url, settings.timeout())
        .param("lat", lat.to_string())
        .param("lon", lon.to_string())
        .param("return_geometry", "false")
        .bearer(token)
}

/// Attributes of the first parcel: its `fields`, plus `context_name` and
/// `headline` copied in from the feature properties when `fields` lacks them.
pub fn first_parcel(body: Value) -> Result<Map<String, Value>, SourceError> {
    let features = body
        .get("parcels")
        .and_then(|p| p.get("features"))
        .and_then(Value::as_array)
        .ok_or(SourceError::NoFeatures)?;

    let props = features
        .first()
        .ok_or(SourceError::NoFeatures)?
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| SourceError::UnexpectedShape("parcel has no `properties`".to_string()))?;

    let mut attrs = props
        .get("fields")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    if let Some(context_name) = props.get("context").and_then(|c| c.get("name")) {
        attrs
            .entry("context_name")
            .or_insert_with(|| context_name.clone());
    }
    if let Some(headline) = props.get("headline") {
        attrs.entry("headline").or_insert_with(|| headline.clone());
    }

    Ok(attrs)
}

pub fn fetch(
    fetcher: &dyn JsonFetcher,
    settings: &RegridSettings,
    lat: f64,
    lon: f64,
) -> Result<Map<String, Value>, SourceError> {
    let token = settings.token().ok_or(SourceError::MissingToken)?;
    let body = fetcher.get_json(&point_request(settings, token, lat, lon))?;
    first_parcel(body)
}
