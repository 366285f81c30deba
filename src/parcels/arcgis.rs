// src/parcels/arcgis.rs

use crate::fetch::{FetchRequest, JsonFetcher};
use crate::parcels::SourceError;
use crate::registry::{ArcGisLayer, QueryGeometry};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// Raw ArcGIS REST `query` response
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    features: Option<Vec<Feature>>,
    #[serde(default)]
    error: Option<ServiceError>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    attributes: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// `xmin,ymin,xmax,ymax` around (lat, lon), `buffer_deg` on each side.
pub fn envelope(lat: f64, lon: f64, buffer_deg: f64) -> String {
    format!(
        "{:.7},{:.7},{:.7},{:.7}",
        lon - buffer_deg,
        lat - buffer_deg,
        lon + buffer_deg,
        lat + buffer_deg
    )
}

fn base_query(url: &str, timeout: Duration) -> FetchRequest {
    FetchRequest::new(url, timeout)
        .param("outFields", "*")
        .param("returnGeometry", "false")
        .param("f", "json")
}

/// Features of `layer` intersecting the point (or a small box around it).
pub fn spatial_query(layer: &ArcGisLayer, lat: f64, lon: f64) -> FetchRequest {
    let request = base_query(&layer.url, layer.timeout)
        .param("inSR", "4326")
        .param("spatialRel", "esriSpatialRelIntersects");

    match layer.geometry {
        QueryGeometry::Envelope { buffer_deg } => request
            .param("geometry", envelope(lat, lon, buffer_deg))
            .param("geometryType", "esriGeometryEnvelope"),
        QueryGeometry::Point => request
            .param("geometry", format!("{lon:.7},{lat:.7}"))
            .param("geometryType", "esriGeometryPoint"),
    }
}

/// Rows of a table where `field` equals `value`.
pub fn attribute_query(url: &str, field: &str, value: &str, timeout: Duration) -> FetchRequest {
    let clause = format!("{field} = '{}'", value.replace('\'', "''"));
    base_query(url, timeout).param("where", clause)
}

/// Cheapest possible query, used to check an endpoint answers at all.
pub fn count_query(url: &str, timeout: Duration) -> FetchRequest {
    FetchRequest::new(url, timeout)
        .param("where", "1=1")
        .param("returnCountOnly", "true")
        .param("f", "json")
}

/// Attributes of the first feature, or why there are none.
pub fn first_feature(body: Value) -> Result<Map<String, Value>, SourceError> {
    let response: QueryResponse =
        serde_json::from_value(body).map_err(|e| SourceError::UnexpectedShape(e.to_string()))?;

    if let Some(err) = response.error {
        let message = err.message.unwrap_or_else(|| "unknown error".to_string());
        return Err(SourceError::Upstream(match err.code {
            Some(code) => format!("{code}: {message}"),
            None => message,
        }));
    }

    let attributes = response
        .features
        .ok_or_else(|| SourceError::UnexpectedShape("response has no `features`".to_string()))?
        .into_iter()
        .next()
        .map(|f| f.attributes)
        .ok_or(SourceError::NoFeatures)?;

    if attributes.is_empty() {
        return Err(SourceError::UnexpectedShape(
            "first feature has no attributes".to_string(),
        ));
    }
    Ok(attributes)
}

/// Run `request` and return the first feature's attributes.
pub fn query_first(
    fetcher: &dyn JsonFetcher,
    request: &FetchRequest,
) -> Result<Map<String, Value>, SourceError> {
    let body = fetcher.get_json(request)?;
    first_feature(body)
}
