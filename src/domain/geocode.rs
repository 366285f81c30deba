// src/domain/geocode.rs

use serde::Serialize;

/// Where an address landed. Produced once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResult {
    pub lat: f64,
    pub lon: f64,
    /// County as reported by the geocoder, e.g. "Lancaster County".
    pub county: String,
    pub municipality: String,
    pub display_name: String,
}
