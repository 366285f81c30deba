use crate::config::GeocoderSettings;
use crate::domain::{GeocodeResult, UNKNOWN};
use crate::fetch::{FetchError, FetchRequest, JsonFetcher};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Address keys that name the place a parcel belongs to, most specific first.
const MUNICIPALITY_KEYS: [&str; 7] = [
    "city",
    "town",
    "village",
    "township",
    "municipality",
    "hamlet",
    "suburb",
];

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("no geocoding match for {0:?}")]
    NoMatch(String),
    #[error("geocoding match for {0:?} has no county")]
    MissingCounty(String),
    #[error("geocoder returned unparsable coordinates: {0}")]
    InvalidCoordinates(String),
    #[error("unexpected geocoder response: {0}")]
    UnexpectedShape(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    address: HashMap<String, String>,
}

/// Nominatim search adapter. Takes the first match only.
pub struct NominatimGeocoder {
    fetcher: Arc<dyn JsonFetcher>,
    settings: GeocoderSettings,
}

impl NominatimGeocoder {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, settings: GeocoderSettings) -> Self {
        Self { fetcher, settings }
    }

    /// Geocode a free-text address to coordinates, county and municipality.
    ///
    /// The configured region suffix (", Pennsylvania, USA" by default) is
    /// appended to bias results toward the service area.
    pub fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        let query = self.query_for(address);
        debug!(%query, "geocoding");

        let request = FetchRequest::new(&self.settings.url, self.settings.timeout())
            .param("q", query.as_str())
            .param("format", "json")
            .param("addressdetails", "1")
            .param("limit", "1")
            .param("countrycodes", "us");

        let body = self.fetcher.get_json(&request)?;
        let places: Vec<NominatimPlace> = serde_json::from_value(body)
            .map_err(|e| GeocodeError::UnexpectedShape(e.to_string()))?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoMatch(address.to_string()))?;

        place_to_result(address, place)
    }

    fn query_for(&self, address: &str) -> String {
        let address = address.trim();
        if self.settings.region_suffix.is_empty() {
            address.to_string()
        } else {
            format!("{address}{}", self.settings.region_suffix)
        }
    }
}

fn place_to_result(address: &str, place: NominatimPlace) -> Result<GeocodeResult, GeocodeError> {
    let lat: f64 = place
        .lat
        .parse()
        .map_err(|_| GeocodeError::InvalidCoordinates(place.lat.clone()))?;
    let lon: f64 = place
        .lon
        .parse()
        .map_err(|_| GeocodeError::InvalidCoordinates(place.lon.clone()))?;

    let county = place
        .address
        .get("county")
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| GeocodeError::MissingCounty(address.to_string()))?
        .to_string();

    let municipality = MUNICIPALITY_KEYS
        .iter()
        .filter_map(|key| place.address.get(*key))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string();

    Ok(GeocodeResult {
        lat,
        lon,
        county,
        municipality,
        display_name: place.display_name,
    })
}
