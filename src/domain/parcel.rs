// src/domain/parcel.rs

use serde::Serialize;
use serde_json::{Map, Value};

/// Placeholder for attributes the source did not provide.
pub const NOT_AVAILABLE: &str = "N/A";
/// Placeholder for administrative names and for joined fields that could not be resolved.
pub const UNKNOWN: &str = "Unknown";

/// Provenance of a parcel record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Every lookup step against a live source succeeded.
    Real,
    /// The base parcel came from a live source but the joined assessment data did not.
    Partial,
    /// Generated placeholder data.
    Demo,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Real => "real",
            DataSource::Partial => "partial",
            DataSource::Demo => "demo",
        }
    }
}

/// The normalized parcel returned to callers. Every text field holds either
/// a resolved source value or one of the fixed placeholders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelRecord {
    pub parcel_id: String,
    pub owner: String,
    pub acres: String,
    pub zoning: String,
    pub municipality: String,
    pub situs: String,
    pub land_use: String,
    pub assessment: String,
    pub county: String,
    pub data_source: DataSource,
    /// Human readable name of the source that produced the record.
    pub provider: String,
    pub raw_attributes: Map<String, Value>,
}
