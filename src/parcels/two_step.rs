// src/parcels/two_step.rs

use crate::fetch::JsonFetcher;
use crate::parcels::arcgis::{attribute_query, query_first, spatial_query};
use crate::parcels::normalize::resolve_field;
use crate::parcels::SourceError;
use crate::registry::{ArcGisLayer, JoinTable};
use serde_json::{Map, Value};
use tracing::warn;

/// Parcel layer row plus the assessment row joined to it, when one was found.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedParcel {
    pub base: Map<String, Value>,
    pub joined: Option<Map<String, Value>>,
}

/// Query the parcel layer, then the join table by the parcel's key.
///
/// Only the first step can fail. A missing key or a failed or empty second
/// query leaves `joined` as `None`.
pub fn fetch(
    fetcher: &dyn JsonFetcher,
    parcel: &ArcGisLayer,
    join: &JoinTable,
    lat: f64,
    lon: f64,
) -> Result<JoinedParcel, SourceError> {
    let base = query_first(fetcher, &spatial_query(parcel, lat, lon))?;

    let Some(key) = resolve_field(&base, std::slice::from_ref(&join.key_field)) else {
        warn!(key_field = %join.key_field, "parcel has no join key, returning partial record");
        return Ok(JoinedParcel { base, joined: None });
    };

    let request = attribute_query(&join.url, &join.match_field, &key, join.timeout);
    let joined = match query_first(fetcher, &request) {
        Ok(row) => Some(row),
        Err(e) => {
            warn!(%key, error = %e, "assessment join failed, returning partial record");
            None
        }
    };

    Ok(JoinedParcel { base, joined })
}
