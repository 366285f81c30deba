pub mod arcgis;
pub mod demo;
mod error;
pub mod normalize;
pub mod regrid;
pub mod two_step;

pub use error::SourceError;

use crate::config::RegridSettings;
use crate::domain::{DataSource, GeocodeResult, ParcelRecord, NOT_AVAILABLE, UNKNOWN};
use crate::fetch::JsonFetcher;
use crate::registry::{CountyConfig, CountySource, FieldAliases, ParcelField};
use normalize::{normalize, resolve_field, ResolvedFields};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

const REGRID_PROVIDER: &str = "Regrid";

/// Fetches and normalizes parcels from whichever source a county is configured with.
pub struct ParcelSources {
    fetcher: Arc<dyn JsonFetcher>,
    regrid: RegridSettings,
    regrid_fields: FieldAliases,
}

impl ParcelSources {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, regrid: RegridSettings) -> Self {
        let regrid_fields = regrid
            .fields
            .clone()
            .unwrap_or_default()
            .or_defaults(&FieldAliases::regrid_defaults());

        Self {
            fetcher,
            regrid,
            regrid_fields,
        }
    }

    /// Whether counties missing from the registry can still be served by Regrid.
    pub fn regrid_for_unlisted(&self) -> bool {
        self.regrid.use_for_unlisted_counties && self.regrid.token().is_some()
    }

    pub fn fetch_county(
        &self,
        county: &CountyConfig,
        geo: &GeocodeResult,
    ) -> Result<ParcelRecord, SourceError> {
        info!(county = %county.name, source = county.source.kind(), "querying parcel source");

        match &county.source {
            CountySource::ArcGis(layer) => {
                let request = arcgis::spatial_query(layer, geo.lat, geo.lon);
                let attrs = arcgis::query_first(self.fetcher.as_ref(), &request)?;
                let resolved = normalize(&attrs, &county.fields);
                Ok(assemble(
                    resolved,
                    &county.name,
                    geo,
                    DataSource::Real,
                    &county.label,
                    attrs,
                ))
            }
            CountySource::TwoStep { parcel, join } => {
                let result =
                    two_step::fetch(self.fetcher.as_ref(), parcel, join, geo.lat, geo.lon)?;
                let mut resolved = normalize(&result.base, &county.fields);
                let mut raw = result.base;

                let data_source = match result.joined {
                    Some(row) => {
                        resolved.owner = resolve_field(&row, join.fields.get(ParcelField::Owner))
                            .or_else(|| Some(UNKNOWN.to_string()));
                        resolved.land_use =
                            resolve_field(&row, join.fields.get(ParcelField::LandUse))
                                .or_else(|| Some(UNKNOWN.to_string()));
                        for (key, value) in row {
                            raw.entry(key).or_insert(value);
                        }
                        DataSource::Real
                    }
                    None => {
                        resolved.owner = Some(UNKNOWN.to_string());
                        resolved.land_use = Some(UNKNOWN.to_string());
                        DataSource::Partial
                    }
                };

                Ok(assemble(
                    resolved,
                    &county.name,
                    geo,
                    data_source,
                    &county.label,
                    raw,
                ))
            }
            CountySource::Regrid => self.fetch_regrid(&county.name, &county.fields, geo),
        }
    }

    /// Regrid lookup for a county that is not in the registry.
    pub fn fetch_unlisted(&self, geo: &GeocodeResult) -> Result<ParcelRecord, SourceError> {
        info!(county = %geo.county, "querying Regrid for unlisted county");
        self.fetch_regrid(&geo.county, &self.regrid_fields, geo)
    }

    fn fetch_regrid(
        &self,
        county: &str,
        fields: &FieldAliases,
        geo: &GeocodeResult,
    ) -> Result<ParcelRecord, SourceError> {
        let attrs = regrid::fetch(self.fetcher.as_ref(), &self.regrid, geo.lat, geo.lon)?;
        let resolved = normalize(&attrs, fields);
        Ok(assemble(
            resolved,
            county,
            geo,
            DataSource::Real,
            REGRID_PROVIDER,
            attrs,
        ))
    }
}

/// Fill placeholders so no field is left empty.
fn assemble(
    resolved: ResolvedFields,
    county: &str,
    geo: &GeocodeResult,
    data_source: DataSource,
    provider: &str,
    raw_attributes: Map<String, Value>,
) -> ParcelRecord {
    let or_na = |v: Option<String>| v.unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let municipality = resolved
        .municipality
        .or_else(|| Some(geo.municipality.clone()).filter(|m| !m.trim().is_empty()))
        .unwrap_or_else(|| UNKNOWN.to_string());

    let county = Some(county.trim())
        .filter(|c| !c.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string();

    ParcelRecord {
        parcel_id: or_na(resolved.parcel_id),
        owner: or_na(resolved.owner),
        acres: or_na(resolved.acres),
        zoning: or_na(resolved.zoning),
        municipality,
        situs: or_na(resolved.situs),
        land_use: or_na(resolved.land_use),
        assessment: or_na(resolved.assessment),
        county,
        data_source,
        provider: provider.to_string(),
        raw_attributes,
    }
}
