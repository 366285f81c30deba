// lookup.rs
use crate::config::{DemoMode, FallbackPolicy};
use crate::domain::{GeocodeResult, ParcelRecord};
use crate::geocode::{GeocodeError, NominatimGeocoder};
use crate::parcels::{demo, ParcelSources, SourceError};
use crate::registry::CountyRegistry;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("address is required")]
    MissingAddress,
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
    #[error("parcel lookup failed for {county}: {source}")]
    Source { county: String, source: SourceError },
}

/// A successful lookup. `notice` explains why demo data was returned, if it was.
#[derive(Debug, Clone)]
pub struct LookupOutcome {
    pub geocode: GeocodeResult,
    pub parcel: ParcelRecord,
    pub notice: Option<String>,
}

/// geocode → dispatch by county → normalize, with one fallback policy for
/// every way a real source can be missing or fail.
pub struct PropertyLookup {
    geocoder: NominatimGeocoder,
    sources: ParcelSources,
    registry: CountyRegistry,
    fallback: FallbackPolicy,
    demo_mode: DemoMode,
}

impl PropertyLookup {
    pub fn new(
        geocoder: NominatimGeocoder,
        sources: ParcelSources,
        registry: CountyRegistry,
        fallback: FallbackPolicy,
        demo_mode: DemoMode,
    ) -> Self {
        Self {
            geocoder,
            sources,
            registry,
            fallback,
            demo_mode,
        }
    }

    pub fn registry(&self) -> &CountyRegistry {
        &self.registry
    }

    pub fn lookup(&self, address: &str) -> Result<LookupOutcome, LookupError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(LookupError::MissingAddress);
        }

        let geo = self.geocoder.geocode(address)?;
        info!(
            county = %geo.county,
            lat = geo.lat,
            lon = geo.lon,
            "geocoded address"
        );

        if self.forces_demo(&geo) {
            return Ok(self.demo_outcome(geo, "Demo mode is enabled; showing generated data".to_string()));
        }

        let result = match self.registry.get(&geo.county) {
            Some(county) => self.sources.fetch_county(county, &geo),
            None if self.sources.regrid_for_unlisted() => self.sources.fetch_unlisted(&geo),
            None => Err(SourceError::NotConfigured(geo.county.clone())),
        };

        match result {
            Ok(parcel) => Ok(LookupOutcome {
                geocode: geo,
                parcel,
                notice: None,
            }),
            Err(err) => match self.fallback {
                FallbackPolicy::Demo => {
                    warn!(county = %geo.county, error = %err, "falling back to demo data");
                    let notice = match &err {
                        SourceError::NotConfigured(county) => {
                            format!("No parcel data source is configured for {county}; showing demo data")
                        }
                        _ => "The parcel data source could not be reached; showing demo data"
                            .to_string(),
                    };
                    Ok(self.demo_outcome(geo, notice))
                }
                FallbackPolicy::Error => Err(LookupError::Source {
                    county: geo.county,
                    source: err,
                }),
            },
        }
    }

    fn forces_demo(&self, geo: &GeocodeResult) -> bool {
        match self.demo_mode {
            DemoMode::Off => false,
            DemoMode::Always => true,
            DemoMode::InsidePennsylvania => demo::inside_pennsylvania(geo.lat, geo.lon),
        }
    }

    fn demo_outcome(&self, geo: GeocodeResult, notice: String) -> LookupOutcome {
        let parcel = demo::generate(&mut rand::thread_rng(), geo.lat, geo.lon, Some(&geo.county));
        LookupOutcome {
            geocode: geo,
            parcel,
            notice: Some(notice),
        }
    }
}
