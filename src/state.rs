// state.rs
use crate::config::{AppConfig, ConfigError, DemoMode, FallbackPolicy};
use crate::fetch::JsonFetcher;
use crate::geocode::NominatimGeocoder;
use crate::lookup::PropertyLookup;
use crate::parcels::ParcelSources;
use crate::registry::CountyRegistry;
use std::sync::Arc;
use std::time::Duration;

/// Everything a request handler needs. Built once, shared read-only by all workers.
pub struct AppState {
    pub lookup: PropertyLookup,
    pub fetcher: Arc<dyn JsonFetcher>,
    pub fallback: FallbackPolicy,
    pub demo_mode: DemoMode,
    pub regrid_url: String,
    pub probe_timeout: Duration,
}

impl AppState {
    pub fn from_config(config: &AppConfig, fetcher: Arc<dyn JsonFetcher>) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = CountyRegistry::from_config(config)?;

        let geocoder = NominatimGeocoder::new(fetcher.clone(), config.geocoder.clone());
        let sources = ParcelSources::new(fetcher.clone(), config.regrid.clone());
        let lookup = PropertyLookup::new(
            geocoder,
            sources,
            registry,
            config.fallback,
            config.demo_mode,
        );

        Ok(Self {
            lookup,
            fetcher,
            fallback: config.fallback,
            demo_mode: config.demo_mode,
            regrid_url: config.regrid.url.clone(),
            probe_timeout: config.probe.timeout(),
        })
    }

    pub fn registry(&self) -> &CountyRegistry {
        self.lookup.registry()
    }
}
