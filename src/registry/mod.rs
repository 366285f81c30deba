mod county;

pub use county::{
    ArcGisLayer, CountyConfig, CountySource, FieldAliases, JoinTable, ParcelField, QueryGeometry,
};

use crate::config::{
    check_timeout, check_url, AppConfig, ConfigError, CountyEntry, GeometryKind, SourceKind,
};
use std::collections::BTreeMap;
use std::time::Duration;

/// Immutable county name → data source table, built and checked once at startup.
#[derive(Debug, Clone, Default)]
pub struct CountyRegistry {
    counties: BTreeMap<String, CountyConfig>,
}

impl CountyRegistry {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let has_regrid_token = config.regrid.token().is_some();
        let regrid_fields = config
            .regrid
            .fields
            .clone()
            .unwrap_or_default()
            .or_defaults(&FieldAliases::regrid_defaults());

        let mut counties = BTreeMap::new();
        for entry in &config.counties {
            let county = build_county(entry, has_regrid_token, &regrid_fields)?;
            if counties.contains_key(&county.name) {
                return Err(ConfigError::DuplicateCounty(county.name));
            }
            counties.insert(county.name.clone(), county);
        }

        Ok(Self { counties })
    }

    /// Exact, case-sensitive match on the trimmed county name.
    pub fn get(&self, county: &str) -> Option<&CountyConfig> {
        self.counties.get(county.trim())
    }

    pub fn names(&self) -> Vec<&str> {
        self.counties.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountyConfig> {
        self.counties.values()
    }
}

fn build_county(
    entry: &CountyEntry,
    has_regrid_token: bool,
    regrid_fields: &FieldAliases,
) -> Result<CountyConfig, ConfigError> {
    let name = entry.name.trim().to_string();
    if name.is_empty() {
        return Err(ConfigError::BlankCountyName);
    }

    let label = entry
        .label
        .clone()
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| format!("{name} GIS"));

    let (source, fields) = match entry.source {
        SourceKind::Arcgis => {
            let layer = build_layer(&name, entry)?;
            (CountySource::ArcGis(layer), arcgis_fields(entry))
        }
        SourceKind::TwoStep => {
            let parcel = build_layer(&name, entry)?;
            let join = entry
                .join
                .as_ref()
                .ok_or_else(|| ConfigError::MissingJoin(name.clone()))?;

            check_url(&format!("county {name:?} join"), &join.url)?;
            for (field, value) in [
                ("key_field", &join.key_field),
                ("match_field", &join.match_field),
            ] {
                if value.trim().is_empty() {
                    return Err(ConfigError::BlankJoinField {
                        county: name.clone(),
                        field,
                    });
                }
            }

            let join = JoinTable {
                url: join.url.clone(),
                key_field: join.key_field.trim().to_string(),
                match_field: join.match_field.trim().to_string(),
                fields: join.fields.clone().or_defaults(&FieldAliases::arcgis_defaults()),
                timeout: parcel.timeout,
            };
            (CountySource::TwoStep { parcel, join }, arcgis_fields(entry))
        }
        SourceKind::Regrid => {
            if !has_regrid_token {
                return Err(ConfigError::MissingRegridToken(name));
            }
            let fields = entry.fields.clone().or_defaults(regrid_fields);
            (CountySource::Regrid, fields)
        }
    };

    Ok(CountyConfig {
        name,
        label,
        source,
        fields,
    })
}

fn arcgis_fields(entry: &CountyEntry) -> FieldAliases {
    entry
        .fields
        .clone()
        .or_defaults(&FieldAliases::arcgis_defaults())
}

fn build_layer(name: &str, entry: &CountyEntry) -> Result<ArcGisLayer, ConfigError> {
    let url = entry
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ConfigError::MissingUrl(name.to_string()))?;
    check_url(&format!("county {name:?}"), url)?;
    check_timeout(&format!("county {name:?}"), entry.timeout_secs)?;

    let geometry = match entry.geometry {
        GeometryKind::Envelope => {
            let buffer_deg = entry.buffer_deg;
            if !(buffer_deg > 0.0 && buffer_deg <= 0.01) {
                return Err(ConfigError::InvalidBuffer {
                    county: name.to_string(),
                    value: buffer_deg,
                });
            }
            QueryGeometry::Envelope { buffer_deg }
        }
        GeometryKind::Point => QueryGeometry::Point,
    };

    Ok(ArcGisLayer {
        url: url.to_string(),
        geometry,
        timeout: Duration::from_secs(entry.timeout_secs),
    })
}
