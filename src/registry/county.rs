// src/registry/county.rs

use serde::Deserialize;
use std::time::Duration;

/// The logical attributes of a parcel that get resolved from source fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParcelField {
    ParcelId,
    Owner,
    Acres,
    Zoning,
    Municipality,
    Situs,
    LandUse,
    Assessment,
}

impl ParcelField {
    pub const ALL: [ParcelField; 8] = [
        ParcelField::ParcelId,
        ParcelField::Owner,
        ParcelField::Acres,
        ParcelField::Zoning,
        ParcelField::Municipality,
        ParcelField::Situs,
        ParcelField::LandUse,
        ParcelField::Assessment,
    ];
}

/// Ordered candidate source field names per logical attribute. Earlier names win.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldAliases {
    pub parcel_id: Vec<String>,
    pub owner: Vec<String>,
    pub acres: Vec<String>,
    pub zoning: Vec<String>,
    pub municipality: Vec<String>,
    pub situs: Vec<String>,
    pub land_use: Vec<String>,
    pub assessment: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl FieldAliases {
    pub fn get(&self, field: ParcelField) -> &[String] {
        match field {
            ParcelField::ParcelId => &self.parcel_id,
            ParcelField::Owner => &self.owner,
            ParcelField::Acres => &self.acres,
            ParcelField::Zoning => &self.zoning,
            ParcelField::Municipality => &self.municipality,
            ParcelField::Situs => &self.situs,
            ParcelField::LandUse => &self.land_use,
            ParcelField::Assessment => &self.assessment,
        }
    }

    fn get_mut(&mut self, field: ParcelField) -> &mut Vec<String> {
        match field {
            ParcelField::ParcelId => &mut self.parcel_id,
            ParcelField::Owner => &mut self.owner,
            ParcelField::Acres => &mut self.acres,
            ParcelField::Zoning => &mut self.zoning,
            ParcelField::Municipality => &mut self.municipality,
            ParcelField::Situs => &mut self.situs,
            ParcelField::LandUse => &mut self.land_use,
            ParcelField::Assessment => &mut self.assessment,
        }
    }

    /// Fill every empty list from `defaults`; configured lists are kept as written.
    pub fn or_defaults(mut self, defaults: &FieldAliases) -> Self {
        for field in ParcelField::ALL {
            if self.get(field).is_empty() {
                *self.get_mut(field) = defaults.get(field).to_vec();
            }
        }
        self
    }

    /// Field names commonly published by Pennsylvania county parcel layers.
    pub fn arcgis_defaults() -> Self {
        Self {
            parcel_id: names(&["PARCEL_ID", "PIN", "PARID", "ACCOUNT", "UPI"]),
            owner: names(&["OWNER", "OWNER_NAME", "OWNERNAME", "OWNER1"]),
            acres: names(&["ACRES", "CALC_ACRES", "DEEDED_ACRES", "GIS_ACRES"]),
            zoning: names(&["ZONING", "ZONE", "ZONING_CODE"]),
            municipality: names(&["MUNICIPALITY", "MUNI_NAME", "MUNI", "TOWNSHIP"]),
            situs: names(&["SITUS", "SITE_ADDR", "PROPERTY_ADDRESS", "ADDRESS"]),
            land_use: names(&["LAND_USE", "LANDUSE", "USE_DESC", "CLASS"]),
            assessment: names(&[
                "ASSESSMENT",
                "TOTAL_ASSESSMENT",
                "ASSESSED_VALUE",
                "TOTAL_VALUE",
            ]),
        }
    }

    /// Regrid `fields` names, plus `context_name` and `headline` which the
    /// Regrid adapter copies in from the feature properties.
    pub fn regrid_defaults() -> Self {
        Self {
            parcel_id: names(&["parcelnumb", "parcel_id"]),
            owner: names(&["owner"]),
            acres: names(&["ll_gisacre", "acres"]),
            zoning: names(&["zoning"]),
            municipality: names(&["city", "usps_city", "context_name"]),
            situs: names(&["address", "headline"]),
            land_use: names(&["usedesc", "usecd"]),
            assessment: names(&["saleprice"]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryGeometry {
    /// Square around the point, `buffer_deg` degrees on each side.
    Envelope { buffer_deg: f64 },
    Point,
}

/// One queryable ArcGIS REST layer or table.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcGisLayer {
    pub url: String,
    pub geometry: QueryGeometry,
    pub timeout: Duration,
}

/// Assessment table joined to the parcel layer by a shared identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinTable {
    pub url: String,
    pub key_field: String,
    pub match_field: String,
    pub fields: FieldAliases,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CountySource {
    ArcGis(ArcGisLayer),
    TwoStep { parcel: ArcGisLayer, join: JoinTable },
    Regrid,
}

impl CountySource {
    pub fn kind(&self) -> &'static str {
        match self {
            CountySource::ArcGis(_) => "arcgis",
            CountySource::TwoStep { .. } => "two_step",
            CountySource::Regrid => "regrid",
        }
    }
}

/// A validated registry entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyConfig {
    pub name: String,
    pub label: String,
    pub source: CountySource,
    pub fields: FieldAliases,
}
