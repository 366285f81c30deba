// src/parcels/normalize.rs

use crate::registry::{FieldAliases, ParcelField};
use serde_json::{Map, Value};

/// Result of resolving every logical attribute against one attribute record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedFields {
    pub parcel_id: Option<String>,
    pub owner: Option<String>,
    pub acres: Option<String>,
    pub zoning: Option<String>,
    pub municipality: Option<String>,
    pub situs: Option<String>,
    pub land_use: Option<String>,
    pub assessment: Option<String>,
}

impl ResolvedFields {
    fn slot(&mut self, field: ParcelField) -> &mut Option<String> {
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
}

/// First candidate, in order, whose value is present, not null and not blank.
/// Numbers and booleans are returned as their JSON text.
pub fn resolve_field(attrs: &Map<String, Value>, candidates: &[String]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|key| attrs.get(key))
        .find_map(present_text)
}

fn present_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        other => Some(other.to_string()),
    }
}

/// Resolve every logical field independently.
pub fn normalize(attrs: &Map<String, Value>, aliases: &FieldAliases) -> ResolvedFields {
    let mut resolved = ResolvedFields::default();
    for field in ParcelField::ALL {
        *resolved.slot(field) = resolve_field(attrs, aliases.get(field));
    }
    resolved
}
