use crate::fetch::FetchError;
use thiserror::Error;

/// Anything that keeps a parcel source from producing a record.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no parcel data source configured for {0}")]
    NotConfigured(String),
    #[error("Regrid token is not configured")]
    MissingToken,
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("parcel service reported an error: {0}")]
    Upstream(String),
    #[error("no parcel found at this location")]
    NoFeatures,
    #[error("unexpected data shape: {0}")]
    UnexpectedShape(String),
}
