// errors.rs
use crate::geocode::GeocodeError;
use crate::lookup::LookupError;
use astra::Response;
use thiserror::Error;

/// Errors a route handler can end with. Messages are what the client sees;
/// the underlying cause is logged where it happens.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Upstream(String),
    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Upstream(_) | ServerError::InternalError => 500,
        }
    }
}

impl From<LookupError> for ServerError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::MissingAddress => ServerError::BadRequest("Address is required".into()),
            LookupError::Geocode(GeocodeError::NoMatch(_) | GeocodeError::MissingCounty(_)) => {
                ServerError::Upstream("Could not locate that address".into())
            }
            LookupError::Geocode(_) => ServerError::Upstream("Geocoding service failed".into()),
            LookupError::Source { .. } => {
                ServerError::Upstream("Failed to retrieve parcel data".into())
            }
        }
    }
}
