mod nominatim;

pub use nominatim::{GeocodeError, NominatimGeocoder};
