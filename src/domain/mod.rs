pub mod geocode;
pub mod parcel;

pub use geocode::GeocodeResult;
pub use parcel::{DataSource, ParcelRecord, NOT_AVAILABLE, UNKNOWN};
