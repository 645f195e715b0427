//! Geo module - state resolution via reverse geocoding

mod nominatim;
mod resolver;

pub use nominatim::NominatimGeocoder;
pub use resolver::{
    GeocodeError, ResolveMode, ResolveReport, ResolverError, ReverseGeocoder, StateResolver,
};
