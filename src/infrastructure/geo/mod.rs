//! Client IP geolocation.
//!
//! Provides a [`GeoProvider`] trait with an HTTP implementation and the
//! [`GeoCache`] that the redirect pipeline consults:
//! - [`IpApiProvider`] - ip-api style JSON endpoint over `reqwest`
//! - [`GeoCache`] - TTL cache in front of any provider

mod cache;
mod ip_api;
mod provider;

pub use cache::{DEFAULT_TTL, GeoCache, LOCALHOST};
pub use ip_api::{DEFAULT_ENDPOINT, IpApiProvider};
pub use provider::{GeoError, GeoProvider, UNKNOWN_LOCATION, location_from_body};

#[cfg(test)]
pub use provider::MockGeoProvider;
