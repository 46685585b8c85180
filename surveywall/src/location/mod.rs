//! Geolocation host seam and the serialized one-shot location resolver.
//!
//! The SDK never talks to platform location services directly. Hosts
//! implement [`LocationProvider`] and [`Geocoder`]; the
//! [`LocationResolver`] turns the provider's continuous update subscription
//! into a cancelable one-shot lookup. Hosts without a platform integration
//! can fall back to the no-op implementations, which degrade every lookup
//! to "no location available".

mod noop;
mod resolver;
mod types;

pub use noop::{NoOpGeocoder, NoOpLocationProvider};
pub use resolver::LocationResolver;
pub use types::{
    Address, AuthorizationStatus, GeocodeError, Geocoder, Location, LocationProvider,
    LocationUpdate,
};

#[cfg(test)]
pub use resolver::tests::{MockGeocoder, MockLocationProvider};
