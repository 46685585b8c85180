//! Geolocation types and host-facing traits.

use std::future::Future;
use thiserror::Error;
use tokio::sync::mpsc;

/// A geographic fix delivered by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// One reverse-geocoding candidate.
///
/// Candidates may carry neither, either, or both fields; the postal-code
/// resolution layer decides what to do with incomplete ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    /// ISO country code, e.g. `"US"`.
    pub country_code: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
}

/// Platform authorization state for location access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    /// The user has not been asked yet.
    NotDetermined,
    /// Access was refused or is restricted.
    Denied,
    /// Access is granted.
    Authorized,
}

impl AuthorizationStatus {
    /// Returns true if location access is currently permitted.
    pub fn permits_location(&self) -> bool {
        matches!(self, Self::Authorized)
    }
}

/// One message on a location update subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationUpdate {
    /// A location fix.
    Fix(Location),
    /// The platform reported a failure; carries its description.
    Failed(String),
}

/// Host interface to the platform's geolocation service.
///
/// Implementations deliver zero or more [`LocationUpdate`] messages after
/// `start_updates` until `stop_updates` is called. A new `start_updates`
/// call replaces any previous subscription, and send errors on a dropped
/// subscription may be ignored: the consumer settles on the first update
/// and stops listening.
pub trait LocationProvider: Send + Sync + 'static {
    /// Current authorization state, queried without prompting.
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Ask the platform to prompt the user for location access.
    fn request_authorization(&self);

    /// Begin delivering updates to `updates`.
    fn start_updates(&self, updates: mpsc::UnboundedSender<LocationUpdate>);

    /// Stop delivering updates.
    fn stop_updates(&self);

    /// Most recent fix the platform still remembers, if any.
    fn last_known(&self) -> Option<Location>;
}

/// Errors from reverse geocoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The geocoding service could not be reached.
    #[error("geocoding service unavailable: {0}")]
    Unavailable(String),
    /// The service answered but the lookup failed.
    #[error("reverse geocoding failed: {0}")]
    Failed(String),
}

/// Host interface to a reverse-geocoding service.
pub trait Geocoder: Send + Sync + 'static {
    /// Resolve a location to zero or more address candidates.
    fn reverse_geocode(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<Vec<Address>, GeocodeError>> + Send;
}
