//! Inert geolocation implementations for hosts without a platform service.

use super::types::{
    Address, AuthorizationStatus, GeocodeError, Geocoder, Location, LocationProvider,
    LocationUpdate,
};
use tokio::sync::mpsc;

/// Location provider that reports denied access and delivers no fixes.
///
/// Using this provider degrades postal-code resolution to "no postal code"
/// without ever prompting anyone.
#[derive(Clone, Copy, Default)]
pub struct NoOpLocationProvider;

impl NoOpLocationProvider {
    /// Creates a new no-op provider.
    pub fn new() -> Self {
        Self
    }
}

impl LocationProvider for NoOpLocationProvider {
    fn authorization_status(&self) -> AuthorizationStatus {
        AuthorizationStatus::Denied
    }

    fn request_authorization(&self) {}

    fn start_updates(&self, updates: mpsc::UnboundedSender<LocationUpdate>) {
        let _ = updates.send(LocationUpdate::Failed(
            "no location provider configured".to_string(),
        ));
    }

    fn stop_updates(&self) {}

    fn last_known(&self) -> Option<Location> {
        None
    }
}

/// Geocoder that returns zero candidates for every location.
#[derive(Clone, Copy, Default)]
pub struct NoOpGeocoder;

impl NoOpGeocoder {
    /// Creates a new no-op geocoder.
    pub fn new() -> Self {
        Self
    }
}

impl Geocoder for NoOpGeocoder {
    async fn reverse_geocode(&self, _location: Location) -> Result<Vec<Address>, GeocodeError> {
        Ok(Vec::new())
    }
}
