//! Resolution chain for the postal code sent with availability checks.

use crate::cache::FileStore;
use crate::location::{Geocoder, LocationProvider, LocationResolver};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Cache key of the persisted postal-code entry.
pub const POSTAL_CODE_CACHE_KEY: &str = "geocode";

/// Freshness window for a cached postal code.
pub const POSTAL_CODE_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Country whose geocoding candidates are accepted by default.
pub const DEFAULT_COUNTRY: &str = "US";

/// Persisted cache entry layout: `{"postalCode": "…"}`.
#[derive(Debug, Serialize, Deserialize)]
struct CachedPostalCode {
    #[serde(rename = "postalCode")]
    postal_code: String,
}

/// Resolves the postal code for one availability check.
///
/// The chain is: caller-supplied value, then a fresh cache entry, then a
/// geolocate-and-reverse-geocode lookup gated on existing authorization.
/// Every failure along the chain degrades to "no postal code"; nothing here
/// surfaces an error to the caller.
pub struct PostalCodeResolver<P: LocationProvider, G: Geocoder> {
    store: Arc<FileStore>,
    location: LocationResolver<P>,
    geocoder: G,
    country: String,
}

impl<P: LocationProvider, G: Geocoder> PostalCodeResolver<P, G> {
    /// Create a resolver over the given store, provider, and geocoder.
    pub fn new(store: Arc<FileStore>, provider: Arc<P>, geocoder: G) -> Self {
        Self {
            store,
            location: LocationResolver::new(provider),
            geocoder,
            country: DEFAULT_COUNTRY.to_string(),
        }
    }

    /// Accept geocoding candidates from a different country.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Resolve a postal code.
    ///
    /// With `wants_code` false this returns immediately without touching
    /// the cache, the network, or the location service. An explicit code is
    /// returned unchanged and never written to the cache. Otherwise a fresh
    /// cache entry wins, and only as a last resort, when location access is
    /// already authorized, is the device located and reverse-geocoded. A
    /// successful geocode lookup is written back to the cache.
    pub async fn resolve(&self, explicit: Option<&str>, wants_code: bool) -> Option<String> {
        if !wants_code {
            return None;
        }
        if let Some(code) = explicit {
            return Some(code.to_string());
        }

        if let Some(entry) =
            self.store
                .get_json::<CachedPostalCode>(POSTAL_CODE_CACHE_KEY, POSTAL_CODE_MAX_AGE)
        {
            debug!(postal_code = %entry.postal_code, "postal code served from cache");
            return Some(entry.postal_code);
        }

        // No prompt from this path: a missing grant means no postal code.
        if !self.location.authorization_status().permits_location() {
            debug!("location access not authorized, skipping postal lookup");
            return None;
        }

        let location = self.location.current_location().await?;
        match self.geocoder.reverse_geocode(location).await {
            Ok(candidates) => {
                // Only the first candidate from the expected country counts;
                // the rest are ignored even if they carry a postal code.
                let matched = candidates
                    .into_iter()
                    .find(|c| c.country_code.as_deref() == Some(self.country.as_str()))?;
                let code = matched.postal_code?;
                self.store.put_json(
                    POSTAL_CODE_CACHE_KEY,
                    &CachedPostalCode {
                        postal_code: code.clone(),
                    },
                );
                Some(code)
            }
            Err(e) => {
                debug!(error = %e, "reverse geocoding failed");
                None
            }
        }
    }
}
