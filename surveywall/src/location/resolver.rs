//! One-shot current-location lookup over a continuous update subscription.

use super::types::{AuthorizationStatus, Location, LocationProvider, LocationUpdate};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Serializes current-location requests against a [`LocationProvider`].
///
/// Only one request is in flight at a time: starting a new one cancels the
/// pending one, and a superseded request resolves to `None` without ever
/// consuming an update. Each request settles on the first update received;
/// platform failures degrade to the provider's last-known fix instead of
/// failing the caller.
pub struct LocationResolver<P: LocationProvider> {
    provider: Arc<P>,
    /// Set once the authorization prompt has been requested.
    authorization_requested: AtomicBool,
    /// Cancellation token of the in-flight request, if any.
    inflight: Mutex<Option<CancellationToken>>,
}

impl<P: LocationProvider> LocationResolver<P> {
    /// Create a resolver over the given provider.
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            authorization_requested: AtomicBool::new(false),
            inflight: Mutex::new(None),
        }
    }

    /// Current authorization state of the underlying provider.
    pub fn authorization_status(&self) -> AuthorizationStatus {
        self.provider.authorization_status()
    }

    /// Resolve the current location once.
    ///
    /// Cancels any request still in flight; the superseded caller resolves
    /// to `None`. Authorization is requested from the platform at most once
    /// per resolver lifetime, and only from this call path.
    pub async fn current_location(&self) -> Option<Location> {
        let token = CancellationToken::new();
        let previous = self.inflight.lock().unwrap().replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        self.provider.stop_updates();
        if !self.authorization_requested.swap(true, Ordering::SeqCst) {
            self.provider.request_authorization();
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        self.provider.start_updates(tx);

        tokio::select! {
            _ = token.cancelled() => {
                // A newer request owns the subscription now; leave it alone.
                debug!("location request superseded");
                None
            }
            update = rx.recv() => {
                let settled = match update {
                    Some(LocationUpdate::Fix(location)) => Some(location),
                    Some(LocationUpdate::Failed(reason)) => {
                        debug!(reason, "location update failed, using last known fix");
                        self.provider.last_known()
                    }
                    None => self.provider.last_known(),
                };
                self.provider.stop_updates();
                settled
            }
        }
    }
}
