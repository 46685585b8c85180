//! Survey lifecycle orchestration.
//!
//! One [`SurveyOrchestrator`] owns one survey's lifecycle: the availability
//! check, the presentation session, and the delivery of exactly one terminal
//! [`PresentationResult`]. Availability and presentation are independent
//! steps: callers typically check availability to decide whether to show an
//! entry point, then present later. The orchestrator re-validates only
//! connectivity before presenting; re-checking availability is the caller's
//! responsibility.
//!
//! Orchestrator instances are independent: two of them share nothing but the
//! persistent cache (whole-value last-writer-wins) and whatever
//! [`LocationProvider`](crate::location::LocationProvider) the host wires in.

mod debug;
mod handle;
mod session;
mod types;

pub use debug::{DebugLog, DebugSink};
pub use handle::PresentationHandle;
pub use session::CONNECTIVITY_POLL_PERIOD;
pub use types::PresentationResult;

use crate::availability::{AvailabilityClient, AvailabilityOutcome, HttpClient, HttpError, ReqwestHttpClient};
use crate::bridge::{render_survey_html, SurveySurface, DEFAULT_LOADER_BASE64};
use crate::cache::FileStore;
use crate::connectivity::{ConnectivityProbe, TcpProbe};
use crate::location::{Geocoder, LocationProvider, NoOpGeocoder, NoOpLocationProvider};
use crate::options::SurveyOptions;
use crate::postal::PostalCodeResolver;
use session::Session;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Owns one survey's lifecycle from availability check to terminal result.
pub struct SurveyOrchestrator<H: HttpClient, L: LocationProvider, G: Geocoder> {
    options: SurveyOptions,
    client: AvailabilityClient<H>,
    postal: PostalCodeResolver<L, G>,
    connectivity: Arc<dyn ConnectivityProbe>,
    debug: DebugLog,
    loader_base64: String,
    /// Last availability outcome; `None` until a check has run.
    availability: Mutex<Option<AvailabilityOutcome>>,
    /// Postal code resolved by the last check, reused for presentation.
    postal_code: Mutex<Option<String>>,
}

impl SurveyOrchestrator<ReqwestHttpClient, NoOpLocationProvider, NoOpGeocoder> {
    /// Create an orchestrator with the production stack.
    ///
    /// Uses a reqwest HTTP client, the platform cache directory, a TCP
    /// reachability probe, and the no-op geolocation stack (hosts with a
    /// platform location service inject their own via
    /// [`with_components`](Self::with_components)).
    pub fn new(options: SurveyOptions) -> Result<Self, HttpError> {
        Self::with_endpoint(options, crate::availability::AVAILABILITY_URL)
    }

    /// Create an orchestrator with the production stack against a custom
    /// availability endpoint (staging, mock server).
    pub fn with_endpoint(
        options: SurveyOptions,
        endpoint: impl Into<String>,
    ) -> Result<Self, HttpError> {
        let http = ReqwestHttpClient::new()?;
        let store = Arc::new(FileStore::open(FileStore::default_root()));
        Ok(Self::with_components(
            options,
            AvailabilityClient::with_endpoint(http, endpoint),
            PostalCodeResolver::new(store, Arc::new(NoOpLocationProvider::new()), NoOpGeocoder::new()),
            Arc::new(TcpProbe::new()),
        ))
    }
}

impl<H: HttpClient, L: LocationProvider, G: Geocoder> SurveyOrchestrator<H, L, G> {
    /// Create an orchestrator from explicit components.
    pub fn with_components(
        options: SurveyOptions,
        client: AvailabilityClient<H>,
        postal: PostalCodeResolver<L, G>,
        connectivity: Arc<dyn ConnectivityProbe>,
    ) -> Self {
        Self {
            options,
            client,
            postal,
            connectivity,
            debug: DebugLog::disabled(),
            loader_base64: DEFAULT_LOADER_BASE64.to_string(),
            availability: Mutex::new(None),
            postal_code: Mutex::new(None),
        }
    }

    /// Enable verbose debug-line delivery to the installed sink.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.debug.set_verbose(verbose);
        self
    }

    /// Install a sink receiving verbose trace lines.
    pub fn with_debug_sink(mut self, sink: Arc<dyn DebugSink>) -> Self {
        self.debug.set_sink(sink);
        self
    }

    /// Use a caller-supplied loader image instead of the built-in one.
    pub fn with_loader_image(mut self, bytes: &[u8]) -> Self {
        self.loader_base64 = crate::bridge::encode_loader(bytes);
        self
    }

    /// The options this orchestrator was created with.
    pub fn options(&self) -> &SurveyOptions {
        &self.options
    }

    /// Outcome of the last availability check, if any.
    pub fn availability(&self) -> Option<AvailabilityOutcome> {
        *self.availability.lock().unwrap()
    }

    /// Check whether a survey is available for the configured options.
    ///
    /// Without connectivity this resolves to
    /// [`AvailabilityOutcome::Error`] without issuing a request. Otherwise
    /// the postal code is resolved first (explicit value, cache, or
    /// geolocation, see [`PostalCodeResolver`]) and a single POST decides
    /// the outcome. Availability changes over time; check shortly before
    /// presenting.
    pub async fn check_availability(&self) -> AvailabilityOutcome {
        if !self.connectivity.is_reachable() {
            self.debug.emit("no network connectivity, survey not created");
            let outcome = AvailabilityOutcome::Error;
            *self.availability.lock().unwrap() = Some(outcome);
            return outcome;
        }

        let resolved = self
            .postal
            .resolve(
                self.options.postal_code.as_deref(),
                self.options.send_postal_code,
            )
            .await;
        *self.postal_code.lock().unwrap() = resolved.clone();

        let payload = self.options.sdk_payload(resolved.as_deref());
        self.debug.emit(format!("survey create sending {}", payload));
        let outcome = self.client.check(&payload).await;
        self.debug.emit(format!("survey availability: {}", outcome));

        *self.availability.lock().unwrap() = Some(outcome);
        outcome
    }

    /// Present the survey wall on the given surface.
    ///
    /// Requires a prior check that resolved [`AvailabilityOutcome::Available`]
    /// and current connectivity; otherwise the returned handle is already
    /// terminal with [`PresentationResult::NetworkNotAvailable`] and no
    /// session is created. Must be called within a tokio runtime.
    pub fn present(&self, surface: Arc<dyn SurveySurface>) -> PresentationHandle {
        let availability = self.availability();
        if availability != Some(AvailabilityOutcome::Available)
            || !self.connectivity.is_reachable()
        {
            self.debug
                .emit("survey wall not presented: unavailable or offline");
            return PresentationHandle::resolved(PresentationResult::NetworkNotAvailable);
        }

        let postal_code = self.postal_code.lock().unwrap().clone();
        let option_json = self
            .options
            .widget_payload(postal_code.as_deref())
            .to_string();
        let html =
            render_survey_html(&self.options.publisher, &option_json, &self.loader_base64);
        self.debug
            .emit(format!("loading survey wall, option = {}", option_json));

        let cancel = CancellationToken::new();
        let (result_tx, result_rx) = watch::channel(None);
        let session = Session::create(
            Arc::clone(&surface),
            Arc::clone(&self.connectivity),
            self.debug.clone(),
            cancel.clone(),
        );
        surface.load_html(&html);

        tokio::spawn(async move {
            let result = session.run().await;
            let _ = result_tx.send(Some(result));
        });

        PresentationHandle::new(cancel, result_rx)
    }
}
