//! Availability-check request and response classification.

use super::http::HttpClient;
use super::types::AvailabilityOutcome;
use serde_json::Value;
use tracing::{debug, warn};

/// Availability-check endpoint.
pub const AVAILABILITY_URL: &str =
    "https://surveywall-api.survata.com/rest/interview-check/create";

/// Issues the availability POST and classifies the response.
///
/// One request per check, no automatic retries; every failure mode folds
/// into [`AvailabilityOutcome::Error`] rather than an error type, so callers
/// always receive one of the defined outcomes.
pub struct AvailabilityClient<H: HttpClient> {
    http: H,
    endpoint: String,
}

impl<H: HttpClient> AvailabilityClient<H> {
    /// Create a client against the production endpoint.
    pub fn new(http: H) -> Self {
        Self::with_endpoint(http, AVAILABILITY_URL)
    }

    /// Create a client against a custom endpoint (tests, staging).
    pub fn with_endpoint(http: H, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// The endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the request payload and classify the response.
    pub async fn check(&self, payload: &Value) -> AvailabilityOutcome {
        let body = payload.to_string();
        debug!(endpoint = %self.endpoint, %body, "availability check starting");

        match self.http.post_json(&self.endpoint, &body).await {
            Ok(bytes) => classify(&bytes),
            Err(e) => {
                warn!(error = %e, "availability request failed");
                AvailabilityOutcome::Error
            }
        }
    }
}

/// Classify a response body.
///
/// `valid == false` wins over `errorCode`; an undecodable body is an error.
/// Unknown fields are ignored.
fn classify(body: &[u8]) -> AvailabilityOutcome {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "availability response not parseable");
            return AvailabilityOutcome::Error;
        }
    };
    debug!(response = %value, "availability check response");

    if value.get("valid").and_then(Value::as_bool) == Some(false) {
        return AvailabilityOutcome::NotAvailable;
    }
    if matches!(value.get("errorCode"), Some(code) if !code.is_null()) {
        return AvailabilityOutcome::Error;
    }
    AvailabilityOutcome::Available
}
