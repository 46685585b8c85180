//! Availability check: HTTP seam, request client, and outcome classification.

mod client;
mod http;
mod types;

pub use client::{AvailabilityClient, AVAILABILITY_URL};
pub use http::{HttpClient, HttpError, ReqwestHttpClient, REQUEST_TIMEOUT_SECS};
pub use types::AvailabilityOutcome;

#[cfg(test)]
pub use http::tests::MockHttpClient;
