//! Surveywall - survey lifecycle SDK
//!
//! This library decides whether a monetizable survey is available for a given
//! publisher and set of options, presents that survey inside a host-provided
//! embedded web surface, and reports exactly one terminal result back to the
//! caller.
//!
//! # High-Level API
//!
//! ```ignore
//! use surveywall::options::SurveyOptions;
//! use surveywall::orchestrator::SurveyOrchestrator;
//!
//! let options = SurveyOptions::new("publisher-uuid").with_content_name("demo");
//! let orchestrator = SurveyOrchestrator::new(options)?;
//!
//! if orchestrator.check_availability().await.is_available() {
//!     let mut handle = orchestrator.present(surface);
//!     let result = handle.wait().await;
//! }
//! ```
//!
//! Rendering, overlay management, and the embedded widget itself are host
//! concerns; the host plugs in through the [`bridge::SurveySurface`],
//! [`location::LocationProvider`], [`location::Geocoder`], and
//! [`connectivity::ConnectivityProbe`] seams.

pub mod availability;
pub mod bridge;
pub mod cache;
pub mod connectivity;
pub mod location;
pub mod logging;
pub mod options;
pub mod orchestrator;
pub mod postal;

/// Version of the surveywall library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
