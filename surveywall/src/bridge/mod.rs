//! Host ↔ embedded-content message bridge.
//!
//! The embedded survey widget emits named events; the bridge carries them
//! into the owning session as typed values and fans them out to registered
//! handlers. The widget surface itself (web view, overlay, buttons) is a
//! host collaborator behind the [`SurveySurface`] trait.

mod event;
mod registry;
mod surface;
mod template;

pub use event::{BridgeEvent, EventKind, LoadPayload, SurfaceMessage};
pub use registry::{EventHandler, MessageBridge};
pub use surface::SurveySurface;
pub use template::{encode_loader, render_survey_html, DEFAULT_LOADER_BASE64};

#[cfg(test)]
pub use surface::tests::MockSurface;
