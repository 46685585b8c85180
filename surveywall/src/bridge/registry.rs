//! Handler registry wiring a surface's messages to session logic.

use super::event::{BridgeEvent, EventKind, SurfaceMessage};
use super::surface::SurveySurface;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::trace;

/// Handler invoked with an event's payload.
pub type EventHandler = Box<dyn Fn(&Value) + Send>;

/// Typed channel from the embedded content to host logic.
///
/// Attaching subscribes the full event vocabulary on the surface and yields
/// the receiving end of the message stream. Handlers are appended per event
/// and invoked synchronously, in registration order, when the owning session
/// dispatches a message. Detaching unsubscribes everything and drops all
/// handlers so late surface messages can never reach stale logic.
pub struct MessageBridge {
    surface: Arc<dyn SurveySurface>,
    handlers: HashMap<EventKind, Vec<EventHandler>>,
    attached: bool,
}

impl MessageBridge {
    /// Subscribe to every event the widget can emit.
    ///
    /// Returns the bridge and the surface's message stream.
    pub fn attach(
        surface: Arc<dyn SurveySurface>,
    ) -> (Self, mpsc::UnboundedReceiver<SurfaceMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        for kind in EventKind::ALL {
            surface.subscribe(kind.as_str(), tx.clone());
        }
        let bridge = Self {
            surface,
            handlers: HashMap::new(),
            attached: true,
        };
        (bridge, rx)
    }

    /// Append a handler for `kind`.
    ///
    /// Multiple handlers per event are permitted and run in registration
    /// order.
    pub fn on(&mut self, kind: EventKind, handler: impl Fn(&Value) + Send + 'static) {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    /// Dispatch one surface message to its handlers.
    ///
    /// Events without handlers and names outside the vocabulary are silently
    /// ignored.
    pub fn dispatch(&self, message: &SurfaceMessage) {
        let event = BridgeEvent::from_message(message);
        match event.kind() {
            Some(kind) => {
                if let Some(handlers) = self.handlers.get(&kind) {
                    for handler in handlers {
                        handler(&message.payload);
                    }
                }
            }
            None => {
                trace!(name = %message.name, "ignoring unknown bridge event");
            }
        }
    }

    /// Unsubscribe from the surface and drop every handler.
    ///
    /// Idempotent; also performed on drop.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        for kind in EventKind::ALL {
            self.surface.unsubscribe(kind.as_str());
        }
        self.handlers.clear();
    }
}

impl Drop for MessageBridge {
    fn drop(&mut self) {
        self.detach();
    }
}
