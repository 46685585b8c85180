//! One active presentation: bridge wiring and the session event loop.

use super::debug::DebugLog;
use super::types::PresentationResult;
use crate::bridge::{EventKind, LoadPayload, MessageBridge, SurfaceMessage, SurveySurface};
use crate::connectivity::ConnectivityProbe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Period of the connectivity poll while a survey is on screen.
pub const CONNECTIVITY_POLL_PERIOD: Duration = Duration::from_secs(2);

/// State of one presentation, owned by the session task.
///
/// The session is the single logical thread of its presentation: bridge
/// messages, poll ticks, and the cancel signal are all consumed by one loop
/// in arrival order, so no two callbacks ever run concurrently. The first
/// terminal event wins; everything after it is a no-op.
pub(crate) struct Session {
    bridge: MessageBridge,
    surface: Arc<dyn SurveySurface>,
    connectivity: Arc<dyn ConnectivityProbe>,
    debug: DebugLog,
    messages: mpsc::UnboundedReceiver<SurfaceMessage>,
    terminals: mpsc::UnboundedReceiver<PresentationResult>,
    /// Keeps the terminal channel open even if every handler is dropped.
    _terminals_tx: mpsc::UnboundedSender<PresentationResult>,
    cancel: CancellationToken,
}

impl Session {
    /// Attach the bridge to the surface and wire the event handlers.
    pub(crate) fn create(
        surface: Arc<dyn SurveySurface>,
        connectivity: Arc<dyn ConnectivityProbe>,
        debug: DebugLog,
        cancel: CancellationToken,
    ) -> Self {
        let (mut bridge, messages) = MessageBridge::attach(Arc::clone(&surface));
        let (terminals_tx, terminals) = mpsc::unbounded_channel();

        {
            let surface = Arc::clone(&surface);
            bridge.on(EventKind::Ready, move |_| {
                surface.start_interview();
            });
        }
        {
            let surface = Arc::clone(&surface);
            let terminals = terminals_tx.clone();
            let debug_load = debug.clone();
            bridge.on(EventKind::Load, move |payload| {
                debug_load.emit(format!("survey wall loaded, data {}", payload));
                // Payloads without shape carry no status and trigger nothing.
                let Some(load) = LoadPayload::from_value(payload) else {
                    return;
                };
                if load.is_monetizable() {
                    surface.reveal_dismiss();
                } else {
                    let _ = terminals.send(PresentationResult::CreditEarned);
                }
            });
        }
        for (kind, result) in [
            (EventKind::InterviewComplete, PresentationResult::Completed),
            (EventKind::InterviewSkip, PresentationResult::Skipped),
            (
                EventKind::NoSurveyAvailable,
                PresentationResult::NoSurveyAvailable,
            ),
        ] {
            let terminals = terminals_tx.clone();
            bridge.on(kind, move |_| {
                let _ = terminals.send(result);
            });
        }

        Self {
            bridge,
            surface,
            connectivity,
            debug,
            messages,
            terminals,
            _terminals_tx: terminals_tx,
            cancel,
        }
    }

    /// Run until the first terminal event, tear down, and return the result.
    ///
    /// The bridge is detached and the poll timer dropped before the result
    /// becomes observable to the caller.
    pub(crate) async fn run(mut self) -> PresentationResult {
        let mut poll = tokio::time::interval(CONNECTIVITY_POLL_PERIOD);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let result = loop {
            // A handler may have queued a terminal result during the last
            // dispatch; it must win over any still-pending message.
            if let Ok(result) = self.terminals.try_recv() {
                break result;
            }
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    self.debug.emit("survey dismissed by user");
                    break PresentationResult::Canceled;
                }
                Some(message) = self.messages.recv() => {
                    self.debug.emit(format!("survey event '{}'", message.name));
                    self.bridge.dispatch(&message);
                }
                _ = poll.tick() => {
                    if !self.connectivity.is_reachable() {
                        self.debug.emit("network lost during presentation");
                        break PresentationResult::NetworkNotAvailable;
                    }
                }
            }
        };

        self.bridge.detach();
        self.surface.dismiss();
        self.debug.emit(format!("survey finished: {}", result));
        result
    }
}
