//! Presentation handle for result delivery and user cancellation.
//!
//! Returned by [`SurveyOrchestrator::present`](super::SurveyOrchestrator::present).
//! The handle is the caller's ownership of one presentation: it can signal
//! the user's cancel action, peek at the result without waiting, or wait
//! for the terminal result.
//!
//! # Example
//!
//! ```ignore
//! let mut handle = orchestrator.present(surface);
//!
//! // Wire the host's close button to the cancel signal.
//! let canceler = handle.clone();
//! close_button.on_press(move || canceler.cancel());
//!
//! let result = handle.wait().await;
//! ```

use super::types::PresentationResult;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Handle to one active presentation.
///
/// Cloneable; all clones observe the same presentation.
#[derive(Clone)]
pub struct PresentationHandle {
    cancel: CancellationToken,
    result_rx: watch::Receiver<Option<PresentationResult>>,
}

impl PresentationHandle {
    /// Creates a handle over a running session.
    pub(crate) fn new(
        cancel: CancellationToken,
        result_rx: watch::Receiver<Option<PresentationResult>>,
    ) -> Self {
        Self { cancel, result_rx }
    }

    /// Creates a handle that is already terminal.
    ///
    /// Used when a presentation is refused before any session exists.
    pub(crate) fn resolved(result: PresentationResult) -> Self {
        let (_tx, result_rx) = watch::channel(Some(result));
        Self {
            cancel: CancellationToken::new(),
            result_rx,
        }
    }

    /// Signal the user's cancel action.
    ///
    /// Non-blocking; the session tears down and delivers
    /// [`PresentationResult::Canceled`] unless another terminal event won
    /// first. Signaling an already-terminal presentation is a no-op.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// The terminal result, if one has been delivered yet.
    pub fn result(&self) -> Option<PresentationResult> {
        *self.result_rx.borrow()
    }

    /// Wait for the terminal result.
    pub async fn wait(&mut self) -> PresentationResult {
        loop {
            if let Some(result) = *self.result_rx.borrow() {
                return result;
            }
            if self.result_rx.changed().await.is_err() {
                // Session vanished without reporting; treat as canceled.
                return (*self.result_rx.borrow()).unwrap_or(PresentationResult::Canceled);
            }
        }
    }
}

impl std::fmt::Debug for PresentationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationHandle")
            .field("result", &self.result())
            .finish()
    }
}
