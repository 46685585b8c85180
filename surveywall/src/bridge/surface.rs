//! Embedded-content host interface.

use super::event::SurfaceMessage;
use tokio::sync::mpsc;

/// Host-provided embedded web surface running the survey widget.
///
/// The SDK drives the surface; the host owns rendering, the overlay window,
/// and the dismiss control. Message delivery is push-based: for every event
/// name the bridge subscribes to, the host forwards matching widget messages
/// to the given sender until `unsubscribe` is called for that name. Send
/// errors after the consumer is gone may be ignored.
pub trait SurveySurface: Send + Sync + 'static {
    /// Load the rendered survey document into the surface.
    fn load_html(&self, html: &str);

    /// Begin forwarding widget messages named `event` to `messages`.
    fn subscribe(&self, event: &str, messages: mpsc::UnboundedSender<SurfaceMessage>);

    /// Stop forwarding widget messages named `event`.
    fn unsubscribe(&self, event: &str);

    /// Instruct the widget to begin the interview.
    fn start_interview(&self);

    /// Make the dismiss affordance visible.
    fn reveal_dismiss(&self);

    /// Tear the surface down; called once when the session ends.
    fn dismiss(&self);
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Recording surface for tests; lets the test emit widget messages.
    #[derive(Default)]
    pub struct MockSurface {
        pub loaded_html: Mutex<Option<String>>,
        pub subscribed: Mutex<Vec<String>>,
        pub unsubscribed: Mutex<Vec<String>>,
        pub start_interview_calls: AtomicUsize,
        pub reveal_dismiss_calls: AtomicUsize,
        pub dismiss_calls: AtomicUsize,
        sender: Mutex<Option<mpsc::UnboundedSender<SurfaceMessage>>>,
    }

    impl MockSurface {
        pub fn new() -> Self {
            Self::default()
        }

        /// Emit a widget message through the subscribed channel.
        pub fn emit(&self, name: &str, payload: Value) {
            let sender = self.sender.lock().unwrap();
            if let Some(sender) = sender.as_ref() {
                let _ = sender.send(SurfaceMessage::new(name, payload));
            }
        }

        /// True once every subscription has been released again.
        pub fn fully_unsubscribed(&self) -> bool {
            let subscribed = self.subscribed.lock().unwrap();
            let unsubscribed = self.unsubscribed.lock().unwrap();
            !subscribed.is_empty() && *subscribed == *unsubscribed
        }
    }

    impl SurveySurface for MockSurface {
        fn load_html(&self, html: &str) {
            *self.loaded_html.lock().unwrap() = Some(html.to_string());
        }

        fn subscribe(&self, event: &str, messages: mpsc::UnboundedSender<SurfaceMessage>) {
            self.subscribed.lock().unwrap().push(event.to_string());
            *self.sender.lock().unwrap() = Some(messages);
        }

        fn unsubscribe(&self, event: &str) {
            self.unsubscribed.lock().unwrap().push(event.to_string());
        }

        fn start_interview(&self) {
            self.start_interview_calls.fetch_add(1, Ordering::SeqCst);
        }

        fn reveal_dismiss(&self) {
            self.reveal_dismiss_calls.fetch_add(1, Ordering::SeqCst);
        }

        fn dismiss(&self) {
            self.dismiss_calls.fetch_add(1, Ordering::SeqCst);
        }
    }
}
