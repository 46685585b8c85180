//! Debug trace-line fan-out.
//!
//! The orchestrator emits human-readable trace lines; consumers decide how
//! to present them. Lines always reach `tracing` at debug level; the sink
//! only sees them when verbose logging is enabled.

use std::sync::Arc;

/// Receiver of human-readable trace lines.
pub trait DebugSink: Send + Sync {
    /// Deliver one trace line.
    fn emit(&self, line: &str);
}

/// Per-orchestrator debug log handle.
///
/// Cheap to clone; the session loop carries its own copy.
#[derive(Clone, Default)]
pub struct DebugLog {
    verbose: bool,
    sink: Option<Arc<dyn DebugSink>>,
}

impl DebugLog {
    /// A silent log: tracing only, no sink.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Enable or disable verbose sink delivery.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Install the sink receiving verbose lines.
    pub fn set_sink(&mut self, sink: Arc<dyn DebugSink>) {
        self.sink = Some(sink);
    }

    /// Emit one trace line.
    pub fn emit(&self, line: impl AsRef<str>) {
        let line = line.as_ref();
        tracing::debug!("{}", line);
        if self.verbose {
            if let Some(sink) = &self.sink {
                sink.emit(line);
            }
        }
    }
}
