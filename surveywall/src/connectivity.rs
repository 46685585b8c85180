//! Network reachability probing.
//!
//! The orchestrator needs a synchronous, point-in-time answer to "is the
//! network reachable right now", both before a check or presentation starts
//! and on the 2-second poll while a survey is on screen.

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::debug;

/// Synchronous reachability query.
pub trait ConnectivityProbe: Send + Sync + 'static {
    /// Returns true if the network is reachable at this moment.
    fn is_reachable(&self) -> bool;
}

/// Default host probed for reachability.
const DEFAULT_PROBE_HOST: &str = "surveywall-api.survata.com";

/// Default port probed for reachability.
const DEFAULT_PROBE_PORT: u16 = 443;

/// Default per-probe connect timeout.
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(1500);

/// Reachability probe that opens a short-lived TCP connection.
///
/// Name resolution failure counts as unreachable, the same as a dead link.
pub struct TcpProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    /// Probe the availability endpoint's host on port 443.
    pub fn new() -> Self {
        Self::with_target(DEFAULT_PROBE_HOST, DEFAULT_PROBE_PORT)
    }

    /// Probe a custom host and port.
    pub fn with_target(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Set the connect timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivityProbe for TcpProbe {
    fn is_reachable(&self) -> bool {
        let addr = match (self.host.as_str(), self.port).to_socket_addrs() {
            Ok(mut addrs) => match addrs.next() {
                Some(addr) => addr,
                None => return false,
            },
            Err(e) => {
                debug!(host = %self.host, error = %e, "probe name resolution failed");
                return false;
            }
        };
        TcpStream::connect_timeout(&addr, self.timeout).is_ok()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Probe whose answer can be flipped mid-test.
    #[derive(Default)]
    pub struct MockProbe {
        reachable: AtomicBool,
        pub calls: AtomicUsize,
    }

    impl MockProbe {
        pub fn new(reachable: bool) -> Self {
            Self {
                reachable: AtomicBool::new(reachable),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn set_reachable(&self, reachable: bool) {
            self.reachable.store(reachable, Ordering::SeqCst);
        }
    }

    impl ConnectivityProbe for MockProbe {
        fn is_reachable(&self) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reachable.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn test_mock_probe_flips() {
        let probe = MockProbe::new(true);
        assert!(probe.is_reachable());

        probe.set_reachable(false);
        assert!(!probe.is_reachable());
        assert_eq!(probe.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_tcp_probe_unresolvable_host_is_unreachable() {
        let probe = TcpProbe::with_target("definitely-not-a-real-host.invalid", 443)
            .with_timeout(Duration::from_millis(100));
        assert!(!probe.is_reachable());
    }
}
