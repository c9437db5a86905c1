//! In-flight request tracking for network idle detection
//!
//! The tab's CDP `Network` events feed a [`NetworkTracker`]; the page counts
//! as idle once no request is in flight and nothing started or finished for
//! the idle window.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use themecheck_core::{Result, ThemeCheckError};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug)]
struct TrackerState {
    in_flight: HashSet<String>,
    last_activity: Instant,
}

/// Shared set of requests that have started but not finished or failed
#[derive(Debug, Clone)]
pub struct NetworkTracker {
    state: Arc<Mutex<TrackerState>>,
}

impl NetworkTracker {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(TrackerState {
                in_flight: HashSet::new(),
                last_activity: Instant::now(),
            })),
        }
    }

    /// `Network.requestWillBeSent`; redirects reuse the same id
    pub fn request_started(&self, request_id: &str) {
        let mut state = self.lock();
        state.in_flight.insert(request_id.to_string());
        state.last_activity = Instant::now();
    }

    /// `Network.loadingFinished` or `Network.loadingFailed`
    pub fn request_finished(&self, request_id: &str) {
        let mut state = self.lock();
        state.in_flight.remove(request_id);
        state.last_activity = Instant::now();
    }

    /// Restart the idle window without changing the in-flight set
    pub fn touch(&self) {
        self.lock().last_activity = Instant::now();
    }

    pub fn in_flight(&self) -> usize {
        self.lock().in_flight.len()
    }

    fn quiet_for(&self) -> Option<Duration> {
        let state = self.lock();
        state
            .in_flight
            .is_empty()
            .then(|| state.last_activity.elapsed())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TrackerState> {
        // A poisoned lock only means a listener panicked mid-update
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Wait until the network has been quiet for `idle`, failing at `deadline`
    pub async fn wait_for_idle(&self, idle: Duration, deadline: Instant) -> Result<()> {
        loop {
            if let Some(quiet) = self.quiet_for() {
                if quiet >= idle {
                    debug!("Network idle for {:?}", quiet);
                    return Ok(());
                }
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(ThemeCheckError::Navigation(format!(
                    "Network not idle before timeout ({} requests in flight)",
                    self.in_flight()
                )));
            }

            tokio::time::sleep(POLL_INTERVAL.min(deadline - now)).await;
        }
    }
}

impl Default for NetworkTracker {
    fn default() -> Self {
        Self::new()
    }
}
