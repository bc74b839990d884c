//! Tunable timing knobs for the child frame link.

use std::time::Duration;

/// Poll intervals and delays used by the guard and the watchdog.
///
/// The overall availability timeout is not here: it lives on the link
/// itself and is set by the controlling driver per test run.
#[derive(Debug, Clone)]
pub struct LinkTimeouts {
    /// How often the watchdog re-checks frame existence while a command
    /// is in flight.
    pub existence_check_interval: Duration,

    /// How often the availability guard re-checks frame visibility.
    pub visibility_check_interval: Duration,

    /// Grace delay between detecting a disappeared frame and
    /// synthesizing a completion status, so a result message already in
    /// transit can still win the race.
    pub response_grace_delay: Duration,
}

impl Default for LinkTimeouts {
    fn default() -> Self {
        Self {
            existence_check_interval: Duration::from_secs(1),
            visibility_check_interval: Duration::from_millis(200),
            response_grace_delay: Duration::from_millis(500),
        }
    }
}
