//! Countdown tick source
//!
//! Time is a monotonic `Duration` supplied by the host (time since the session
//! was created). The ticker fires at a fixed cadence while running and is
//! stopped outright when paused, so resuming never replays missed ticks.

use std::time::Duration;

/// Default countdown cadence
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Fixed-cadence tick source
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Duration>,
}

impl Ticker {
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Start ticking; the first tick is one period after `now`
    ///
    /// Restarting a running ticker resets its phase.
    pub fn start(&mut self, now: Duration) {
        self.next_due = Some(now + self.period);
    }

    /// Stop ticking entirely
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// When the next tick falls due, if running
    #[must_use]
    pub const fn next_due(&self) -> Option<Duration> {
        self.next_due
    }

    /// Consume one tick if it is due at `now`
    pub fn take_due(&mut self, now: Duration) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                self.next_due = Some(due + self.period);
                true
            }
            _ => false,
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}
