use std::time::Duration;

use tokio::time::Instant;

/// Leading and trailing edge throttle.
///
/// A signal arriving outside an active window runs immediately and opens a
/// window. Signals arriving inside the window collapse into a single trailing
/// run at the end of it, and that run opens the next window.
#[derive(Debug)]
pub struct Throttle {
    window: Duration,
    last_run: Option<Instant>,
    pending: bool,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_run: None,
            pending: false,
        }
    }

    /// Records a signal, returns true when it should run now.
    pub fn signal(&mut self, now: Instant) -> bool {
        if self.pending {
            return false;
        }

        match self.last_run {
            Some(last) if now < last + self.window => {
                self.pending = true;
                false
            }
            _ => {
                self.last_run = Some(now);
                true
            }
        }
    }

    /// When the pending trailing run is due.
    pub fn deadline(&self) -> Option<Instant> {
        match (self.pending, self.last_run) {
            (true, Some(last)) => Some(last + self.window),
            _ => None,
        }
    }

    /// Called once the deadline passed, returns true when a trailing run
    /// should happen now.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.last_run = Some(now);
        true
    }
}
