use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use crate::config::TrackerConfig;
use crate::errors::{debug, info, trace};
use super::event::ScrollPosition;
use super::status::ScrollStatus;
use super::surface::{ScrollSignalRx, ScrollSurface};
use super::throttle::Throttle;

/// Scroll state kept between signals.
///
/// The idle deadline stands in for the reset timer. Being an `Option`, a new
/// deadline always replaces the previous one.
pub struct ScrollTracker {
    last_position: Option<ScrollPosition>,
    idle_deadline: Option<Instant>,
    idle_window: Duration,
    status: watch::Sender<ScrollStatus>,
}

impl ScrollTracker {
    pub fn new(idle_window: Duration) -> Self {
        let (status, _) = watch::channel(ScrollStatus::IDLE);

        Self {
            last_position: None,
            idle_deadline: None,
            idle_window,
            status,
        }
    }

    /// Subscribes `surface` and spawns the tracking task on the current
    /// tokio runtime.
    pub fn start<S>(surface: &S, config: &TrackerConfig) -> ScrollTrackerHandle
    where
        S: ScrollSurface + ?Sized,
    {
        let tracker = ScrollTracker::new(config.idle_window());
        let throttle = Throttle::new(config.throttle_window());
        let signals = surface.subscribe();
        let status = tracker.subscribe();
        let cancel = CancellationToken::new();

        info!(
            throttle_ms = config.throttle_ms,
            idle_ms = config.idle_ms,
            "Started scroll tracker",
        );

        let task = tokio::spawn(run_tracker(
            tracker,
            throttle,
            signals,
            cancel.clone(),
        ));

        ScrollTrackerHandle { status, cancel, task }
    }

    pub fn status(&self) -> ScrollStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScrollStatus> {
        self.status.subscribe()
    }

    pub fn last_position(&self) -> Option<ScrollPosition> {
        self.last_position
    }

    pub fn idle_deadline(&self) -> Option<Instant> {
        self.idle_deadline
    }

    pub fn on_scroll_signal(&mut self, position: ScrollPosition, now: Instant) {
        let Some(last) = self.last_position.replace(position) else {
            trace!(x = position.x, y = position.y, "Scroll baseline recorded");
            return;
        };

        let next = ScrollStatus::between(last, position);
        trace!(
            from = %last,
            to = %position,
            status = %next,
            "Scroll signal",
        );
        self.publish(next);

        if next.is_scrolling {
            self.idle_deadline = Some(now + self.idle_window);
        } else {
            // Idle right away, a pending deadline is left to expire on its own
            self.publish(ScrollStatus::IDLE);
        }
    }

    pub fn on_idle_timeout(&mut self) {
        self.idle_deadline = None;
        debug!("Scroll idle, resetting status");
        self.publish(ScrollStatus::IDLE);
    }

    fn publish(&self, status: ScrollStatus) {
        self.status.send_if_modified(|current| {
            if *current == status {
                return false;
            }
            *current = status;
            true
        });
    }
}

/// Running tracker. Stops the tracker when dropped.
pub struct ScrollTrackerHandle {
    status: watch::Receiver<ScrollStatus>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ScrollTrackerHandle {
    /// Latest published status. Still readable after `stop`.
    pub fn status(&self) -> ScrollStatus {
        *self.status.borrow()
    }

    /// Receiver notified on every status change from now on.
    pub fn subscribe(&self) -> watch::Receiver<ScrollStatus> {
        let mut status = self.status.clone();
        status.mark_unchanged();
        status
    }

    /// Halts signal and timer handling at once. The surface subscription
    /// and any pending deadline live in the aborted task and are released
    /// when the runtime drops it, on its next tick.
    pub fn stop(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.cancel.cancel();
        self.task.abort();
        info!("Stopped scroll tracker");
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for ScrollTrackerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn sleep_until_deadline(deadline: Option<Instant>) -> tokio::time::Sleep {
    sleep_until(deadline.unwrap_or_else(Instant::now))
}

async fn run_tracker(
    mut tracker: ScrollTracker,
    mut throttle: Throttle,
    mut signals: ScrollSignalRx,
    cancel: CancellationToken,
) {
    let mut source_open = true;
    let mut latest: Option<ScrollPosition> = None;

    loop {
        let trailing = throttle.deadline();
        let idle = tracker.idle_deadline();

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = sleep_until_deadline(trailing), if trailing.is_some() => {
                let now = Instant::now();
                if throttle.fire(now) {
                    if let Some(position) = latest {
                        tracker.on_scroll_signal(position, now);
                    }
                }
            }
            _ = sleep_until_deadline(idle), if idle.is_some() => {
                tracker.on_idle_timeout();
            }
            result = signals.recv(), if source_open => {
                let signal = match result {
                    Ok(signal) => signal,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        trace!(skipped = skipped, "Scroll signals dropped, continuing with retained");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Scroll surface closed, no further signals");
                        source_open = false;
                        continue;
                    }
                };

                latest = Some(signal.position);
                let now = Instant::now();
                if throttle.signal(now) {
                    tracker.on_scroll_signal(signal.position, now);
                }
            }
        }
    }

    trace!("Scroll tracker exited");
}
