use std::time::Duration;

use tokio::time::{sleep, Instant};
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

use crate::config::TrackerConfig;
use crate::errors::{debug, trace};
use crate::scroll::{ScrollStatus, ScrollSurface, ScrollTracker, VirtualSurface};
use super::script::ReplayScript;

/// Plays `script` against a fresh tracker, calling `on_update` with the
/// offset from the start for every status change. Returns once the tracker
/// had time to go idle after the last step.
pub async fn replay<F>(
    script: &ReplayScript,
    config: &TrackerConfig,
    mut on_update: F,
) -> usize
where
    F: FnMut(Duration, ScrollStatus),
{
    let surface = VirtualSurface::new();
    let handle = ScrollTracker::start(&surface, config);
    let mut updates = WatchStream::from_changes(handle.subscribe());
    let cooldown = config.idle_window() + config.throttle_window() * 2;
    let started = Instant::now();
    let mut count = 0;

    debug!(
        steps = script.steps.len(),
        duration_ms = script.duration().as_millis() as u64,
        "Starting replay",
    );

    let feed = async {
        for (i, step) in script.steps.iter().enumerate() {
            sleep(step.delay()).await;

            let current = surface.position();
            let x = step.x.unwrap_or(current.x);
            let y = step.y.unwrap_or(current.y);

            trace!(step = i, x = x, y = y, "Replay step");
            surface.scroll_to(x, y);
        }
        sleep(cooldown).await;
    };
    tokio::pin!(feed);

    loop {
        tokio::select! {
            biased;
            Some(status) = updates.next() => {
                count += 1;
                on_update(started.elapsed(), status);
            }
            _ = &mut feed => break,
        }
    }

    handle.stop();
    debug!(updates = count, "Replay finished");

    count
}
