//! Once-per-second tick source driving the timer engine

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::state::{AppState, TickSource};

/// Real-time spacing between ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Engine-side handle of the tick task. Publishes whether ticks are wanted.
#[derive(Debug)]
pub struct TickHandle {
    tx: watch::Sender<bool>,
}

impl TickSource for TickHandle {
    fn begin(&mut self) {
        debug!("Tick source armed");
        self.tx.send_replace(true);
    }

    fn cancel(&mut self) {
        debug!("Tick source cancelled");
        self.tx.send_replace(false);
    }
}

/// Create a stopped tick handle and the receiver `tick_task` listens on
pub fn tick_channel() -> (TickHandle, watch::Receiver<bool>) {
    let (tx, rx) = watch::channel(false);
    (TickHandle { tx }, rx)
}

/// Background task that calls `AppState::tick` every `period` while armed.
///
/// A single task delivers every tick, so at most one is ever outstanding. Each
/// `begin()` restarts the cadence, which gives an auto-started break its full
/// first second. A tick racing a cancellation may still land; the engine
/// ignores ticks while paused.
pub async fn tick_task(state: Arc<AppState>, mut rx: watch::Receiver<bool>, period: Duration) {
    info!("Starting tick task with period {:?}", period);

    'outer: loop {
        // Wait until the engine asks for ticks
        if !*rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                break;
            }
            continue;
        }

        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match state.tick() {
                        Ok(timer) => debug!("Tick: {} {}s remaining", timer.mode, timer.remaining_seconds),
                        Err(e) => error!("Failed to tick timer: {}", e),
                    }
                }

                changed = rx.changed() => {
                    if changed.is_err() {
                        break 'outer;
                    }
                    if *rx.borrow_and_update() {
                        debug!("Tick source re-armed, restarting cadence");
                        interval.reset();
                    } else {
                        break;
                    }
                }
            }
        }
    }

    info!("Tick source dropped, stopping tick task");
}
