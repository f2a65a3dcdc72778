//! Main application state management

use std::{
    sync::{Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::{error, info};

use super::{Durations, Mode, NotificationSink, StateError, TickSource, TimerEngine, TimerState};

/// Main application state shared by the HTTP handlers and the tick task
pub struct AppState {
    /// The timer engine; every operation is applied under this lock
    engine: Mutex<TimerEngine>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    /// Create a new AppState with a fresh, paused work timer
    pub fn new(
        port: u16,
        host: String,
        durations: Durations,
        ticks: Box<dyn TickSource>,
        notifier: Box<dyn NotificationSink>,
    ) -> Self {
        Self {
            engine: Mutex::new(TimerEngine::new(durations, ticks, notifier)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, TimerEngine>, StateError> {
        self.engine.lock().map_err(|e| {
            error!("Failed to lock timer engine: {}", e);
            StateError::Lock(e.to_string())
        })
    }

    /// Apply a user action to the engine and record it
    fn apply<F>(&self, action: &str, op: F) -> Result<TimerState, StateError>
    where
        F: FnOnce(&mut TimerEngine) -> Result<TimerState, StateError>,
    {
        let new_state = op(&mut *self.lock_engine()?)?;

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some((action.to_string(), Utc::now()));
        }

        Ok(new_state)
    }

    pub fn start(&self) -> Result<TimerState, StateError> {
        info!("Starting timer");
        self.apply("start", |engine| Ok(engine.start()))
    }

    pub fn pause(&self) -> Result<TimerState, StateError> {
        info!("Pausing timer");
        self.apply("pause", |engine| Ok(engine.pause()))
    }

    /// Start/pause button: pause when running, start otherwise
    pub fn toggle(&self) -> Result<TimerState, StateError> {
        self.apply("toggle", |engine| {
            let state = if engine.snapshot().running {
                info!("Toggling timer off");
                engine.pause()
            } else {
                info!("Toggling timer on");
                engine.start()
            };
            Ok(state)
        })
    }

    pub fn reset(&self) -> Result<TimerState, StateError> {
        info!("Resetting timer");
        self.apply("reset", |engine| Ok(engine.reset()))
    }

    pub fn set_mode(&self, mode: Mode) -> Result<TimerState, StateError> {
        info!("Switching to {} mode", mode);
        self.apply("mode", |engine| Ok(engine.set_mode(mode)))
    }

    pub fn set_duration(&self, mode: Mode, minutes: i64) -> Result<TimerState, StateError> {
        info!("Setting {} duration to {} minutes", mode, minutes);
        self.apply("duration", |engine| Ok(engine.set_duration(mode, minutes)?))
    }

    /// Driven by the tick task; not recorded as a user action
    pub fn tick(&self) -> Result<TimerState, StateError> {
        Ok(self.lock_engine()?.tick())
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, StateError> {
        Ok(self.lock_engine()?.snapshot())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|a| a.clone()) {
            Some((action, time)) => (Some(action), Some(time)),
            None => (None, None),
        }
    }
}
