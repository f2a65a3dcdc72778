//! Pomodoro Server - a state-managed HTTP server running a Pomodoro timer
//! 
//! This library provides the work/break timer engine, the once-per-second
//! tick task that drives it, the bell played when an interval ends, and an
//! HTTP API that renders the timer and forwards user intents to it.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Mode, TimerEngine, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
