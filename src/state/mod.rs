//! State management module
//! 
//! This module contains the pomodoro timer state, the engine that mutates it,
//! and the shared application state handed to HTTP handlers and the ticker.

pub mod mode;
pub mod error;
pub mod timer_state;
pub mod engine;
pub mod app_state;

// Re-export main types
pub use mode::Mode;
pub use error::{StateError, ValidationError};
pub use timer_state::{CycleCounters, Durations, TimerState};
pub use engine::{NotificationSink, TickSource, TimerEngine};
pub use app_state::AppState;
