//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimerState;

/// Values a renderer shows for a timer snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Mode label, "Work" or "Break"
    pub label: String,
    /// Remaining time as mm:ss, blank when nothing remains
    pub time: String,
    /// Circular progress in percent; always 0 while paused
    pub progress: f64,
    /// Current mode's cycle counter, e.g. "#2"
    pub cycle: String,
}

impl DisplayState {
    pub fn from_timer(timer: &TimerState) -> Self {
        Self {
            label: timer.mode.label().to_string(),
            time: format_time(timer.remaining_seconds),
            progress: progress(timer),
            cycle: format!("#{}", timer.active_cycle()),
        }
    }
}

/// Zero-padded mm:ss, or an empty string for zero
pub fn format_time(seconds: u32) -> String {
    if seconds == 0 {
        return String::new();
    }
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Elapsed share of the active interval in percent, 0 when paused
pub fn progress(timer: &TimerState) -> f64 {
    if !timer.running {
        return 0.0;
    }
    let duration = timer.active_duration();
    if duration == 0 {
        return 0.0;
    }
    100.0 - (timer.remaining_seconds as f64 / duration as f64 * 100.0)
}

/// API response structure for timer action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
    pub display: DisplayState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            display: DisplayState::from_timer(&timer),
            timer,
        }
    }

    /// Create a response for an accepted action
    pub fn ok(message: String, timer: TimerState) -> Self {
        Self::new("ok".to_string(), message, timer)
    }

    /// Create an error response carrying the unchanged timer
    pub fn error(message: String, timer: TimerState) -> Self {
        Self::new("error".to_string(), message, timer)
    }
}

/// Body of PUT /duration/:mode. Signed and wide so that any integer reaches
/// range validation instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationRequest {
    pub minutes: i64,
}

/// Status response with display values and server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub display: DisplayState,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
