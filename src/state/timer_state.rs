//! Timer state structures

use serde::{Deserialize, Serialize};

use super::{Mode, ValidationError};

/// Shortest allowed interval, in minutes
pub const MIN_MINUTES: u32 = 1;
/// Longest allowed interval, in minutes
pub const MAX_MINUTES: u32 = 60;

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// Check a minute value against the allowed interval range. Takes any
/// integer so negative or oversized input is reported, not truncated.
pub fn validate_minutes(minutes: i64) -> Result<u32, ValidationError> {
    match u32::try_from(minutes) {
        Ok(valid) if (MIN_MINUTES..=MAX_MINUTES).contains(&valid) => Ok(valid),
        _ => Err(ValidationError::MinutesOutOfRange {
            minutes,
            min: MIN_MINUTES,
            max: MAX_MINUTES,
        }),
    }
}

/// Configured length of each phase, stored in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub work_seconds: u32,
    pub break_seconds: u32,
}

impl Durations {
    /// Build durations from minute values, rejecting anything outside 1..=60
    pub fn from_minutes(work_minutes: u32, break_minutes: u32) -> Result<Self, ValidationError> {
        Ok(Self {
            work_seconds: validate_minutes(work_minutes.into())? * 60,
            break_seconds: validate_minutes(break_minutes.into())? * 60,
        })
    }

    /// Full length of the given phase
    pub fn seconds(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work_seconds,
            Mode::Break => self.break_seconds,
        }
    }

    /// Replace one phase's length; leaves `self` untouched on error
    pub fn set_minutes(&mut self, mode: Mode, minutes: i64) -> Result<u32, ValidationError> {
        let seconds = validate_minutes(minutes)? * 60;
        match mode {
            Mode::Work => self.work_seconds = seconds,
            Mode::Break => self.break_seconds = seconds,
        }
        Ok(seconds)
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work_seconds: DEFAULT_WORK_MINUTES * 60,
            break_seconds: DEFAULT_BREAK_MINUTES * 60,
        }
    }
}

/// 1-based ordinal of the current (or next) session of each phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleCounters {
    pub work_count: u32,
    pub break_count: u32,
}

impl CycleCounters {
    pub fn new() -> Self {
        Self {
            work_count: 1,
            break_count: 1,
        }
    }

    pub fn get(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work_count,
            Mode::Break => self.break_count,
        }
    }

    /// Advance the counter belonging to a phase that just completed
    pub fn increment(&mut self, mode: Mode) {
        match mode {
            Mode::Work => self.work_count += 1,
            Mode::Break => self.break_count += 1,
        }
    }
}

impl Default for CycleCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable snapshot of the whole timer, handed to renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub mode: Mode,
    pub durations: Durations,
    pub remaining_seconds: u32,
    pub running: bool,
    pub cycles: CycleCounters,
}

impl TimerState {
    /// Initial state: work phase, paused, full work duration remaining
    pub fn new(durations: Durations) -> Self {
        Self {
            mode: Mode::Work,
            durations,
            remaining_seconds: durations.work_seconds,
            running: false,
            cycles: CycleCounters::new(),
        }
    }

    /// Full length of the active phase
    pub fn active_duration(&self) -> u32 {
        self.durations.seconds(self.mode)
    }

    /// Cycle counter of the active phase
    pub fn active_cycle(&self) -> u32 {
        self.cycles.get(self.mode)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(Durations::default())
    }
}
