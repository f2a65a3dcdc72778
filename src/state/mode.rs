//! Pomodoro phase selection

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The two phases of a pomodoro cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Work,
    Break,
}

impl Mode {
    /// Human-readable label shown next to the countdown
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Work => "Work",
            Mode::Break => "Break",
        }
    }

    /// The phase that follows this one once its interval completes
    pub fn next(&self) -> Self {
        match self {
            Mode::Work => Mode::Break,
            Mode::Break => Mode::Work,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "work" => Ok(Mode::Work),
            "break" => Ok(Mode::Break),
            other => Err(format!("Unknown mode: {}", other)),
        }
    }
}
