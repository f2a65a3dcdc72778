//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::{timer_state, Durations, ValidationError};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-server")]
#[command(about = "A state-managed HTTP server running a Pomodoro work/break timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Work interval in minutes (1-60)
    #[arg(short, long, default_value_t = timer_state::DEFAULT_WORK_MINUTES)]
    pub work: u32,

    /// Break interval in minutes (1-60)
    #[arg(short, long = "break", default_value_t = timer_state::DEFAULT_BREAK_MINUTES)]
    pub break_minutes: u32,

    /// Do not play the bell when an interval ends
    #[arg(long)]
    pub mute: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Initial interval lengths, checked against the same 1-60 minute rule
    /// used for runtime changes
    pub fn durations(&self) -> Result<Durations, ValidationError> {
        Durations::from_minutes(self.work, self.break_minutes)
    }
}
