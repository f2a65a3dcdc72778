//! External service module
//! 
//! This module contains the audible cue played when an interval completes.

pub mod sound;

// Re-export main items
pub use sound::*;
