//! Core module - shared infrastructure for Dwell
//!
//! This module contains configuration, error handling, and the clock
//! abstraction used throughout the application.

pub mod clock;
pub mod config;
pub mod error;

pub use clock::{Clock, TokioClock};
pub use config::{Config, TimingConfig};
pub use error::{DwellError, Result};
