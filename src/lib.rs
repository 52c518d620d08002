//! Dwell - Search-and-Browse Orchestrator
//!
//! Drives a visible Chromium browser to run a Google search, open the top
//! results in concurrent tabs, and simulate a human reading each one
//! (double-click focus, slow scroll to the bottom, long dwell) before
//! closing everything on a timer.
//!
//! # Architecture
//!
//! - **Core**: Configuration, error handling, and the injected clock
//! - **Browser**: CDP session lifecycle and per-tab interaction primitives
//! - **Search**: Query URL building and result-link extraction
//! - **Orchestrator**: The end-to-end run (fan-out over tabs, timers, teardown)
//!
//! # Usage
//!
//! ```rust,no_run
//! use dwell::{Config, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let orchestrator = Orchestrator::new(Config::load());
//!     orchestrator.run(Some("weather".to_string())).await.unwrap();
//! }
//! ```

pub mod browser;
pub mod core;
pub mod orchestrator;
pub mod search;

// Re-export commonly used items
pub use crate::core::{Config, DwellError, Result};
pub use orchestrator::Orchestrator;
