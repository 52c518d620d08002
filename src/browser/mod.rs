//! Browser automation module
//!
//! Drives Chromium over the Chrome DevTools Protocol via chromiumoxide.

pub mod interact;
pub mod session;

pub use interact::{simulate_reading, wait_for_ready, wait_for_selector, TabSurface};
pub use session::{detect_resolution, BrowserSession, Resolution};
