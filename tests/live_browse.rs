//! Live browser integration tests
//!
//! These need a local Chromium/Chrome install and network access, so they
//! are ignored by default. Run with: cargo test -- --ignored

use dwell::browser::{detect_resolution, BrowserSession};
use dwell::core::Config;
use dwell::Orchestrator;
use std::time::Duration;
use tokio::time::timeout;

/// Config with timers short enough for a test run
fn fast_config() -> Config {
    let mut config = Config::default();
    config.search.max_results = 2;
    config.browser.selector_timeout_secs = 20;
    config.browser.nav_timeout_secs = 20;
    config.timing.dwell_secs = 1;
    config.timing.teardown_secs = 1;
    config.timing.scroll_pause_ms = 50;
    config.timing.max_scroll_steps = 30;
    config
}

#[tokio::test]
#[ignore] // Requires Chromium to be installed
async fn test_detect_resolution() {
    let resolution = detect_resolution().await.expect("resolution probe failed");
    assert!(resolution.width > 0);
    assert!(resolution.height > 0);
}

#[tokio::test]
#[ignore]
async fn test_session_opens_and_closes_tabs() {
    let resolution = detect_resolution().await.expect("resolution probe failed");
    let session = BrowserSession::launch_headed(resolution)
        .await
        .expect("headed launch failed");

    let tab = session.new_tab().await.expect("tab open failed");
    tab.goto("https://example.com").await.expect("goto failed");

    tab.close().await.expect("tab close failed");
    session.shutdown().await;
}

#[tokio::test]
#[ignore] // Requires network access; the Google results markup may also drift
async fn test_full_run_with_short_timers() {
    let orchestrator = Orchestrator::new(fast_config());

    let result = timeout(
        Duration::from_secs(300),
        orchestrator.run(Some("rust programming language".to_string())),
    )
    .await;

    assert!(result.is_ok(), "Run timed out");
    assert!(result.unwrap().is_ok(), "Run failed");
}
