//! End-to-end search-and-browse run
//!
//! Sequence: probe the screen resolution with a headless browser, launch a
//! visible browser sized to it, search, open every result link in its own
//! tab concurrently, simulate reading in each, then tear everything down
//! after the configured timers.
//!
//! Failure policy is two-tier: anything up to and including link extraction
//! is fatal and propagates to the caller; per-link failures are logged with
//! the offending link and never touch sibling tabs or the teardown schedule.

use std::sync::Arc;
use std::time::Duration;

use chromiumoxide::Page;
use futures::future::join_all;

use crate::browser::interact::{simulate_reading, wait_for_ready, wait_for_selector};
use crate::browser::session::{detect_resolution, BrowserSession, Resolution};
use crate::core::clock::{Clock, TokioClock};
use crate::core::config::Config;
use crate::core::error::{DwellError, Result};
use crate::search::results::{extract_result_links, search_url};

/// Drives one full search-and-browse run
pub struct Orchestrator {
    config: Config,
    clock: Arc<dyn Clock>,
}

impl Orchestrator {
    /// Create an orchestrator using the real tokio clock
    pub fn new(config: Config) -> Self {
        Self {
            config,
            clock: Arc::new(TokioClock),
        }
    }

    /// Create an orchestrator with an injected clock
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    /// Run the whole sequence. Returns once teardown has completed.
    pub async fn run(&self, query: Option<String>) -> Result<()> {
        let resolution = detect_resolution().await?;
        println!("Screen resolution: {}x{}", resolution.width, resolution.height);

        let session = BrowserSession::launch_headed(resolution).await?;

        let links = self.collect_result_links(&session, query).await?;
        println!("Found {} links", links.len());

        // One task per link, all at once. Each task registers its tab before
        // navigating, so even a tab whose processing fails gets closed later.
        let tabs: Vec<Page> = join_all(
            links
                .iter()
                .map(|link| self.browse_link(&session, resolution, link)),
        )
        .await
        .into_iter()
        .flatten()
        .collect();

        self.clock
            .sleep(Duration::from_secs(self.config.timing.teardown_secs))
            .await;

        println!("Closing all tabs and browser...");
        for tab in tabs {
            if let Err(e) = tab.close().await {
                eprintln!("Failed to close tab: {}", e);
            }
        }
        session.shutdown().await;

        Ok(())
    }

    /// Navigate to the results page and pull out the links to open.
    ///
    /// Fatal on any failure: if the results selector never shows up, the run
    /// dies here, before any result tab is opened.
    async fn collect_result_links(
        &self,
        session: &BrowserSession,
        query: Option<String>,
    ) -> Result<Vec<String>> {
        let term = query.unwrap_or_else(|| self.config.search.default_term.clone());
        let url = search_url(&self.config.search.engine_url, &term)?;

        if self.config.browser.debug {
            eprintln!("DEBUG: search URL: {}", url);
        }

        let page = session.new_tab().await?;
        page.goto(url.as_str())
            .await
            .map_err(|e| DwellError::search(format!("Search navigation failed: {}", e)))?;

        wait_for_selector(
            &page,
            &self.config.search.result_selector,
            self.clock.as_ref(),
            Duration::from_secs(self.config.browser.selector_timeout_secs),
        )
        .await?;

        extract_result_links(
            &page,
            &self.config.search.result_selector,
            self.config.search.max_results,
        )
        .await
    }

    /// Open one result link in its own tab and run the reading simulation.
    ///
    /// Errors are logged with the link and swallowed; the tab handle is still
    /// returned for teardown whenever the tab itself was created.
    async fn browse_link(
        &self,
        session: &BrowserSession,
        resolution: Resolution,
        link: &str,
    ) -> Option<Page> {
        let tab = match session.new_tab().await {
            Ok(tab) => tab,
            Err(e) => {
                eprintln!("Failed to open {}: {}", link, e);
                return None;
            }
        };

        println!("Opening: {}", link);
        if let Err(e) = self.visit(&tab, resolution, link).await {
            eprintln!("Failed to process {}: {}", link, e);
        }

        Some(tab)
    }

    /// The strictly-ordered per-tab sequence: navigate, settle, focus,
    /// scroll, resize, dwell.
    async fn visit(&self, tab: &Page, resolution: Resolution, link: &str) -> Result<()> {
        tab.goto(link)
            .await
            .map_err(|e| DwellError::browser(format!("Navigation failed: {}", e)))?;

        // Heuristic "page probably finished loading" signal; application
        // readiness is checked against readyState below.
        tab.wait_for_navigation()
            .await
            .map_err(|e| DwellError::browser(format!("Navigation never settled: {}", e)))?;

        wait_for_ready(
            tab,
            self.clock.as_ref(),
            Duration::from_secs(self.config.browser.nav_timeout_secs),
        )
        .await?;

        simulate_reading(
            tab,
            self.clock.as_ref(),
            &self.config.timing,
            resolution.width,
        )
        .await
    }
}
