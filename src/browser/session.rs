//! Browser lifecycle management
//!
//! Launches Chromium over the Chrome DevTools Protocol: a throwaway headless
//! instance to read the available screen resolution, and the headed session
//! that the search and result tabs live in.

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use serde::Deserialize;
use tokio::task::JoinHandle;

use crate::core::error::{DwellError, Result};

/// Available screen resolution, as reported by the browser
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// Launch a browser and spawn the task that drives its CDP connection.
///
/// The handler stream must be polled for the browser to function at all.
async fn launch(config: BrowserConfig) -> Result<(Browser, JoinHandle<()>)> {
    let (browser, mut handler) = Browser::launch(config)
        .await
        .map_err(|e| DwellError::browser(format!("Failed to launch browser: {}", e)))?;

    let handler_handle = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    Ok((browser, handler_handle))
}

/// Read the screen's available resolution using a throwaway headless browser.
///
/// Any failure here is fatal: without a resolution there is nothing to size
/// the visible window to.
pub async fn detect_resolution() -> Result<Resolution> {
    let config = BrowserConfig::builder()
        .window_size(1920, 1080)
        .viewport(None)
        .build()
        .map_err(|e| DwellError::browser(format!("Failed to build browser config: {}", e)))?;

    let (mut browser, handler_handle) = launch(config).await?;

    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| DwellError::browser(format!("Failed to open probe page: {}", e)))?;

    let resolution: Resolution = page
        .evaluate("({ width: screen.availWidth, height: screen.availHeight })")
        .await
        .map_err(|e| DwellError::browser(format!("Failed to read resolution: {}", e)))?
        .into_value()
        .map_err(|e| DwellError::browser(format!("Failed to parse resolution: {}", e)))?;

    browser
        .close()
        .await
        .map_err(|e| DwellError::browser(format!("Failed to close probe browser: {}", e)))?;
    let _ = browser.wait().await;
    let _ = handler_handle.await;

    Ok(resolution)
}

/// The headed browser session that owns every tab opened during a run
pub struct BrowserSession {
    browser: Browser,
    handler_handle: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch a visible browser with its window sized to the screen
    pub async fn launch_headed(resolution: Resolution) -> Result<Self> {
        let config = BrowserConfig::builder()
            .with_head()
            .window_size(resolution.width, resolution.height)
            .viewport(None)
            .build()
            .map_err(|e| DwellError::browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, handler_handle) = launch(config).await?;

        Ok(Self {
            browser,
            handler_handle,
        })
    }

    /// Open a new blank tab
    pub async fn new_tab(&self) -> Result<Page> {
        self.browser
            .new_page("about:blank")
            .await
            .map_err(|e| DwellError::browser(format!("Failed to open tab: {}", e)))
    }

    /// Close the browser, logging rather than escalating on failure
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            eprintln!("Failed to close browser: {}", e);
        }
        let _ = self.browser.wait().await;
        let _ = self.handler_handle.await;
    }
}
