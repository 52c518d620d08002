//! Per-tab interaction primitives
//!
//! The reading simulation (focus double-click, slow scroll to the bottom,
//! viewport resize, dwell) runs against the [`TabSurface`] trait rather than
//! a concrete CDP page, so the loop logic is testable without a browser and
//! without real delays.

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType, MouseButton,
};
use chromiumoxide::Page;
use serde::Deserialize;
use std::time::Duration;

use crate::core::clock::Clock;
use crate::core::config::TimingConfig;
use crate::core::error::{DwellError, Result};

/// Current view geometry of a tab
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewMetrics {
    pub inner_width: f64,
    pub inner_height: f64,
    pub scroll_y: f64,
    pub content_height: f64,
}

impl ViewMetrics {
    /// Whether the bottom edge of the viewport has reached the end of the page
    pub fn at_bottom(&self) -> bool {
        self.inner_height + self.scroll_y >= self.content_height
    }
}

/// One half of a synthetic mouse click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEdge {
    Down,
    Up,
}

/// The surface a tab exposes to the reading simulation
#[async_trait]
pub trait TabSurface: Send + Sync {
    /// Measure the current view geometry
    async fn metrics(&self) -> Result<ViewMetrics>;

    /// Scroll the page down by a number of pixels
    async fn scroll_by(&self, pixels: u32) -> Result<()>;

    /// Dispatch a single mouse press or release at viewport coordinates
    async fn mouse_edge(&self, edge: MouseEdge, x: f64, y: f64) -> Result<()>;

    /// Resize the tab's viewport
    async fn set_viewport(&self, width: u32, height: u32) -> Result<()>;
}

const METRICS_JS: &str = "({ innerWidth: window.innerWidth, innerHeight: window.innerHeight, \
     scrollY: window.scrollY, \
     contentHeight: document.documentElement.scrollHeight || document.body.scrollHeight })";

#[async_trait]
impl TabSurface for Page {
    async fn metrics(&self) -> Result<ViewMetrics> {
        self.evaluate(METRICS_JS)
            .await
            .map_err(|e| DwellError::browser(format!("Failed to measure page: {}", e)))?
            .into_value()
            .map_err(|e| DwellError::browser(format!("Failed to parse page metrics: {}", e)))
    }

    async fn scroll_by(&self, pixels: u32) -> Result<()> {
        self.evaluate(format!("window.scrollBy(0, {})", pixels))
            .await
            .map_err(|e| DwellError::browser(format!("Scroll failed: {}", e)))?;
        Ok(())
    }

    async fn mouse_edge(&self, edge: MouseEdge, x: f64, y: f64) -> Result<()> {
        let event_type = match edge {
            MouseEdge::Down => DispatchMouseEventType::MousePressed,
            MouseEdge::Up => DispatchMouseEventType::MouseReleased,
        };

        let params = DispatchMouseEventParams::builder()
            .r#type(event_type)
            .x(x)
            .y(y)
            .button(MouseButton::Left)
            .click_count(1)
            .build()
            .map_err(|e| DwellError::browser(format!("Failed to build mouse event: {}", e)))?;

        self.execute(params)
            .await
            .map_err(|e| DwellError::browser(format!("Mouse event failed: {}", e)))?;
        Ok(())
    }

    async fn set_viewport(&self, width: u32, height: u32) -> Result<()> {
        let params = SetDeviceMetricsOverrideParams::builder()
            .width(width as i64)
            .height(height as i64)
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(|e| DwellError::browser(format!("Failed to build viewport params: {}", e)))?;

        self.execute(params)
            .await
            .map_err(|e| DwellError::browser(format!("Viewport resize failed: {}", e)))?;
        Ok(())
    }
}

/// Poll until a selector matches on the page, or time out.
///
/// A timeout here is fatal to the run: it means the results page never
/// produced the markup we scrape.
pub async fn wait_for_selector(
    page: &Page,
    selector: &str,
    clock: &dyn Clock,
    timeout: Duration,
) -> Result<()> {
    const POLL_INTERVAL: Duration = Duration::from_millis(500);
    let attempts = (timeout.as_millis() / POLL_INTERVAL.as_millis()).max(1);

    for _ in 0..attempts {
        if page.find_element(selector).await.is_ok() {
            return Ok(());
        }
        clock.sleep(POLL_INTERVAL).await;
    }

    Err(DwellError::SelectorTimeout(selector.to_string()))
}

/// Poll until `document.readyState` reaches "complete", or time out.
pub async fn wait_for_ready(page: &Page, clock: &dyn Clock, timeout: Duration) -> Result<()> {
    const POLL_INTERVAL: Duration = Duration::from_millis(500);
    let attempts = (timeout.as_millis() / POLL_INTERVAL.as_millis()).max(1);

    for _ in 0..attempts {
        let state: String = page
            .evaluate("document.readyState")
            .await
            .map_err(|e| DwellError::browser(format!("Failed to read readyState: {}", e)))?
            .into_value()
            .unwrap_or_default();
        if state == "complete" {
            return Ok(());
        }
        clock.sleep(POLL_INTERVAL).await;
    }

    Err(DwellError::browser("Page never reached readyState 'complete'"))
}

/// Dispatch two mousedown/mouseup pairs at the center of the viewport.
///
/// Best-effort focus grab for click-to-focus pages; whether anything actually
/// receives focus is not checked.
pub async fn focus_center(
    tab: &dyn TabSurface,
    clock: &dyn Clock,
    pause: Duration,
) -> Result<()> {
    let metrics = tab.metrics().await?;
    let x = metrics.inner_width / 2.0;
    let y = metrics.inner_height / 2.0;

    let edges = [MouseEdge::Down, MouseEdge::Up, MouseEdge::Down, MouseEdge::Up];
    for (i, edge) in edges.iter().enumerate() {
        tab.mouse_edge(*edge, x, y).await?;
        if i + 1 < edges.len() {
            clock.sleep(pause).await;
        }
    }

    Ok(())
}

/// Scroll to the bottom of the page in fixed increments, pausing between
/// steps. Bounded by `max_scroll_steps` so a growing page cannot spin
/// forever. Returns the number of steps taken.
pub async fn scroll_to_bottom(
    tab: &dyn TabSurface,
    clock: &dyn Clock,
    timing: &TimingConfig,
) -> Result<u32> {
    let mut steps = 0;

    while steps < timing.max_scroll_steps {
        tab.scroll_by(timing.scroll_step_px).await?;
        steps += 1;

        clock.sleep(Duration::from_millis(timing.scroll_pause_ms)).await;

        if tab.metrics().await?.at_bottom() {
            break;
        }
    }

    Ok(steps)
}

/// The full per-tab reading simulation: focus, scroll to the bottom, resize
/// the viewport to the page's full content height, then dwell.
pub async fn simulate_reading(
    tab: &dyn TabSurface,
    clock: &dyn Clock,
    timing: &TimingConfig,
    viewport_width: u32,
) -> Result<()> {
    focus_center(tab, clock, Duration::from_millis(timing.focus_pause_ms)).await?;

    scroll_to_bottom(tab, clock, timing).await?;

    // Re-measure after scrolling: lazy-loaded content may have grown the page.
    let metrics = tab.metrics().await?;
    tab.set_viewport(viewport_width, metrics.content_height as u32).await?;

    clock.sleep(Duration::from_secs(timing.dwell_secs)).await;

    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// In-memory tab with configurable geometry
    pub struct FakeTab {
        pub inner_width: f64,
        pub inner_height: f64,
        pub content_height: Mutex<f64>,
        pub scroll_y: Mutex<f64>,
        /// Pixels the page grows per scroll step (simulates infinite feeds)
        pub grow_per_step: f64,
        pub fail_on_scroll: bool,
        pub edges: Mutex<Vec<MouseEdge>>,
        pub scroll_positions: Mutex<Vec<f64>>,
        pub viewport: Mutex<Option<(u32, u32)>>,
    }

    impl FakeTab {
        pub fn with_content_height(content_height: f64) -> Self {
            Self {
                inner_width: 1200.0,
                inner_height: 600.0,
                content_height: Mutex::new(content_height),
                scroll_y: Mutex::new(0.0),
                grow_per_step: 0.0,
                fail_on_scroll: false,
                edges: Mutex::new(Vec::new()),
                scroll_positions: Mutex::new(Vec::new()),
                viewport: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl TabSurface for FakeTab {
        async fn metrics(&self) -> Result<ViewMetrics> {
            Ok(ViewMetrics {
                inner_width: self.inner_width,
                inner_height: self.inner_height,
                scroll_y: *self.scroll_y.lock().unwrap(),
                content_height: *self.content_height.lock().unwrap(),
            })
        }

        async fn scroll_by(&self, pixels: u32) -> Result<()> {
            if self.fail_on_scroll {
                return Err(DwellError::browser("scroll rejected"));
            }
            let mut content = self.content_height.lock().unwrap();
            *content += self.grow_per_step;
            let max_y = (*content - self.inner_height).max(0.0);
            let mut y = self.scroll_y.lock().unwrap();
            *y = (*y + pixels as f64).min(max_y);
            self.scroll_positions.lock().unwrap().push(*y);
            Ok(())
        }

        async fn mouse_edge(&self, edge: MouseEdge, _x: f64, _y: f64) -> Result<()> {
            self.edges.lock().unwrap().push(edge);
            Ok(())
        }

        async fn set_viewport(&self, width: u32, height: u32) -> Result<()> {
            *self.viewport.lock().unwrap() = Some((width, height));
            Ok(())
        }
    }
}
