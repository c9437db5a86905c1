//! Browser lifecycle management using Chrome DevTools Protocol

use crate::driver::PageDriver;
use crate::network::NetworkTracker;
use async_trait::async_trait;
use base64::Engine;
use headless_chrome::protocol::cdp::types::Event;
use headless_chrome::protocol::cdp::Network;
use headless_chrome::protocol::cdp::Page::{
    self, CaptureScreenshotFormatOption, GetLayoutMetrics,
};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use themecheck_core::{BrowserSettings, Result, ThemeCheckError};
use tracing::{debug, info};

/// Active browser session with one mobile-emulated tab
///
/// Chrome exits when the session is dropped.
pub struct BrowserSession {
    /// Underlying browser instance (kept alive for tab lifetime)
    #[allow(dead_code)]
    browser: Browser,
    /// The single page every check navigates
    tab: Arc<Tab>,
    network: NetworkTracker,
    settings: BrowserSettings,
}

impl BrowserSession {
    /// Launch a browser with custom settings
    pub async fn launch_with_settings(settings: BrowserSettings) -> Result<Self> {
        info!(
            "Launching browser (headless: {}, viewport: {}x{})",
            settings.headless, settings.viewport_width, settings.viewport_height
        );

        let mut launch_options = LaunchOptions::default_builder()
            .headless(settings.headless)
            .window_size(Some((settings.viewport_width, settings.viewport_height)))
            .build()
            .map_err(|e| ThemeCheckError::Browser(format!("Invalid launch options: {}", e)))?;

        let user_agent_arg: Option<String> = settings
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={}", ua));
        if let Some(ref ua_arg) = user_agent_arg {
            launch_options.args.push(OsStr::new(ua_arg));
        }

        let browser = Browser::new(launch_options)
            .map_err(|e| ThemeCheckError::Browser(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| ThemeCheckError::Browser(format!("Failed to create tab: {}", e)))?;
        tab.set_default_timeout(Duration::from_secs(settings.timeout_seconds));

        let network = NetworkTracker::new();
        track_network(&tab, network.clone())?;

        info!("Browser launched successfully");

        Ok(Self {
            browser,
            tab,
            network,
            settings,
        })
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.settings.timeout_seconds)
    }

    fn idle_window(&self) -> Duration {
        Duration::from_millis(self.settings.network_idle_ms)
    }
}

/// Feed the tab's request lifecycle events into `network`
fn track_network(tab: &Tab, network: NetworkTracker) -> Result<()> {
    tab.call_method(Network::Enable {
        max_total_buffer_size: None,
        max_resource_buffer_size: None,
        max_post_data_size: None,
        report_direct_socket_traffic: None,
        enable_durable_messages: None,
    })
    .map_err(|e| ThemeCheckError::Browser(format!("Failed to enable network events: {}", e)))?;

    tab.add_event_listener(Arc::new(move |event: &Event| match event {
        Event::NetworkRequestWillBeSent(ev) => network.request_started(&ev.params.request_id),
        Event::NetworkLoadingFinished(ev) => network.request_finished(&ev.params.request_id),
        Event::NetworkLoadingFailed(ev) => network.request_finished(&ev.params.request_id),
        _ => {}
    }))
    .map_err(|e| ThemeCheckError::Browser(format!("Failed to add network listener: {}", e)))?;

    Ok(())
}

/// Clip covering the whole scrollable area, rounded up to whole pixels
pub(crate) fn full_page_clip(content_width: f64, content_height: f64) -> Page::Viewport {
    Page::Viewport {
        x: 0.0,
        y: 0.0,
        width: content_width.ceil().max(1.0),
        height: content_height.ceil().max(1.0),
        scale: 1.0,
    }
}

#[async_trait]
impl PageDriver for BrowserSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);
        // One budget covers both the load and the idle wait
        let deadline = Instant::now() + self.timeout();
        self.network.touch();

        self.tab
            .navigate_to(url)
            .map_err(|e| ThemeCheckError::Navigation(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| ThemeCheckError::Navigation(format!("Navigation timeout for {}: {}", url, e)))?;

        self.network.wait_for_idle(self.idle_window(), deadline).await?;

        info!("Successfully navigated to {}", url);
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        debug!("Evaluating JavaScript: {}", script);

        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| ThemeCheckError::Evaluation(e.to_string()))?;

        Ok(result.value.unwrap_or(serde_json::Value::Null))
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.tab.get_url())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        debug!("Clicking {}", selector);

        let element = self
            .tab
            .find_element(selector)
            .map_err(|_e| ThemeCheckError::ElementNotFound {
                selector: selector.to_string(),
            })?;

        element
            .click()
            .map_err(|e| ThemeCheckError::Browser(format!("Failed to click {}: {}", selector, e)))?;

        Ok(())
    }

    async fn wait_for_network_idle(&self) -> Result<()> {
        let deadline = Instant::now() + self.timeout();
        self.network.wait_for_idle(self.idle_window(), deadline).await
    }

    async fn capture_png(&self) -> Result<Vec<u8>> {
        let metrics = self
            .tab
            .call_method(GetLayoutMetrics(None))
            .map_err(|e| ThemeCheckError::ScreenshotFailed(format!("Layout metrics failed: {}", e)))?;
        let content = metrics.css_content_size;
        debug!("Capturing {}x{} page", content.width, content.height);

        let data = self
            .tab
            .call_method(Page::CaptureScreenshot {
                format: Some(CaptureScreenshotFormatOption::Png),
                quality: None,
                clip: Some(full_page_clip(content.width, content.height)),
                from_surface: Some(true),
                capture_beyond_viewport: Some(true),
                optimize_for_speed: None,
            })
            .map_err(|e| ThemeCheckError::ScreenshotFailed(format!("CDP capture failed: {}", e)))?
            .data;

        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| ThemeCheckError::ScreenshotFailed(format!("Invalid screenshot data: {}", e)))
    }
}
