//! Page driver abstraction
//!
//! Checks talk to the page through [`PageDriver`] so the checklist can run
//! against a real Chrome tab or a scripted page in tests.

use async_trait::async_trait;
use themecheck_core::{Result, ThemeCheckError};

/// A single browser page that can be navigated and inspected
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to `url` and wait until the network is idle
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Evaluate a JavaScript expression and return its value
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value>;

    /// URL of the currently loaded document
    async fn current_url(&self) -> Result<String>;

    /// Click the first element matching `selector`
    async fn click(&self, selector: &str) -> Result<()>;

    /// Wait until no new network requests start for the idle window
    async fn wait_for_network_idle(&self) -> Result<()>;

    /// Capture the full page as PNG bytes
    async fn capture_png(&self) -> Result<Vec<u8>>;

    /// Number of elements matching `selector`
    async fn count(&self, selector: &str) -> Result<usize> {
        let value = self.evaluate(&count_script(selector)?).await?;
        value
            .as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| {
                ThemeCheckError::Evaluation(format!(
                    "Expected a count for '{}', got {}",
                    selector, value
                ))
            })
    }
}

/// Expression counting the elements that match `selector`
pub fn count_script(selector: &str) -> Result<String> {
    let quoted = serde_json::to_string(selector)?;
    Ok(format!("document.querySelectorAll({}).length", quoted))
}
