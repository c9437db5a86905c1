//! Run configuration for themecheck
//!
//! Every field has a default so running with no config file targets the local
//! development server with a mobile viewport in test mode.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

use crate::{Result, ThemeCheckError};

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "themecheck.toml";

/// Query parameter the application reads to enter test mode
pub const TEST_MODE_PARAM: &str = "test_mode";

/// Top-level run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Origin of the application under test
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Append `test_mode=true` to every visited page
    #[serde(default = "default_test_mode")]
    pub test_mode: bool,

    /// Directory screenshots are written to
    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: PathBuf,

    /// Browser emulation settings
    #[serde(default)]
    pub browser: BrowserSettings,
}

/// Browser launch and emulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserSettings {
    /// Run without a visible window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Viewport width in CSS pixels
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    /// Viewport height in CSS pixels
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    /// User agent presented to the application
    #[serde(default = "default_user_agent")]
    pub user_agent: Option<String>,

    /// Upper bound for a navigation, including the network idle wait
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Quiet period with no new network requests that counts as idle
    #[serde(default = "default_network_idle_ms")]
    pub network_idle_ms: u64,
}

// Default value providers
fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_test_mode() -> bool {
    true
}

fn default_screenshot_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_headless() -> bool {
    true
}

fn default_viewport_width() -> u32 {
    375
}

fn default_viewport_height() -> u32 {
    667
}

fn default_user_agent() -> Option<String> {
    Some(
        "Mozilla/5.0 (iPhone; CPU iPhone OS 14_0 like Mac OS X) AppleWebKit/605.1.15".to_string(),
    )
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_network_idle_ms() -> u64 {
    500
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            test_mode: default_test_mode(),
            screenshot_dir: default_screenshot_dir(),
            browser: BrowserSettings::default(),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
            network_idle_ms: default_network_idle_ms(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            ThemeCheckError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Load `themecheck.toml` from `dir` if present, defaults otherwise
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let config_path = dir.join(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ThemeCheckError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Build the URL for an application route, carrying the test mode flag
    pub fn page_url(&self, path: &str) -> Result<Url> {
        let base = Url::parse(&self.base_url)?;
        let mut url = base.join(path)?;
        if self.test_mode {
            url.query_pairs_mut().append_pair(TEST_MODE_PARAM, "true");
        }
        Ok(url)
    }

    /// Path of a screenshot file inside the screenshot directory
    pub fn screenshot_path(&self, file_name: &str) -> PathBuf {
        self.screenshot_dir.join(file_name)
    }
}

/// Read the test mode flag back from a visited URL
///
/// Unparseable URLs and a missing parameter both read as `false`.
pub fn test_mode_of(url: &str) -> bool {
    Url::parse(url)
        .map(|u| {
            u.query_pairs()
                .any(|(key, value)| key == TEST_MODE_PARAM && value == "true")
        })
        .unwrap_or(false)
}
