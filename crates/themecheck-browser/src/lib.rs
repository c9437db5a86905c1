//! Headless browser checks for the maum-baedal theme
//!
//! This crate drives Chrome through the DevTools Protocol (via
//! `headless_chrome`) to verify the violet gradient theme on a mobile
//! viewport.
//!
//! # Example
//!
//! ```no_run
//! use themecheck_browser::run_verification;
//! use themecheck_core::RunConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = run_verification(&RunConfig::default()).await?;
//!     let all_passed = report.print();
//!     println!("all passed: {}", all_passed);
//!     Ok(())
//! }
//! ```
//!
//! # Requirements
//!
//! - Chrome or Chromium installed
//! - The application running at the configured base URL with test mode support
//!
//! # Architecture
//!
//! - [`driver`]: the [`PageDriver`] seam checks are written against
//! - [`browser`]: Chrome lifecycle and the CDP-backed driver
//! - [`network`]: in-flight request tracking for network idle waits
//! - [`probes`]: in-page scripts returning typed DOM facts
//! - [`checks`]: the four theme checks
//! - [`checklist`]: sequential runner producing a [`Report`]
//! - [`screenshot`]: full-page PNG capture

pub mod browser;
pub mod checklist;
pub mod checks;
pub mod driver;
pub mod network;
pub mod probes;
pub mod screenshot;

pub use browser::BrowserSession;
pub use checklist::Checklist;
pub use checks::Check;
pub use driver::PageDriver;
pub use screenshot::capture_full_page;

use themecheck_core::{Report, Result, RunConfig};
use tracing::info;

/// Launch a browser, run the standard checklist and close the browser
///
/// A launch failure is returned as an error; failures inside checks are
/// recorded in the report instead.
pub async fn run_verification(config: &RunConfig) -> Result<Report> {
    let session = BrowserSession::launch_with_settings(config.browser.clone()).await?;

    let report = Checklist::standard().run(&session, config).await;

    // Closing Chrome
    drop(session);
    info!("Verification finished: {}/{} passed", report.passed(), report.total());
    Ok(report)
}
