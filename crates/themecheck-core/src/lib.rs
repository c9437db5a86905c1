//! # themecheck-core
//!
//! Core types for themecheck, a headless-browser smoke test that verifies the
//! violet gradient theme of the maum-baedal web app on a mobile viewport.
//!
//! - [`config`]: run configuration and test-mode URL building
//! - [`types`]: check results and DOM probe data with classification rules
//! - [`report`]: pass/fail aggregation and the console report
//! - [`step`]: per-step error isolation

pub mod config;
mod error;
pub mod report;
pub mod step;
mod types;

pub use config::{test_mode_of, BrowserSettings, RunConfig};
pub use error::{Result, ThemeCheckError};
pub use report::{Report, ReportSummary};
pub use types::*;
