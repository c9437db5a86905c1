//! Step isolation for checklist runs
//!
//! A failing step never aborts the run: its error is logged, printed, and the
//! step is recorded as failed. Nothing is retried.

use std::future::Future;
use tracing::{info, warn};

use crate::{CheckResult, Result};

/// Run one check step, downgrading any error to a failed result
///
/// # Usage
///
/// ```no_run
/// use themecheck_core::step::run_step;
/// use themecheck_core::Result;
///
/// async fn probe() -> Result<bool> {
///     Ok(true)
/// }
///
/// async fn example() {
///     let result = run_step("History page gradient", || probe()).await;
///     assert!(result.passed);
/// }
/// ```
pub async fn run_step<F, Fut>(name: &str, f: F) -> CheckResult
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    match f().await {
        Ok(passed) => {
            info!("{}: {}", name, if passed { "passed" } else { "failed" });
            CheckResult::new(name, passed)
        }
        Err(e) => {
            warn!("{} failed: {}", name, e);
            println!("   ❌ {} failed: {}", name, e);
            CheckResult::new(name, false)
        }
    }
}
