//! Final pass/fail report

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use crate::{CheckResult, Result};

const RULE_WIDTH: usize = 60;

pub const ALL_PASSED_MESSAGE: &str = "🎉 All UI improvements were applied successfully!";
pub const NOT_ALL_PASSED_MESSAGE: &str = "⚠️  Some improvements were not fully applied.";

/// Aggregated results of a checklist run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    results: Vec<CheckResult>,
}

/// JSON form of a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub results: Vec<CheckResult>,
    pub passed: usize,
    pub total: usize,
    pub success_rate: f64,
    pub all_passed: bool,
}

impl Report {
    pub fn new(results: Vec<CheckResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Percentage of passed checks, 0.0 for an empty run
    pub fn success_rate(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.passed() as f64 / self.total() as f64 * 100.0
    }

    /// True iff there is at least one result and every result passed
    pub fn all_passed(&self) -> bool {
        !self.results.is_empty() && self.passed() == self.total()
    }

    /// Render the console report
    pub fn render(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();

        let _ = writeln!(out, "\n{}", rule);
        let _ = writeln!(out, "🎯 Final UI verification report");
        let _ = writeln!(out, "{}", rule);

        for result in &self.results {
            let status = if result.passed { "✅ PASS" } else { "❌ FAIL" };
            let _ = writeln!(out, "{} {}", status, result.name);
        }

        let _ = writeln!(
            out,
            "\n📊 Summary: {}/{} checks passed",
            self.passed(),
            self.total()
        );
        let _ = writeln!(out, "Success rate: {:.1}%", self.success_rate());

        let closing = if self.all_passed() {
            ALL_PASSED_MESSAGE
        } else {
            NOT_ALL_PASSED_MESSAGE
        };
        let _ = writeln!(out, "\n{}", closing);

        out
    }

    /// Print the report to stdout and return overall success
    pub fn print(&self) -> bool {
        print!("{}", self.render());
        self.all_passed()
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            results: self.results.clone(),
            passed: self.passed(),
            total: self.total(),
            success_rate: self.success_rate(),
            all_passed: self.all_passed(),
        }
    }

    /// Write the JSON summary to `path`
    pub async fn write_json(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.summary())?;
        tokio::fs::write(path, content).await?;
        info!("Report written to {}", path.display());
        Ok(())
    }
}
