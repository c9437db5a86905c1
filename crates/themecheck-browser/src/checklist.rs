//! Ordered checklist runner

use crate::checks::{
    Check, DesignConsistencyCheck, HistoryGradientCheck, SettingsConsistencyCheck,
    TestModeNavigationCheck,
};
use crate::driver::PageDriver;
use themecheck_core::step::run_step;
use themecheck_core::{Report, RunConfig};
use tracing::info;

/// Checks evaluated in sequence against one shared page
pub struct Checklist {
    checks: Vec<Box<dyn Check>>,
}

impl Checklist {
    /// An empty checklist
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// History, Settings, navigation and design consistency, in that order
    pub fn standard() -> Self {
        Self::new()
            .with_check(HistoryGradientCheck)
            .with_check(SettingsConsistencyCheck)
            .with_check(TestModeNavigationCheck)
            .with_check(DesignConsistencyCheck)
    }

    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run every check; a failing check never stops the ones after it
    pub async fn run(&self, page: &dyn PageDriver, config: &RunConfig) -> Report {
        info!("Running {} checks against {}", self.checks.len(), config.base_url);

        let mut results = Vec::with_capacity(self.checks.len());
        for (index, check) in self.checks.iter().enumerate() {
            println!("\n{} {}", step_marker(index + 1), check.name());
            let result = run_step(check.name(), || check.run(page, config)).await;
            results.push(result);
        }

        Report::new(results)
    }
}

impl Default for Checklist {
    fn default() -> Self {
        Self::standard()
    }
}

/// Keycap emoji for 1-9, plain number otherwise
fn step_marker(n: usize) -> String {
    if (1..=9).contains(&n) {
        format!("{}\u{FE0F}\u{20E3}", n)
    } else {
        format!("{}.", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_order() {
        let checklist = Checklist::standard();
        assert_eq!(
            checklist.names(),
            vec![
                "History page gradient",
                "Settings page consistency",
                "Test mode navigation",
                "Overall design consistency",
            ]
        );
    }

    #[test]
    fn test_new_is_empty() {
        assert!(Checklist::new().is_empty());
        assert_eq!(Checklist::default().len(), 4);
    }

    #[test]
    fn test_step_marker() {
        assert_eq!(step_marker(1), "1️⃣");
        assert_eq!(step_marker(4), "4️⃣");
        assert_eq!(step_marker(12), "12.");
    }
}
