//! The four theme checks
//!
//! Each check navigates the shared page, probes the DOM, prints what it found
//! and reduces it to a single pass/fail.

use crate::driver::PageDriver;
use crate::probes::{self, NAV_LINK_SELECTOR, TODAY_LINK_SELECTOR};
use crate::screenshot::capture_full_page;
use async_trait::async_trait;
use themecheck_core::{test_mode_of, CardAnalysis, Result, RunConfig, VioletRule};
use tracing::debug;

pub const HISTORY_SCREENSHOT: &str = "history_page_final_check.png";
pub const SETTINGS_SCREENSHOT: &str = "settings_page_final_check.png";

/// Pages that must share the violet/gradient theme
pub const THEMED_PAGES: [&str; 3] = ["/today", "/history", "/settings"];

/// Themed pages required for the design consistency check
pub const MIN_CONSISTENT_PAGES: usize = 2;

/// One named verification step
#[async_trait]
pub trait Check: Send + Sync {
    /// Label shown in progress output and the report
    fn name(&self) -> &str;

    /// Run the check; an error marks the step failed
    async fn run(&self, page: &dyn PageDriver, config: &RunConfig) -> Result<bool>;
}

/// History page: gray background, violet cards, no black borders
pub struct HistoryGradientCheck;

#[async_trait]
impl Check for HistoryGradientCheck {
    fn name(&self) -> &str {
        "History page gradient"
    }

    async fn run(&self, page: &dyn PageDriver, config: &RunConfig) -> Result<bool> {
        let url = config.page_url("/history")?;
        page.navigate(url.as_str()).await?;

        let background = probes::page_background(page).await?;
        println!("   ✅ Page background:");
        println!("      - bg-gray-50 applied: {}", background.has_gray_bg());
        println!("      - computed background: {}", background.computed_bg);

        let snapshots = probes::card_snapshots(page).await?;
        let cards = CardAnalysis::from_snapshots(&snapshots, VioletRule::History);
        println!("   ✅ Conversation card styles:");
        println!("      - total cards: {}", cards.total_cards);
        println!("      - violet gradient cards: {}", cards.violet_cards);
        println!("      - gradient cards: {}", cards.gradient_cards);
        println!(
            "      - black border cards: {} (must be 0)",
            cards.black_border_cards
        );

        capture_full_page(page, &config.screenshot_path(HISTORY_SCREENSHOT)).await?;
        println!("   📸 History page screenshot saved");

        Ok(cards.violet_cards > 0 && cards.black_border_cards == 0 && background.has_gray_bg())
    }
}

/// Settings page: at least one violet card
pub struct SettingsConsistencyCheck;

#[async_trait]
impl Check for SettingsConsistencyCheck {
    fn name(&self) -> &str {
        "Settings page consistency"
    }

    async fn run(&self, page: &dyn PageDriver, config: &RunConfig) -> Result<bool> {
        let url = config.page_url("/settings")?;
        page.navigate(url.as_str()).await?;

        let snapshots = probes::card_snapshots(page).await?;
        let cards = CardAnalysis::from_snapshots(&snapshots, VioletRule::Settings);
        println!("   ✅ Settings card analysis:");
        println!("      - card candidates: {}", snapshots.len());
        println!("      - violet gradient cards: {}", cards.violet_cards);
        println!("      - gradient cards: {}", cards.gradient_cards);

        capture_full_page(page, &config.screenshot_path(SETTINGS_SCREENSHOT)).await?;
        println!("   📸 Settings page screenshot saved");

        Ok(cards.violet_cards > 0)
    }
}

/// Test mode survives navigation and the page exposes nav links
pub struct TestModeNavigationCheck;

#[async_trait]
impl Check for TestModeNavigationCheck {
    fn name(&self) -> &str {
        "Test mode navigation"
    }

    async fn run(&self, page: &dyn PageDriver, config: &RunConfig) -> Result<bool> {
        let url = config.page_url("/history")?;
        page.navigate(url.as_str()).await?;

        let start_url = page.current_url().await?;
        let has_test_mode = test_mode_of(&start_url) == config.test_mode;
        println!("   ✅ Start URL: {}", start_url);
        println!("   ✅ test_mode flag preserved: {}", has_test_mode);

        let nav_links = page.count(NAV_LINK_SELECTOR).await?;
        println!("   ✅ Navigation links found: {}", nav_links);

        if page.count(TODAY_LINK_SELECTOR).await? > 0 {
            page.click(TODAY_LINK_SELECTOR).await?;
            page.wait_for_network_idle().await?;
            let today_url = page.current_url().await?;
            println!("   ✅ Moved to Today page: {}", today_url);
        } else {
            debug!("No Today link on {}", start_url);
        }

        Ok(has_test_mode && nav_links > 0)
    }
}

/// Gradient or violet markers on most of the themed pages
pub struct DesignConsistencyCheck;

#[async_trait]
impl Check for DesignConsistencyCheck {
    fn name(&self) -> &str {
        "Overall design consistency"
    }

    async fn run(&self, page: &dyn PageDriver, config: &RunConfig) -> Result<bool> {
        let mut consistent_pages = 0;

        for path in THEMED_PAGES {
            let url = config.page_url(path)?;
            page.navigate(url.as_str()).await?;

            let info = probes::theme_info(page).await?;
            println!(
                "   ✅ {}: gradient={}, violet={}",
                path, info.gradient_elements, info.violet_elements
            );
            if info.has_consistent_theme() {
                consistent_pages += 1;
            }
        }

        println!(
            "   ✅ Pages with a consistent theme: {}/{}",
            consistent_pages,
            THEMED_PAGES.len()
        );

        Ok(consistent_pages >= MIN_CONSISTENT_PAGES)
    }
}
