//! In-page DOM probes
//!
//! Each probe script returns `JSON.stringify(...)` so the payload comes back
//! as a string primitive regardless of how CDP serializes objects.

use crate::driver::PageDriver;
use serde::de::DeserializeOwned;
use themecheck_core::{CardSnapshot, PageBackground, Result, ThemeCheckError, ThemeInfo};
use tracing::debug;

/// Elements considered conversation/settings cards
pub const CARD_SELECTOR: &str = r#".space-y-4 > div, [class*="card"], .rounded-xl"#;

/// Links counted by the navigation check
pub const NAV_LINK_SELECTOR: &str = r#"a[href*="/"], nav a"#;

/// Link leading to the Today page
pub const TODAY_LINK_SELECTOR: &str = r#"a[href="/"], a[href="/today"]"#;

pub const PAGE_BACKGROUND_SCRIPT: &str = r#"JSON.stringify((() => {
    const body = document.body;
    const main = document.querySelector('main') || document.querySelector('.min-h-screen');
    const pageElement = main || body;
    return {
        bodyClasses: body.className,
        pageClasses: pageElement.className,
        computedBg: window.getComputedStyle(pageElement).backgroundColor
    };
})())"#;

pub const CARD_SNAPSHOT_SCRIPT: &str = r#"JSON.stringify(Array.from(
    document.querySelectorAll('.space-y-4 > div, [class*="card"], .rounded-xl')
).map(card => {
    const style = window.getComputedStyle(card);
    return {
        classes: card.getAttribute('class') || '',
        backgroundImage: style.backgroundImage,
        borderColor: style.borderColor,
        hasChildren: card.children.length > 0
    };
}))"#;

pub const THEME_SCRIPT: &str = r#"JSON.stringify({
    gradientElements: document.querySelectorAll('[class*="gradient"]').length,
    violetElements: document.querySelectorAll('[class*="violet"], [class*="purple"]').length,
    totalCards: document.querySelectorAll('[class*="card"], .rounded-xl').length
})"#;

/// Evaluate a script returning JSON text and decode it
pub async fn evaluate_json<T: DeserializeOwned>(page: &dyn PageDriver, script: &str) -> Result<T> {
    let value = page.evaluate(script).await?;
    let text = value.as_str().ok_or_else(|| {
        ThemeCheckError::Evaluation(format!("Probe returned non-string value: {}", value))
    })?;
    debug!("Probe returned {} bytes", text.len());
    Ok(serde_json::from_str(text)?)
}

pub async fn page_background(page: &dyn PageDriver) -> Result<PageBackground> {
    evaluate_json(page, PAGE_BACKGROUND_SCRIPT).await
}

/// Snapshot every card candidate, including childless ones
pub async fn card_snapshots(page: &dyn PageDriver) -> Result<Vec<CardSnapshot>> {
    evaluate_json(page, CARD_SNAPSHOT_SCRIPT).await
}

pub async fn theme_info(page: &dyn PageDriver) -> Result<ThemeInfo> {
    evaluate_json(page, THEME_SCRIPT).await
}
