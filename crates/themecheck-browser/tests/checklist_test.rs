//! Integration tests for the checklist runner
//!
//! Runs the standard checklist against a scripted page:
//! - All checks passing
//! - Navigation failures isolated to the affected checks
//! - Predicate thresholds for each check
//! - Screenshot files written for History and Settings
//! - Click and later-page failures downgraded to failed steps

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Mutex;
use themecheck_browser::checks::{HISTORY_SCREENSHOT, SETTINGS_SCREENSHOT};
use themecheck_browser::driver::count_script;
use themecheck_browser::probes::{
    CARD_SNAPSHOT_SCRIPT, NAV_LINK_SELECTOR, PAGE_BACKGROUND_SCRIPT, THEME_SCRIPT,
    TODAY_LINK_SELECTOR,
};
use themecheck_browser::{Checklist, PageDriver};
use themecheck_core::report::NOT_ALL_PASSED_MESSAGE;
use themecheck_core::{Result, RunConfig, ThemeCheckError};

/// Scripted page standing in for a Chrome tab
struct MockPage {
    current_url: Mutex<String>,
    failing_paths: HashSet<String>,
    page_classes: String,
    card_classes: Vec<String>,
    themed_paths: HashSet<String>,
    nav_links: usize,
    today_links: usize,
    failing_click: bool,
    drop_query_on_load: bool,
    clicks: Mutex<Vec<String>>,
}

impl MockPage {
    /// A page where every check passes
    fn healthy() -> Self {
        Self {
            current_url: Mutex::new("about:blank".to_string()),
            failing_paths: HashSet::new(),
            page_classes: "min-h-screen bg-gray-50".to_string(),
            card_classes: vec![
                "rounded-xl bg-gradient-to-br from-violet-50 to-white border-violet-200".to_string(),
                "rounded-xl border-violet-200".to_string(),
            ],
            themed_paths: ["/today", "/history", "/settings"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            nav_links: 4,
            today_links: 1,
            failing_click: false,
            drop_query_on_load: false,
            clicks: Mutex::new(Vec::new()),
        }
    }

    fn failing(mut self, path: &str) -> Self {
        self.failing_paths.insert(path.to_string());
        self
    }

    fn path(url: &str) -> String {
        url::Url::parse(url)
            .map(|u| u.path().to_string())
            .unwrap_or_default()
    }

    fn card_json(&self) -> Value {
        let cards: Vec<Value> = self
            .card_classes
            .iter()
            .map(|classes| {
                json!({
                    "classes": classes,
                    "backgroundImage": "none",
                    "borderColor": "rgb(221, 214, 254)",
                    "hasChildren": true
                })
            })
            .collect();
        Value::Array(cards)
    }
}

#[async_trait]
impl PageDriver for MockPage {
    async fn navigate(&self, url: &str) -> Result<()> {
        let path = Self::path(url);
        if self.failing_paths.contains(&path) {
            return Err(ThemeCheckError::Navigation(format!(
                "net::ERR_CONNECTION_REFUSED at {}",
                url
            )));
        }

        let visited = if self.drop_query_on_load {
            url.split('?').next().unwrap_or(url).to_string()
        } else {
            url.to_string()
        };
        *self.current_url.lock().unwrap() = visited;
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<Value> {
        let current = self.current_url.lock().unwrap().clone();
        let path = Self::path(&current);

        let payload = if script == PAGE_BACKGROUND_SCRIPT {
            json!({
                "bodyClasses": "antialiased",
                "pageClasses": self.page_classes,
                "computedBg": "rgba(0, 0, 0, 0)"
            })
        } else if script == CARD_SNAPSHOT_SCRIPT {
            self.card_json()
        } else if script == THEME_SCRIPT {
            let themed = self.themed_paths.contains(&path);
            json!({
                "gradientElements": if themed { 3 } else { 0 },
                "violetElements": if themed { 5 } else { 0 },
                "totalCards": 2
            })
        } else if script == count_script(NAV_LINK_SELECTOR)? {
            return Ok(json!(self.nav_links));
        } else if script == count_script(TODAY_LINK_SELECTOR)? {
            return Ok(json!(self.today_links));
        } else {
            return Err(ThemeCheckError::Evaluation(format!("unexpected script: {}", script)));
        };

        Ok(Value::String(payload.to_string()))
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.current_url.lock().unwrap().clone())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.clicks.lock().unwrap().push(selector.to_string());
        if self.failing_click {
            return Err(ThemeCheckError::ElementNotFound {
                selector: selector.to_string(),
            });
        }
        *self.current_url.lock().unwrap() = "http://localhost:3000/?test_mode=true".to_string();
        Ok(())
    }

    async fn wait_for_network_idle(&self) -> Result<()> {
        Ok(())
    }

    async fn capture_png(&self) -> Result<Vec<u8>> {
        Ok(b"\x89PNG\r\n\x1a\n".to_vec())
    }
}

fn config_in(dir: &std::path::Path) -> RunConfig {
    RunConfig {
        screenshot_dir: dir.to_path_buf(),
        ..RunConfig::default()
    }
}

fn passed_by_name(report: &themecheck_core::Report) -> Vec<(String, bool)> {
    report
        .results()
        .iter()
        .map(|r| (r.name.clone(), r.passed))
        .collect()
}

#[tokio::test]
async fn test_all_checks_pass() {
    let dir = tempfile::tempdir().unwrap();
    let page = MockPage::healthy();

    let report = Checklist::standard().run(&page, &config_in(dir.path())).await;

    assert_eq!(report.total(), 4);
    assert_eq!(report.passed(), 4);
    assert!(report.all_passed());
    assert!(dir.path().join(HISTORY_SCREENSHOT).exists());
    assert!(dir.path().join(SETTINGS_SCREENSHOT).exists());
    assert_eq!(page.clicks.lock().unwrap().as_slice(), [TODAY_LINK_SELECTOR]);
}

#[tokio::test]
async fn test_navigation_failure_is_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let page = MockPage::healthy().failing("/history");

    let report = Checklist::standard().run(&page, &config_in(dir.path())).await;

    // The run still reaches the report with every check accounted for
    assert_eq!(
        passed_by_name(&report),
        vec![
            ("History page gradient".to_string(), false),
            ("Settings page consistency".to_string(), true),
            ("Test mode navigation".to_string(), false),
            ("Overall design consistency".to_string(), false),
        ]
    );
    assert!(!dir.path().join(HISTORY_SCREENSHOT).exists());
    assert!(dir.path().join(SETTINGS_SCREENSHOT).exists());
    assert!(report.render().contains("25.0%"));
}

#[tokio::test]
async fn test_black_border_fails_history_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut page = MockPage::healthy();
    page.card_classes.push("rounded-xl border-black".to_string());

    let report = Checklist::standard().run(&page, &config_in(dir.path())).await;

    assert!(!report.results()[0].passed);
    assert_eq!(report.passed(), 3);
    let text = report.render();
    assert!(text.contains("75.0%"));
    assert!(text.contains(NOT_ALL_PASSED_MESSAGE));
}

#[tokio::test]
async fn test_missing_gray_background_fails_history() {
    let dir = tempfile::tempdir().unwrap();
    let mut page = MockPage::healthy();
    page.page_classes = "min-h-screen bg-white".to_string();

    let report = Checklist::standard().run(&page, &config_in(dir.path())).await;

    assert!(!report.results()[0].passed);
    assert!(report.results()[1].passed);
}

#[tokio::test]
async fn test_to_white_alone_passes_history_but_not_settings() {
    let dir = tempfile::tempdir().unwrap();
    let mut page = MockPage::healthy();
    page.card_classes = vec!["rounded-xl bg-gradient-to-b to-white".to_string()];

    let report = Checklist::standard().run(&page, &config_in(dir.path())).await;

    assert!(report.results()[0].passed);
    assert!(!report.results()[1].passed);
}

#[tokio::test]
async fn test_dropped_test_mode_fails_navigation() {
    let dir = tempfile::tempdir().unwrap();
    let mut page = MockPage::healthy();
    page.drop_query_on_load = true;

    let report = Checklist::standard().run(&page, &config_in(dir.path())).await;

    assert!(!report.results()[2].passed);
}

#[tokio::test]
async fn test_no_nav_links_fails_navigation() {
    let dir = tempfile::tempdir().unwrap();
    let mut page = MockPage::healthy();
    page.nav_links = 0;

    let report = Checklist::standard().run(&page, &config_in(dir.path())).await;

    assert!(!report.results()[2].passed);
    assert_eq!(report.passed(), 3);
}

#[tokio::test]
async fn test_design_consistency_needs_two_pages() {
    let dir = tempfile::tempdir().unwrap();

    let mut page = MockPage::healthy();
    page.themed_paths = ["/today", "/settings"].iter().map(|p| p.to_string()).collect();
    let report = Checklist::standard().run(&page, &config_in(dir.path())).await;
    assert!(report.results()[3].passed);

    let mut page = MockPage::healthy();
    page.themed_paths = ["/today"].iter().map(|p| p.to_string()).collect();
    let report = Checklist::standard().run(&page, &config_in(dir.path())).await;
    assert!(!report.results()[3].passed);
}

#[tokio::test]
async fn test_visited_urls_carry_configured_flag() {
    let dir = tempfile::tempdir().unwrap();
    let page = MockPage::healthy();
    let config = RunConfig {
        test_mode: false,
        ..config_in(dir.path())
    };

    let report = Checklist::standard().run(&page, &config).await;

    // Without test mode the visited URL must not claim it either
    assert!(report.results()[2].passed);
    assert!(!page.current_url.lock().unwrap().contains("test_mode"));
}

#[tokio::test]
async fn test_missing_today_link_still_passes_navigation() {
    let dir = tempfile::tempdir().unwrap();
    let mut page = MockPage::healthy();
    page.today_links = 0;

    let report = Checklist::standard().run(&page, &config_in(dir.path())).await;

    assert!(report.results()[2].passed);
    assert!(page.clicks.lock().unwrap().is_empty());
    assert!(report.all_passed());
}

#[tokio::test]
async fn test_click_error_fails_navigation_step() {
    let dir = tempfile::tempdir().unwrap();
    let mut page = MockPage::healthy();
    page.failing_click = true;

    let report = Checklist::standard().run(&page, &config_in(dir.path())).await;

    assert_eq!(page.clicks.lock().unwrap().as_slice(), [TODAY_LINK_SELECTOR]);
    assert!(!report.results()[2].passed);
    // The checks after it still run
    assert!(report.results()[3].passed);
    assert_eq!(report.passed(), 3);
}

#[tokio::test]
async fn test_design_consistency_fails_on_later_page_error() {
    let dir = tempfile::tempdir().unwrap();
    // /today and /history are themed and load fine before /settings fails
    let page = MockPage::healthy().failing("/settings");

    let report = Checklist::standard().run(&page, &config_in(dir.path())).await;

    assert_eq!(
        passed_by_name(&report),
        vec![
            ("History page gradient".to_string(), true),
            ("Settings page consistency".to_string(), false),
            ("Test mode navigation".to_string(), true),
            ("Overall design consistency".to_string(), false),
        ]
    );
    assert!(!dir.path().join(SETTINGS_SCREENSHOT).exists());
}
