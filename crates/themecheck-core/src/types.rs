//! Data model for a verification run
//!
//! Probe types mirror the JSON returned by in-page scripts (camelCase keys).
//! Classification happens on the Rust side so the rules can be tested without
//! a browser.

use serde::{Deserialize, Serialize};

/// Class marker for the light gray page background
pub const GRAY_BG_CLASS: &str = "bg-gray-50";

/// Computed RGB components of `bg-gray-50`
pub const GRAY_BG_RGB: &str = "249, 250, 251";

/// Computed border color treated as a black border
pub const BLACK_BORDER_RGB: &str = "rgb(0, 0, 0)";

/// Outcome of one named check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
}

impl CheckResult {
    pub fn new(name: impl Into<String>, passed: bool) -> Self {
        Self {
            name: name.into(),
            passed,
        }
    }
}

/// Background facts about the page's outermost layout element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBackground {
    pub body_classes: String,
    /// Classes of `main`, else `.min-h-screen`, else `body`
    pub page_classes: String,
    /// Computed `background-color` of the same element
    pub computed_bg: String,
}

impl PageBackground {
    /// Gray background via class marker or computed color
    pub fn has_gray_bg(&self) -> bool {
        self.page_classes.contains(GRAY_BG_CLASS) || self.computed_bg.contains(GRAY_BG_RGB)
    }
}

/// Raw facts about one card candidate element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSnapshot {
    pub classes: String,
    pub background_image: String,
    pub border_color: String,
    pub has_children: bool,
}

/// Which class markers count as the violet card theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VioletRule {
    /// `from-violet-50`, `to-white` or `border-violet-200`
    History,
    /// `from-violet-50` or `border-violet-200`
    Settings,
}

impl VioletRule {
    fn markers(self) -> &'static [&'static str] {
        match self {
            VioletRule::History => &["from-violet-50", "to-white", "border-violet-200"],
            VioletRule::Settings => &["from-violet-50", "border-violet-200"],
        }
    }

    pub fn matches(self, classes: &str) -> bool {
        self.markers().iter().any(|m| classes.contains(m))
    }
}

impl CardSnapshot {
    pub fn is_violet(&self, rule: VioletRule) -> bool {
        rule.matches(&self.classes)
    }

    pub fn has_gradient(&self) -> bool {
        self.classes.contains("gradient") || self.background_image.contains("gradient")
    }

    pub fn has_black_border(&self) -> bool {
        self.border_color.contains(BLACK_BORDER_RGB) || self.classes.contains("border-black")
    }
}

/// Counts derived from a set of card snapshots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardAnalysis {
    /// Candidates with at least one child element
    pub total_cards: usize,
    pub violet_cards: usize,
    pub gradient_cards: usize,
    pub black_border_cards: usize,
}

impl CardAnalysis {
    /// Classify snapshots; candidates without children are skipped
    pub fn from_snapshots(cards: &[CardSnapshot], rule: VioletRule) -> Self {
        cards
            .iter()
            .filter(|c| c.has_children)
            .fold(Self::default(), |mut acc, card| {
                acc.total_cards += 1;
                if card.is_violet(rule) {
                    acc.violet_cards += 1;
                }
                if card.has_gradient() {
                    acc.gradient_cards += 1;
                }
                if card.has_black_border() {
                    acc.black_border_cards += 1;
                }
                acc
            })
    }
}

/// Theme marker counts for one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeInfo {
    pub gradient_elements: usize,
    pub violet_elements: usize,
    pub total_cards: usize,
}

impl ThemeInfo {
    pub fn has_consistent_theme(&self) -> bool {
        self.gradient_elements > 0 || self.violet_elements > 0
    }
}
