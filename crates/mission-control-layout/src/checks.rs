//! The named layout checks.
//!
//! Each check looks at one aspect of a [`LayoutSnapshot`] and records
//! whether it passed together with what was measured.

use serde::Serialize;
use tracing::debug;

use crate::breakpoint::Breakpoint;
use crate::grid::column_count;
use crate::report::LayoutReport;
use crate::snapshot::{declares_width, LayoutSnapshot};

/// Smallest acceptable tap target side, in CSS pixels.
pub const MIN_TOUCH_TARGET_PX: f64 = 44.0;

/// Smallest acceptable body font size, in CSS pixels.
pub const MIN_BODY_FONT_PX: f64 = 14.0;

/// Largest acceptable body font size, in CSS pixels.
pub const MAX_BODY_FONT_PX: f64 = 16.0;

/// Grid regions whose column counts are checked.
pub const GRID_REGIONS: [&str; 3] = ["stats-grid", "projects-grid", "kanban-board"];

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Human-readable check name.
    pub name: String,
    /// Whether the check passed.
    pub passed: bool,
    /// What was measured.
    pub detail: String,
}

impl CheckResult {
    fn new(name: impl Into<String>, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

/// Run every check against a snapshot.
#[must_use]
pub fn run_checks(snapshot: &LayoutSnapshot) -> LayoutReport {
    let breakpoint = snapshot.breakpoint();

    let mut results = vec![
        check_viewport_meta(snapshot),
        check_touch_targets(snapshot),
        check_navigation(snapshot, breakpoint),
    ];
    results.extend(
        GRID_REGIONS
            .iter()
            .map(|region| check_grid(snapshot, breakpoint, region)),
    );
    results.push(check_body_font_size(snapshot));
    results.push(check_horizontal_overflow(snapshot));

    for result in &results {
        debug!(check = %result.name, passed = result.passed, detail = %result.detail);
    }

    LayoutReport {
        breakpoint,
        viewport_width: snapshot.viewport_width,
        results,
    }
}

fn check_viewport_meta(snapshot: &LayoutSnapshot) -> CheckResult {
    let name = "Viewport meta tag";
    match snapshot.viewport_meta.as_deref() {
        Some(content) if declares_width(content) => CheckResult::new(name, true, content),
        Some(content) => CheckResult::new(name, false, format!("no width declared: {content:?}")),
        None => CheckResult::new(name, false, "missing"),
    }
}

fn check_touch_targets(snapshot: &LayoutSnapshot) -> CheckResult {
    let name = format!("Touch targets >= {MIN_TOUCH_TARGET_PX}px");
    let too_small: Vec<String> = snapshot
        .touch_targets
        .iter()
        .filter(|t| t.min_side() < MIN_TOUCH_TARGET_PX)
        .map(|t| format!("{} ({}x{})", t.selector, t.width, t.height))
        .collect();

    if too_small.is_empty() {
        let detail = format!("{} targets measured", snapshot.touch_targets.len());
        CheckResult::new(name, true, detail)
    } else {
        CheckResult::new(name, false, format!("too small: {}", too_small.join(", ")))
    }
}

fn check_navigation(snapshot: &LayoutSnapshot, breakpoint: Breakpoint) -> CheckResult {
    let name = "Responsive navigation";
    let overflow = snapshot.nav_overflow_x.as_deref().unwrap_or("unknown");
    let scrolls = matches!(overflow, "auto" | "scroll");
    let passed = breakpoint == Breakpoint::Desktop || scrolls;
    CheckResult::new(name, passed, format!("overflow-x: {overflow}"))
}

fn check_grid(snapshot: &LayoutSnapshot, breakpoint: Breakpoint, region: &str) -> CheckResult {
    let name = format!("Grid columns: {region}");
    let Some(grid) = snapshot.grid(region) else {
        return CheckResult::new(name, false, "region not found");
    };

    let columns = column_count(&grid.template_columns);
    let (passed, expected) = match breakpoint {
        Breakpoint::Mobile => (columns == 1, "exactly 1"),
        Breakpoint::Tablet => (columns >= 1, "at least 1"),
        Breakpoint::Desktop => (columns >= 2, "at least 2"),
    };
    CheckResult::new(
        name,
        passed,
        format!("{columns} columns (expected {expected})"),
    )
}

fn check_body_font_size(snapshot: &LayoutSnapshot) -> CheckResult {
    let name = format!("Body font size {MIN_BODY_FONT_PX}-{MAX_BODY_FONT_PX}px");
    let raw = snapshot.body_font_size.as_deref().unwrap_or("unknown");
    match parse_px(raw) {
        Some(px) => {
            let passed = (MIN_BODY_FONT_PX..=MAX_BODY_FONT_PX).contains(&px);
            CheckResult::new(name, passed, raw)
        }
        None => CheckResult::new(name, false, format!("unreadable font size: {raw}")),
    }
}

fn check_horizontal_overflow(snapshot: &LayoutSnapshot) -> CheckResult {
    let passed = snapshot.scroll_width <= snapshot.viewport_width;
    CheckResult::new(
        "No horizontal overflow",
        passed,
        format!(
            "scroll width {}px, viewport {}px",
            snapshot.scroll_width, snapshot.viewport_width
        ),
    )
}

/// Parse a pixel length such as `"15px"` or `"15.5px"`.
#[must_use]
pub fn parse_px(value: &str) -> Option<f64> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}
