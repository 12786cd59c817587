//! Measurements taken from a rendered dashboard page.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::breakpoint::Breakpoint;
use crate::error::{LayoutError, Result};

/// One interactive element's rendered size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchTarget {
    /// CSS selector or label identifying the element.
    pub selector: String,
    /// Rendered width in CSS pixels.
    pub width: f64,
    /// Rendered height in CSS pixels.
    pub height: f64,
}

impl TouchTarget {
    /// The smaller of the two dimensions.
    #[must_use]
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// A grid container's computed `grid-template-columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRegion {
    /// Region name, e.g. `stats-grid`.
    pub name: String,
    /// Computed `grid-template-columns` value.
    pub template_columns: String,
}

/// Everything the checks look at, measured at one viewport width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    /// `window.innerWidth` at measurement time.
    pub viewport_width: u32,
    /// `content` of `<meta name="viewport">`, if the tag exists.
    #[serde(default)]
    pub viewport_meta: Option<String>,
    /// Sizes of buttons, links and other tap targets.
    #[serde(default)]
    pub touch_targets: Vec<TouchTarget>,
    /// Computed `overflow-x` of the navigation bar.
    #[serde(default)]
    pub nav_overflow_x: Option<String>,
    /// Grid regions by name.
    #[serde(default)]
    pub grids: Vec<GridRegion>,
    /// Computed `font-size` of `<body>`.
    #[serde(default)]
    pub body_font_size: Option<String>,
    /// `document.documentElement.scrollWidth`.
    pub scroll_width: u32,
}

impl LayoutSnapshot {
    /// The breakpoint this snapshot was taken at.
    #[must_use]
    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::for_width(self.viewport_width)
    }

    /// Look up a grid region by name.
    #[must_use]
    pub fn grid(&self, name: &str) -> Option<&GridRegion> {
        self.grids.iter().find(|g| g.name == name)
    }
}

/// Parse a JSON document holding either one snapshot or an array of them.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or the array is empty.
pub fn parse_snapshots(raw: &str) -> Result<Vec<LayoutSnapshot>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<LayoutSnapshot>),
        One(Box<LayoutSnapshot>),
    }

    let snapshots = match serde_json::from_str(raw)? {
        OneOrMany::Many(snapshots) => snapshots,
        OneOrMany::One(snapshot) => vec![*snapshot],
    };
    if snapshots.is_empty() {
        return Err(LayoutError::NoSnapshots);
    }
    Ok(snapshots)
}

fn width_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"width\s*=\s*[^,\s]+").expect("valid width pattern"))
}

/// Whether a viewport meta `content` string declares a width, with or
/// without spaces around `=`.
#[must_use]
pub fn declares_width(content: &str) -> bool {
    width_pattern().is_match(content)
}

/// Rewrite the declared `width=` of a viewport meta `content` string.
///
/// Adds the declaration at the front when the content has none.
#[must_use]
pub fn rewrite_viewport_width(content: &str, width: u32) -> String {
    let declaration = format!("width={width}");
    let pattern = width_pattern();
    if pattern.is_match(content) {
        pattern.replace(content, declaration.as_str()).into_owned()
    } else if content.trim().is_empty() {
        declaration
    } else {
        format!("{declaration}, {}", content.trim())
    }
}
