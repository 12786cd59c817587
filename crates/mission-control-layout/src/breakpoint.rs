//! The three viewport widths the dashboard is checked at.

use serde::{Deserialize, Serialize};

/// A named viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Breakpoint {
    /// Phones.
    Mobile,
    /// Tablets and narrow windows.
    Tablet,
    /// Everything wider.
    Desktop,
}

impl Breakpoint {
    /// All breakpoints, narrowest first.
    pub const ALL: [Breakpoint; 3] = [Self::Mobile, Self::Tablet, Self::Desktop];

    /// Representative width in CSS pixels.
    #[must_use]
    pub fn width(self) -> u32 {
        match self {
            Self::Mobile => 375,
            Self::Tablet => 768,
            Self::Desktop => 1280,
        }
    }

    /// The breakpoint a viewport width falls into.
    #[must_use]
    pub fn for_width(width: u32) -> Self {
        match width {
            0..=767 => Self::Mobile,
            768..=1023 => Self::Tablet,
            _ => Self::Desktop,
        }
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mobile => write!(f, "mobile"),
            Self::Tablet => write!(f, "tablet"),
            Self::Desktop => write!(f, "desktop"),
        }
    }
}
