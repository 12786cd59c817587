//! Check results and their printed summary.

use std::fmt;

use serde::Serialize;

use crate::breakpoint::Breakpoint;
use crate::checks::CheckResult;

/// Overall judgement for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// At least 90% of checks passed.
    Excellent,
    /// At least 70% of checks passed.
    Good,
    /// Fewer than 70% passed.
    NeedsWork,
}

impl Verdict {
    /// Verdict for a pass percentage in `0.0..=100.0`.
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Self::Excellent
        } else if percentage >= 70.0 {
            Self::Good
        } else {
            Self::NeedsWork
        }
    }

    /// Banner line printed under the summary.
    #[must_use]
    pub fn banner(self) -> &'static str {
        match self {
            Self::Excellent => "🎉 EXCELLENT: the layout holds up at this width",
            Self::Good => "👍 GOOD: a few layout issues left to fix",
            Self::NeedsWork => "⚠️  NEEDS WORK: the layout breaks at this width",
        }
    }
}

/// Results of one full check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutReport {
    /// Breakpoint the snapshot fell into.
    pub breakpoint: Breakpoint,
    /// Measured viewport width.
    pub viewport_width: u32,
    /// One entry per check, in run order.
    pub results: Vec<CheckResult>,
}

impl LayoutReport {
    /// Number of checks that passed.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Number of checks run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Whether every check passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    /// Percentage of checks that passed; 0 for an empty report.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.passed() as f64 * 100.0 / self.total() as f64
    }

    /// Overall verdict.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        Verdict::from_percentage(self.percentage())
    }
}

impl fmt::Display for LayoutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(48);
        writeln!(
            f,
            "📱 Responsive layout check: {} ({}px)",
            self.breakpoint, self.viewport_width
        )?;
        writeln!(f, "{rule}")?;
        for result in &self.results {
            let mark = if result.passed { "✅" } else { "❌" };
            writeln!(f, "{mark} {}: {}", result.name, result.detail)?;
        }
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "Passed {}/{} ({:.1}%)",
            self.passed(),
            self.total(),
            self.percentage()
        )?;
        write!(f, "{}", self.verdict().banner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(passes: &[bool]) -> LayoutReport {
        LayoutReport {
            breakpoint: Breakpoint::Mobile,
            viewport_width: 375,
            results: passes
                .iter()
                .enumerate()
                .map(|(i, passed)| CheckResult {
                    name: format!("check {i}"),
                    passed: *passed,
                    detail: "measured".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_verdict_thresholds() {
        assert_eq!(Verdict::from_percentage(100.0), Verdict::Excellent);
        assert_eq!(Verdict::from_percentage(90.0), Verdict::Excellent);
        assert_eq!(Verdict::from_percentage(89.9), Verdict::Good);
        assert_eq!(Verdict::from_percentage(70.0), Verdict::Good);
        assert_eq!(Verdict::from_percentage(69.9), Verdict::NeedsWork);
        assert_eq!(Verdict::from_percentage(0.0), Verdict::NeedsWork);
    }

    #[test]
    fn test_counts_and_percentage() {
        let r = report(&[true, true, true, false]);
        assert_eq!(r.passed(), 3);
        assert_eq!(r.total(), 4);
        assert!((r.percentage() - 75.0).abs() < f64::EPSILON);
        assert_eq!(r.verdict(), Verdict::Good);
        assert!(!r.all_passed());
    }

    #[test]
    fn test_empty_report() {
        let r = report(&[]);
        assert_eq!(r.percentage(), 0.0);
        assert_eq!(r.verdict(), Verdict::NeedsWork);
    }

    #[test]
    fn test_display_summary() {
        let text = report(&[true, false]).to_string();
        assert!(text.contains("mobile (375px)"));
        assert!(text.contains("✅ check 0: measured"));
        assert!(text.contains("❌ check 1: measured"));
        assert!(text.contains("Passed 1/2 (50.0%)"));
        assert!(text.contains("NEEDS WORK"));
    }
}
