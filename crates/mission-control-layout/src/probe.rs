//! Driving checks through a live (or replayed) page.
//!
//! A [`LayoutProbe`] measures the page on demand. The simulation helper
//! rewrites the declared viewport width, fires a resize, waits for the page
//! to settle and runs the checks again. That approximates a breakpoint
//! change; it does not actually resize the window.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::breakpoint::Breakpoint;
use crate::checks::run_checks;
use crate::error::{LayoutError, Result};
use crate::report::LayoutReport;
use crate::snapshot::{rewrite_viewport_width, LayoutSnapshot};

/// How long to wait after a resize before measuring again.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Something that can measure the dashboard page.
#[async_trait]
pub trait LayoutProbe: Send {
    /// Measure the page as it currently renders.
    async fn snapshot(&mut self) -> Result<LayoutSnapshot>;

    /// Rewrite the viewport meta tag to declare `width`.
    async fn set_viewport_width(&mut self, width: u32) -> Result<()>;

    /// Notify the page that the viewport changed.
    async fn dispatch_resize(&mut self) -> Result<()>;
}

/// Measure the page and run every check.
///
/// # Errors
///
/// Returns an error if the probe cannot measure the page.
pub async fn check_current<P: LayoutProbe + ?Sized>(probe: &mut P) -> Result<LayoutReport> {
    let snapshot = probe.snapshot().await?;
    Ok(run_checks(&snapshot))
}

/// Simulate a breakpoint and re-run the checks after [`SETTLE_DELAY`].
///
/// # Errors
///
/// Returns an error if any probe step fails.
pub async fn simulate_breakpoint<P: LayoutProbe + ?Sized>(
    probe: &mut P,
    breakpoint: Breakpoint,
) -> Result<LayoutReport> {
    simulate_width(probe, breakpoint.width(), SETTLE_DELAY).await
}

/// Simulate an arbitrary width with a custom settle delay.
///
/// # Errors
///
/// Returns an error if any probe step fails.
pub async fn simulate_width<P: LayoutProbe + ?Sized>(
    probe: &mut P,
    width: u32,
    settle: Duration,
) -> Result<LayoutReport> {
    info!(width, "simulating viewport width");
    probe.set_viewport_width(width).await?;
    probe.dispatch_resize().await?;
    tokio::time::sleep(settle).await;
    check_current(probe).await
}

/// Replays snapshots recorded at several widths.
///
/// Declaring a width and dispatching a resize switches to the recorded
/// snapshot closest to that width, with its viewport meta rewritten to
/// declare the width.
#[derive(Debug, Clone)]
pub struct ReplayProbe {
    snapshots: Vec<LayoutSnapshot>,
    current: usize,
    declared_width: Option<u32>,
    resizes: usize,
}

impl ReplayProbe {
    /// Create a probe over recorded snapshots; the first one is current.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NoSnapshots`] if `snapshots` is empty.
    pub fn new(snapshots: Vec<LayoutSnapshot>) -> Result<Self> {
        if snapshots.is_empty() {
            return Err(LayoutError::NoSnapshots);
        }
        Ok(Self {
            snapshots,
            current: 0,
            declared_width: None,
            resizes: 0,
        })
    }

    /// Number of resize notifications received.
    #[must_use]
    pub fn resize_count(&self) -> usize {
        self.resizes
    }

    fn closest_to(&self, width: u32) -> usize {
        self.snapshots
            .iter()
            .enumerate()
            .min_by_key(|(_, s)| s.viewport_width.abs_diff(width))
            .map_or(0, |(i, _)| i)
    }
}

#[async_trait]
impl LayoutProbe for ReplayProbe {
    async fn snapshot(&mut self) -> Result<LayoutSnapshot> {
        let mut snapshot = self.snapshots[self.current].clone();
        if let (Some(width), Some(meta)) = (self.declared_width, snapshot.viewport_meta.as_mut()) {
            *meta = rewrite_viewport_width(meta, width);
        }
        Ok(snapshot)
    }

    async fn set_viewport_width(&mut self, width: u32) -> Result<()> {
        self.declared_width = Some(width);
        Ok(())
    }

    async fn dispatch_resize(&mut self) -> Result<()> {
        self.resizes += 1;
        if let Some(width) = self.declared_width {
            self.current = self.closest_to(width);
            debug!(
                width,
                recorded = self.snapshots[self.current].viewport_width,
                "replaying snapshot"
            );
        }
        Ok(())
    }
}
