//! Responsive layout checks for the Mission Control dashboard.
//!
//! The checks run against a [`LayoutSnapshot`]: a handful of measurements
//! taken from the rendered page (viewport meta, touch target sizes, computed
//! grid tracks, font size, scroll width). Where the snapshot comes from is
//! the caller's business; a browser bridge or a recorded replay both
//! implement [`LayoutProbe`].
//!
//! This crate has no dependency on the server.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod breakpoint;
pub mod checks;
pub mod error;
pub mod grid;
pub mod probe;
pub mod report;
pub mod snapshot;

pub use breakpoint::Breakpoint;
pub use checks::{run_checks, CheckResult};
pub use error::{LayoutError, Result};
pub use probe::{simulate_breakpoint, LayoutProbe, ReplayProbe, SETTLE_DELAY};
pub use report::{LayoutReport, Verdict};
pub use snapshot::{parse_snapshots, GridRegion, LayoutSnapshot, TouchTarget};
