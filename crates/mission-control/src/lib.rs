//! `mission-control` - A local dashboard server with a flat-file JSON API
//!
//! This library serves the Mission Control dashboard page and a handful of
//! JSON endpoints backed by files in the same directory: a projects
//! document, an activity log and a saved-data blob.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod assets;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod state;
pub mod store;

pub use assets::{Asset, StaticFiles};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use server::{router, AppState};
pub use state::{ServerState, StatusSnapshot};
pub use store::{ActivityLog, FileStore, ProjectsDocument};
