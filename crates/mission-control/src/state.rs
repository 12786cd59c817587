//! Process-lifetime server state.
//!
//! One [`ServerState`] is created at startup and shared with the router. It
//! is never persisted; a restart resets every counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Version reported by `/api/status`.
pub const API_VERSION: &str = "1.0.0";

/// Format a timestamp the way the dashboard expects it
/// (`2024-05-01T12:00:00.000Z`).
#[must_use]
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The current time as an ISO-8601 string.
#[must_use]
pub fn now_iso() -> String {
    iso_timestamp(Utc::now())
}

/// Counters and timestamps reported by the status endpoint.
#[derive(Debug)]
pub struct ServerState {
    started_at: DateTime<Utc>,
    started: Instant,
    request_count: AtomicU64,
    last_data_refresh: RwLock<Option<DateTime<Utc>>>,
}

/// Snapshot returned by `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    /// Always `"online"` while the server answers.
    pub status: &'static str,
    /// Whole seconds since startup.
    pub uptime: u64,
    /// Successful static file responses so far.
    pub request_count: u64,
    /// When the projects document was last read successfully.
    pub last_data_refresh: Option<String>,
    /// Time the snapshot was taken.
    pub timestamp: String,
    /// Fixed API version string.
    pub version: &'static str,
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerState {
    /// Create the state, stamping the start time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            started: Instant::now(),
            request_count: AtomicU64::new(0),
            last_data_refresh: RwLock::new(None),
        }
    }

    /// When the server started.
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Count one successful static file response.
    pub fn record_request(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Number of successful static file responses.
    #[must_use]
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Mark the projects document as freshly read.
    pub fn mark_data_refresh(&self, at: DateTime<Utc>) {
        let mut guard = self
            .last_data_refresh
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(at);
    }

    /// Last successful projects read, if any.
    #[must_use]
    pub fn last_data_refresh(&self) -> Option<DateTime<Utc>> {
        *self
            .last_data_refresh
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Whole seconds since startup.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    /// Build the status endpoint payload.
    #[must_use]
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            status: "online",
            uptime: self.uptime_secs(),
            request_count: self.request_count(),
            last_data_refresh: self.last_data_refresh().map(iso_timestamp),
            timestamp: now_iso(),
            version: API_VERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_state_is_empty() {
        let state = ServerState::new();
        assert_eq!(state.request_count(), 0);
        assert!(state.last_data_refresh().is_none());
        assert!(state.started_at() <= Utc::now());
    }

    #[test]
    fn test_record_request_increments() {
        let state = ServerState::new();
        assert_eq!(state.record_request(), 1);
        assert_eq!(state.record_request(), 2);
        assert_eq!(state.request_count(), 2);
    }

    #[test]
    fn test_mark_data_refresh() {
        let state = ServerState::new();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        state.mark_data_refresh(at);
        assert_eq!(state.last_data_refresh(), Some(at));
    }

    #[test]
    fn test_iso_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(iso_timestamp(at), "2024-05-01T12:00:00.000Z");
    }

    #[test]
    fn test_snapshot_fields() {
        let state = ServerState::new();
        state.record_request();
        let snapshot = state.snapshot();

        assert_eq!(snapshot.status, "online");
        assert_eq!(snapshot.request_count, 1);
        assert_eq!(snapshot.version, API_VERSION);
        assert!(snapshot.last_data_refresh.is_none());
        assert!(snapshot.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let state = ServerState::new();
        let json = serde_json::to_value(state.snapshot()).unwrap();

        assert_eq!(json["status"], "online");
        assert!(json.get("requestCount").is_some());
        assert!(json.get("uptime").is_some());
        assert!(json["lastDataRefresh"].is_null());
        assert!(json.get("version").is_some());
    }
}
