//! Activity log document.
//!
//! The log is stored newest-first and capped on every write. Entries are
//! whatever JSON object the dashboard posted, plus a server-assigned `id`
//! and `timestamp`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::state::iso_timestamp;

/// Alphabet for the random id suffix.
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random id suffix.
const ID_SUFFIX_LEN: usize = 9;

/// A single activity entry: caller fields plus `timestamp` and `id`.
pub type ActivityEntry = Map<String, Value>;

/// The `mc-activity.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    /// Entries, newest first.
    #[serde(default)]
    pub activities: Vec<ActivityEntry>,
    /// Always equal to `activities.len()` after a write.
    #[serde(default)]
    pub count: usize,
    /// When the log was last written.
    #[serde(default)]
    pub last_updated: Option<String>,
    /// Top-level keys this server does not use, kept as found.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::empty()
    }
}

impl ActivityLog {
    /// A fresh log with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            activities: Vec::new(),
            count: 0,
            last_updated: Some(iso_timestamp(Utc::now())),
            extra: Map::new(),
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Whether the log has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Make `count` agree with the number of entries.
    pub fn recount(&mut self) {
        self.count = self.activities.len();
    }

    /// Stamp `fields` and put it at the front of the log.
    ///
    /// Entries beyond `max_entries` are dropped from the tail. Returns the
    /// assigned id.
    pub fn record(
        &mut self,
        mut fields: ActivityEntry,
        at: DateTime<Utc>,
        max_entries: usize,
    ) -> String {
        let id = activity_id(at);
        fields.insert("timestamp".to_string(), Value::String(iso_timestamp(at)));
        fields.insert("id".to_string(), Value::String(id.clone()));

        self.activities.insert(0, fields);
        self.activities.truncate(max_entries);
        self.recount();
        self.last_updated = Some(iso_timestamp(at));
        id
    }
}

/// Build an id of the form `act_<epoch-ms>_<9 base36 chars>`.
///
/// Not cryptographically unique; collisions need the same millisecond and
/// the same random suffix.
#[must_use]
pub fn activity_id(at: DateTime<Utc>) -> String {
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| char::from(BASE36[fastrand::usize(..BASE36.len())]))
        .collect();
    format!("act_{}_{suffix}", at.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn entry(value: Value) -> ActivityEntry {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_empty_log() {
        let log = ActivityLog::empty();
        assert!(log.is_empty());
        assert_eq!(log.count, 0);
        assert!(log.last_updated.is_some());
    }

    #[test]
    fn test_activity_id_format() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let id = activity_id(at);

        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "act");
        assert_eq!(parts[1], at.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_activity_ids_differ() {
        let at = Utc::now();
        assert_ne!(activity_id(at), activity_id(at));
    }

    #[test]
    fn test_record_prepends_and_stamps() {
        let mut log = ActivityLog::empty();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        log.record(entry(json!({"action": "first"})), at, 100);
        let id = log.record(entry(json!({"action": "second"})), at, 100);

        assert_eq!(log.count, 2);
        assert_eq!(log.activities[0]["action"], "second");
        assert_eq!(log.activities[0]["id"], id.as_str());
        assert_eq!(log.activities[0]["timestamp"], "2024-05-01T12:00:00.000Z");
        assert_eq!(log.activities[1]["action"], "first");
        assert_eq!(log.last_updated.as_deref(), Some("2024-05-01T12:00:00.000Z"));
    }

    #[test]
    fn test_record_overrides_client_id() {
        let mut log = ActivityLog::empty();
        let id = log.record(entry(json!({"id": "mine", "action": "x"})), Utc::now(), 100);
        assert_eq!(log.activities[0]["id"], id.as_str());
    }

    #[test]
    fn test_record_caps_entries() {
        let mut log = ActivityLog::empty();
        for i in 0..101 {
            log.record(entry(json!({ "n": i })), Utc::now(), 100);
        }

        assert_eq!(log.len(), 100);
        assert_eq!(log.count, 100);
        assert_eq!(log.activities[0]["n"], 100);
        assert_eq!(log.activities[99]["n"], 1);
    }

    #[test]
    fn test_record_recounts_oversized_log() {
        let mut log = ActivityLog {
            activities: (0..5).map(|i| entry(json!({ "n": i }))).collect(),
            count: 42,
            last_updated: None,
            extra: Map::new(),
        };
        log.record(entry(json!({"n": "new"})), Utc::now(), 3);

        assert_eq!(log.len(), 3);
        assert_eq!(log.count, 3);
        assert_eq!(log.activities[0]["n"], "new");
    }

    #[test]
    fn test_deserialize_camel_case() {
        let raw = r#"{"activities":[{"action":"a"}],"count":1,"lastUpdated":"2024-01-01T00:00:00.000Z"}"#;
        let log: ActivityLog = serde_json::from_str(raw).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.last_updated.as_deref(), Some("2024-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_unknown_keys_survive_a_write() {
        let raw = r#"{"activities":[],"count":0,"owner":"dash"}"#;
        let mut log: ActivityLog = serde_json::from_str(raw).unwrap();
        log.record(entry(json!({"action": "a"})), Utc::now(), 100);

        let value = serde_json::to_value(&log).unwrap();
        assert_eq!(value["owner"], "dash");
        assert_eq!(value["count"], 1);
        assert!(value.get("extra").is_none());
    }

    #[test]
    fn test_recount_fixes_missing_count() {
        let raw = r#"{"activities":[{"a":1},{"a":2}]}"#;
        let mut log: ActivityLog = serde_json::from_str(raw).unwrap();
        assert_eq!(log.count, 0);
        log.recount();
        assert_eq!(log.count, 2);
    }

    #[test]
    fn test_deserialize_rejects_non_object_entries() {
        let raw = r#"{"activities":[1, 2, 3]}"#;
        assert!(serde_json::from_str::<ActivityLog>(raw).is_err());
    }
}
