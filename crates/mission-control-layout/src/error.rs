//! Error types for layout checks.

use thiserror::Error;

/// Errors raised while collecting or replaying layout snapshots.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// A replay was requested with nothing to replay.
    #[error("no layout snapshots recorded")]
    NoSnapshots,

    /// The probe could not measure the page.
    #[error("layout probe failed: {0}")]
    Probe(String),

    /// Snapshot JSON could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

impl LayoutError {
    /// Create a probe error.
    #[must_use]
    pub fn probe(message: impl Into<String>) -> Self {
        Self::Probe(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            LayoutError::NoSnapshots.to_string(),
            "no layout snapshots recorded"
        );
        assert_eq!(
            LayoutError::probe("page closed").to_string(),
            "layout probe failed: page closed"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err: LayoutError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, LayoutError::Json(_)));
    }
}
