use serde::Serialize;
use thiserror::Error;

/// Which static lookup table a missing key was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Condition,
    DayName,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Condition => f.write_str("condition"),
            AssetKind::DayName => f.write_str("day name"),
        }
    }
}

/// Recoverable conditions surfaced to the user as a banner or notice.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum ViewError {
    #[error("Location search for '{query}' failed: {reason}")]
    LookupFailed { query: String, reason: String },

    #[error("Could not load weather for {location}: {reason}")]
    FetchFailed { location: String, reason: String },

    #[error("No {kind} asset for '{key}'")]
    AssetMissing { kind: AssetKind, key: String },

    #[error("Unrecognised forecast date '{date}'")]
    InvalidDate { date: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = ViewError::FetchFailed { location: "London, UK".into(), reason: "timeout".into() };
        assert_eq!(err.to_string(), "Could not load weather for London, UK: timeout");

        let err = ViewError::AssetMissing { kind: AssetKind::Condition, key: "Blizzard".into() };
        assert_eq!(err.to_string(), "No condition asset for 'Blizzard'");
    }
}
