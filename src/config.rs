//! Session tuning, loadable from JSON.
//!
//! ```json
//! { "history_capacity": 50, "history_debounce_ms": 300, "url_debounce_ms": 200,
//!   "page_size": 10, "facet_scope": "language_and_text" }
//! ```
//!
//! Every field is optional; absent fields keep their default. Debounce delays
//! are capped at [`MAX_DEBOUNCE_MS`].

use crate::{Error, FacetScope, Result, history::DEFAULT_CAPACITY};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Longest accepted debounce delay.
pub const MAX_DEBOUNCE_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub history_capacity: usize,
    pub history_debounce_ms: u64,
    pub url_debounce_ms: u64,
    pub page_size: usize,
    pub facet_scope: FacetScope,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
            history_debounce_ms: 300,
            url_debounce_ms: 200,
            page_size: 10,
            facet_scope: FacetScope::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|source| Error::Json { what: "session config".to_string(), source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json =
            std::fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(Error::Config("history_capacity must be at least 1".to_string()));
        }
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        let delays = [("history_debounce_ms", self.history_debounce_ms), ("url_debounce_ms", self.url_debounce_ms)];
        for (name, ms) in delays {
            if ms > MAX_DEBOUNCE_MS {
                return Err(Error::Config(format!("{name} must be at most {MAX_DEBOUNCE_MS}, got {ms}")));
            }
        }
        Ok(())
    }

    pub fn history_debounce(&self) -> TimeDelta {
        millis(self.history_debounce_ms)
    }

    pub fn url_debounce(&self) -> TimeDelta {
        millis(self.url_debounce_ms)
    }
}

fn millis(ms: u64) -> TimeDelta {
    TimeDelta::try_milliseconds(i64::try_from(ms).unwrap_or(i64::MAX)).unwrap_or(TimeDelta::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_browsing_behaviour() {
        let config = SessionConfig::default();
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.history_debounce(), TimeDelta::milliseconds(300));
        assert_eq!(config.url_debounce(), TimeDelta::milliseconds(200));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.facet_scope, FacetScope::LanguageAndText);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SessionConfig::from_json_str(r#"{ "page_size": 25, "facet_scope": "contextual" }"#).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.facet_scope, FacetScope::Contextual);
        assert_eq!(config.history_capacity, 50);
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let err = SessionConfig::from_json_str(r#"{ "history_capacity": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(SessionConfig::from_json_str(r#"{ "page_size": 0 }"#).is_err());
    }

    #[test]
    fn debounce_delays_are_bounded() {
        let err = SessionConfig::from_json_str(r#"{ "history_debounce_ms": 18446744073709551615 }"#).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("history_debounce_ms")));
        assert!(SessionConfig::from_json_str(r#"{ "url_debounce_ms": 60001 }"#).is_err());

        let config = SessionConfig::from_json_str(r#"{ "url_debounce_ms": 60000 }"#).unwrap();
        assert_eq!(config.url_debounce(), TimeDelta::minutes(1));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = SessionConfig::from_json_str(r#"{ "pageSize": 5 }"#).unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{ "url_debounce_ms": 50 }"#).unwrap();
        assert_eq!(SessionConfig::load(&path).unwrap().url_debounce_ms, 50);
        assert!(matches!(SessionConfig::load(dir.path().join("missing.json")), Err(Error::Io { .. })));
    }
}
