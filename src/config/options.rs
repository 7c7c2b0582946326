// src/config/options.rs
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use super::consts::DEFAULT_BASE_URL;
use crate::error::ConfigError;
use crate::tier::TierKind;

/// Run settings, loaded once at startup and passed by reference.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    pub input_file_path: PathBuf,
    pub output_file_path: PathBuf,
    pub database_file_path: PathBuf,
    pub output_file_headers: OutputColumns,
    /// Seconds to sleep after every fetch attempt.
    pub time_delay: f64,
    /// Fetch attempts allowed per run. Zero or negative allows none.
    pub max_requests: i64,
    /// Days before a cached record goes stale.
    pub max_age: i64,
    pub http_headers: BTreeMap<String, String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub tier_calculator: TierKind,
    /// Replaces the built-in exclusion list of the extended calculator.
    #[serde(default)]
    pub tier_exclusions: Option<BTreeMap<String, String>>,
}

fn default_base_url() -> String {
    s!(DEFAULT_BASE_URL)
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.time_delay.is_finite() || self.time_delay < 0.0 {
            return Err(ConfigError::Invalid {
                key: "TIME_DELAY",
                message: format!("expected a non-negative number of seconds, got {}", self.time_delay),
            });
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid { key: "BASE_URL", message: s!("must not be empty") });
        }
        Ok(())
    }

    pub fn time_delay(&self) -> Duration {
        Duration::from_secs_f64(self.time_delay.max(0.0))
    }
}

/// Ordered `column name → include` map from `OUTPUT_FILE_HEADERS`.
/// Keeps the file's key order, which a plain map would lose.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputColumns(Vec<(String, bool)>);

impl OutputColumns {
    /// Enabled column names, in configured order.
    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter(|(_, on)| *on).map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    fn set(&mut self, name: String, on: bool) {
        // Later duplicates win but keep the first position.
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = on,
            None => self.0.push((name, on)),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for OutputColumns {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut cols = OutputColumns::default();
        for (name, on) in iter {
            cols.set(name.into(), on);
        }
        cols
    }
}

impl<'de> Deserialize<'de> for OutputColumns {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ColumnsVisitor;

        impl<'de> Visitor<'de> for ColumnsVisitor {
            type Value = OutputColumns;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of column name to boolean")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut cols = OutputColumns(Vec::with_capacity(map.size_hint().unwrap_or(0)));
                while let Some((name, on)) = map.next_entry::<String, bool>()? {
                    cols.set(name, on);
                }
                Ok(cols)
            }
        }

        deserializer.deserialize_map(ColumnsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "INPUT_FILE_PATH": "data/input.txt",
        "OUTPUT_FILE_PATH": "data/output.csv",
        "DATABASE_FILE_PATH": "data/database.json",
        "OUTPUT_FILE_HEADERS": {
            "tier": true,
            "company_name": true,
            "url": false,
            "overall": true,
            "size": true
        },
        "TIME_DELAY": 1.5,
        "MAX_REQUESTS": 100,
        "MAX_AGE": 30,
        "HTTP_HEADERS": { "User-Agent": "Mozilla/5.0" }
    }"#;

    #[test]
    fn output_headers_keep_file_order() {
        let cfg: Config = serde_json::from_str(SAMPLE).unwrap();
        let enabled: Vec<&str> = cfg.output_file_headers.enabled().collect();
        assert_eq!(enabled, ["tier", "company_name", "overall", "size"]);
        assert_eq!(cfg.output_file_headers.len(), 5);
    }

    #[test]
    fn optional_keys_fall_back_to_defaults() {
        let cfg: Config = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.tier_calculator, TierKind::Simple);
        assert!(cfg.tier_exclusions.is_none());
        assert_eq!(cfg.time_delay(), Duration::from_millis(1500));
        assert_eq!(cfg.http_headers["User-Agent"], "Mozilla/5.0");
    }

    #[test]
    fn missing_required_key_is_rejected() {
        let text = SAMPLE.replace(r#""MAX_AGE": 30,"#, "");
        assert!(serde_json::from_str::<Config>(&text).is_err());
    }

    #[test]
    fn negative_delay_fails_validation() {
        let mut cfg: Config = serde_json::from_str(SAMPLE).unwrap();
        cfg.time_delay = -1.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { key: "TIME_DELAY", .. })));
    }

    #[test]
    fn extended_calculator_and_exclusions_parse() {
        let text = SAMPLE.replace(
            r#""MAX_AGE": 30,"#,
            r#""MAX_AGE": 30, "TIER_CALCULATOR": "extended", "TIER_EXCLUSIONS": { "Acme": "fully onsite" },"#,
        );
        let cfg: Config = serde_json::from_str(&text).unwrap();
        assert_eq!(cfg.tier_calculator, TierKind::Extended);
        assert_eq!(cfg.tier_exclusions.unwrap()["Acme"], "fully onsite");
    }
}
