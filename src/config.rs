//! Matching configuration: thresholds, caps, and parallelism.
//!
//! Defaults are the production constants. A JSON file can override any
//! subset of fields; CLI flags override the file.
//!
//! CHANGELOG:
//! - 10/14/2026 - Initial implementation

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::matching::scorer::{HIGH_CONFIDENCE_THRESHOLD, PERFECT_SCORE};

/// Env var naming a config file when `--config` is not given.
pub const CONFIG_ENV_VAR: &str = "GUESTMATCH_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Top candidate at or above this score is auto-selected
    pub auto_select_threshold: u8,
    /// Floor of the narrow band used once a near-certain match exists
    pub tight_floor: u8,
    pub tight_cap: usize,
    /// Floor of the general band shown for human review
    pub display_floor: u8,
    pub display_cap: usize,
    /// Maximum number of perfect-tier guests kept in the output
    pub perfect_cap: usize,
    /// Score guests on the rayon pool
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            auto_select_threshold: HIGH_CONFIDENCE_THRESHOLD,
            tight_floor: 90,
            tight_cap: 3,
            display_floor: 70,
            display_cap: 3,
            perfect_cap: 30,
            parallel: true,
        }
    }
}

impl MatchConfig {
    /// Load a config file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config: explicit path, then `GUESTMATCH_CONFIG`, then defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from));

        match path {
            Some(p) => {
                tracing::debug!(path = %p.display(), "loading match config");
                Self::load(p)
            }
            None => Ok(Self::default()),
        }
    }

    /// Check that thresholds are ordered and in range.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.auto_select_threshold <= PERFECT_SCORE,
            "auto_select_threshold must be at most {}",
            PERFECT_SCORE
        );
        ensure!(
            self.display_floor <= self.tight_floor && self.tight_floor <= PERFECT_SCORE,
            "expected display_floor <= tight_floor <= {}",
            PERFECT_SCORE
        );
        ensure!(
            self.tight_cap > 0 && self.display_cap > 0,
            "candidate caps must be positive"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let c = MatchConfig::default();
        assert_eq!(c.auto_select_threshold, 93);
        assert_eq!(c.tight_floor, 90);
        assert_eq!(c.display_floor, 70);
        assert_eq!(c.display_cap, 3);
        assert_eq!(c.perfect_cap, 30);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"perfect_cap": 5, "parallel": false}}"#).unwrap();

        let c = MatchConfig::load(file.path()).unwrap();
        assert_eq!(c.perfect_cap, 5);
        assert!(!c.parallel);
        assert_eq!(c.auto_select_threshold, 93);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"perfect_kap": 5}}"#).unwrap();
        assert!(MatchConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let c = MatchConfig {
            display_floor: 95,
            ..MatchConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = MatchConfig::load("/nonexistent/guestmatch.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
