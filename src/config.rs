use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::filter::PayloadRange;
use crate::error::ConfigError;

/// Optional overrides file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Everything the dashboard needs to know before it starts.
/// Missing fields in `dashboard.json` fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub title: String,
    /// Dropdown options after "All Sites".
    pub sites: Vec<String>,
    pub payload_slider: SliderConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<f64>,
    /// Initial `[min, max]` handle positions.
    pub initial: [f64; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("spacex_launch_dash.csv"),
            title: "SpaceX Launch Records Dashboard".to_string(),
            sites: ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
                .into_iter()
                .map(String::from)
                .collect(),
            payload_slider: SliderConfig::default(),
        }
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1000.0,
            marks: vec![0.0, 2500.0, 5000.0, 7500.0, 10_000.0],
            initial: [2500.0, 8000.0],
        }
    }
}

impl SliderConfig {
    pub fn initial_range(&self) -> Result<PayloadRange, ConfigError> {
        let [lo, hi] = self.initial;
        Ok(PayloadRange::try_new(lo, hi)?)
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise use the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            log::info!("Using dashboard config from {}", path.display());
            serde_json::from_str(&text)?
        } else {
            DashboardConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.payload_slider;
        if s.step.is_nan() || s.step <= 0.0 {
            return Err(ConfigError::Step(s.step));
        }
        let range = s.initial_range()?;
        if range.min < s.min || range.max > s.max {
            return Err(ConfigError::OutOfDomain {
                min: range.min,
                max: range.max,
                lo: s.min,
                hi: s.max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_dashboard_layout() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.sites.len(), 4);
        assert_eq!(cfg.payload_slider.step, 1000.0);
        let range = cfg.payload_slider.initial_range().unwrap();
        assert_eq!((range.min, range.max), (2500.0, 8000.0));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DashboardConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(cfg, DashboardConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"data_path": "launches.parquet", "payload_slider": {{"initial": [0, 10000]}}}}"#).unwrap();
        let cfg = DashboardConfig::load(f.path()).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("launches.parquet"));
        assert_eq!(cfg.payload_slider.initial, [0.0, 10_000.0]);
        assert_eq!(cfg.payload_slider.max, 10_000.0);
        assert_eq!(cfg.title, DashboardConfig::default().title);
    }

    #[test]
    fn inverted_initial_range_is_rejected() {
        let mut cfg = DashboardConfig::default();
        cfg.payload_slider.initial = [9000.0, 1000.0];
        assert!(matches!(cfg.validate(), Err(ConfigError::InitialRange(_))));
    }

    #[test]
    fn out_of_domain_and_bad_step_are_rejected() {
        let mut cfg = DashboardConfig::default();
        cfg.payload_slider.initial = [0.0, 12_000.0];
        assert!(matches!(cfg.validate(), Err(ConfigError::OutOfDomain { .. })));

        let mut cfg = DashboardConfig::default();
        cfg.payload_slider.step = 0.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Step(_))));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{{not json").unwrap();
        assert!(matches!(DashboardConfig::load(f.path()), Err(ConfigError::Parse(_))));
    }
}
