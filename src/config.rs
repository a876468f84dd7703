use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG: &str = "thermocast.toml";

/// Top-level thermocast configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThermocastConfig {
    /// Series file settings.
    #[serde(default)]
    pub io: IoToml,

    /// Least-squares settings.
    #[serde(default)]
    pub fit: FitToml,

    /// Temperature sensor settings.
    #[serde(default)]
    pub sensor: SensorToml,
}

impl ThermocastConfig {
    /// Loads `path`, or [`DEFAULT_CONFIG`] when `path` is `None`.
    ///
    /// A missing default file yields all defaults; a missing explicit file
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG), false),
        };
        if !explicit && !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_data")]
    pub data: PathBuf,
    #[serde(default = "default_forecasts")]
    pub forecasts: PathBuf,
    #[serde(default = "default_compare_window")]
    pub compare_window: usize,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            data: default_data(),
            forecasts: default_forecasts(),
            compare_window: default_compare_window(),
        }
    }
}

fn default_data() -> PathBuf {
    PathBuf::from("data_temp.csv")
}
fn default_forecasts() -> PathBuf {
    PathBuf::from("fcast_temp.csv")
}
fn default_compare_window() -> usize {
    10
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FitToml {
    #[serde(default)]
    pub rcond: Option<f64>,
    #[serde(default = "default_rank_policy")]
    pub rank_policy: String,
}

impl Default for FitToml {
    fn default() -> Self {
        Self {
            rcond: None,
            rank_policy: default_rank_policy(),
        }
    }
}

fn default_rank_policy() -> String {
    "reject".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorToml {
    #[serde(default = "default_device")]
    pub device: PathBuf,
    #[serde(default = "default_max_raw")]
    pub max_raw: u32,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl Default for SensorToml {
    fn default() -> Self {
        Self {
            device: default_device(),
            max_raw: default_max_raw(),
            scale: default_scale(),
        }
    }
}

fn default_device() -> PathBuf {
    PathBuf::from("/sys/bus/iio/devices/iio:device0/in_voltage0_raw")
}
fn default_max_raw() -> u32 {
    4095
}
fn default_scale() -> f64 {
    180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config: ThermocastConfig = toml::from_str("").unwrap();
        assert_eq!(config.io.data, PathBuf::from("data_temp.csv"));
        assert_eq!(config.io.forecasts, PathBuf::from("fcast_temp.csv"));
        assert_eq!(config.io.compare_window, 10);
        assert_eq!(config.fit.rcond, None);
        assert_eq!(config.fit.rank_policy, "reject");
        assert_eq!(config.sensor.max_raw, 4095);
        assert_eq!(config.sensor.scale, 180.0);
    }

    #[test]
    fn partial_sections() {
        let config: ThermocastConfig = toml::from_str(
            r#"
            [io]
            compare_window = 5

            [fit]
            rcond = 1e-10
            rank_policy = "minimum-norm"
            "#,
        )
        .unwrap();
        assert_eq!(config.io.compare_window, 5);
        assert_eq!(config.io.data, PathBuf::from("data_temp.csv"));
        assert_eq!(config.fit.rcond, Some(1e-10));
        assert_eq!(config.fit.rank_policy, "minimum-norm");
        assert_eq!(config.sensor.scale, 180.0);
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(toml::from_str::<ThermocastConfig>("[io]\nhorizon = 3\n").is_err());
        assert!(toml::from_str::<ThermocastConfig>("[plot]\n").is_err());
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("absent.toml");
        assert!(ThermocastConfig::load(Some(&explicit)).is_err());
    }

    #[test]
    fn explicit_file_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thermocast.toml");
        std::fs::write(&path, "[sensor]\nscale = 330.0\n").unwrap();
        let config = ThermocastConfig::load(Some(&path)).unwrap();
        assert_eq!(config.sensor.scale, 330.0);
    }
}
