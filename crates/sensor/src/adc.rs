//! Sources of normalised ADC readings.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::SensorError;

/// A converter channel that yields one normalised reading per call.
///
/// Readings are fractions of full scale; a healthy channel stays within
/// `[0, 1]`.
pub trait AdcSource: Send + Sync {
    /// Takes one reading.
    fn read(&self) -> Result<f64, SensorError>;

    /// Name used in log events.
    fn name(&self) -> &str;
}

/// A channel exposed as a sysfs-style file holding the raw integer count,
/// as Linux IIO drivers do (`in_voltageN_raw`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysfsAdc {
    path: PathBuf,
    max_raw: u32,
}

impl SysfsAdc {
    /// Creates a source reading `path`, with `max_raw` as the full-scale
    /// count (4095 for a 12-bit converter).
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::InvalidConfig`] when `max_raw == 0`.
    pub fn new(path: impl Into<PathBuf>, max_raw: u32) -> Result<Self, SensorError> {
        if max_raw == 0 {
            return Err(SensorError::InvalidConfig {
                reason: "max_raw must be positive".to_string(),
            });
        }
        Ok(Self {
            path: path.into(),
            max_raw,
        })
    }

    /// Returns the device file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the full-scale count.
    pub fn max_raw(&self) -> u32 {
        self.max_raw
    }
}

impl AdcSource for SysfsAdc {
    fn read(&self) -> Result<f64, SensorError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| SensorError::Device {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        let trimmed = text.trim();
        let raw: u32 = trimmed.parse().map_err(|_| SensorError::Parse {
            path: self.path.clone(),
            raw: trimmed.to_string(),
        })?;
        if raw > self.max_raw {
            return Err(SensorError::OutOfRange {
                raw,
                max_raw: self.max_raw,
            });
        }
        let reading = f64::from(raw) / f64::from(self.max_raw);
        debug!(device = %self.path.display(), raw, reading, "read ADC");
        Ok(reading)
    }

    fn name(&self) -> &str {
        "sysfs"
    }
}

/// A reading supplied up front, e.g. from the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedReading {
    value: f64,
}

impl FixedReading {
    /// Wraps `value`.
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl AdcSource for FixedReading {
    fn read(&self) -> Result<f64, SensorError> {
        if !self.value.is_finite() {
            return Err(SensorError::NonFinite { value: self.value });
        }
        if !(0.0..=1.0).contains(&self.value) {
            warn!(reading = self.value, "fixed reading outside [0, 1]");
        }
        Ok(self.value)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn device_with(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in_voltage0_raw");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn sysfs_normalises_count() {
        let (_dir, path) = device_with("2048\n");
        let adc = SysfsAdc::new(&path, 4096).unwrap();
        assert_abs_diff_eq!(adc.read().unwrap(), 0.5, epsilon = 1e-15);
        assert_eq!(adc.name(), "sysfs");
    }

    #[test]
    fn sysfs_full_scale() {
        let (_dir, path) = device_with("4095");
        let adc = SysfsAdc::new(&path, 4095).unwrap();
        assert_eq!(adc.read().unwrap(), 1.0);
    }

    #[test]
    fn sysfs_rejects_over_range() {
        let (_dir, path) = device_with("5000\n");
        let adc = SysfsAdc::new(&path, 4095).unwrap();
        assert_eq!(
            adc.read(),
            Err(SensorError::OutOfRange {
                raw: 5000,
                max_raw: 4095
            })
        );
    }

    #[test]
    fn sysfs_rejects_garbage() {
        let (_dir, path) = device_with("-12\n");
        let adc = SysfsAdc::new(&path, 4095).unwrap();
        assert!(matches!(adc.read(), Err(SensorError::Parse { raw, .. }) if raw == "-12"));
    }

    #[test]
    fn sysfs_missing_device() {
        let dir = tempfile::tempdir().unwrap();
        let adc = SysfsAdc::new(dir.path().join("absent"), 4095).unwrap();
        assert!(matches!(adc.read(), Err(SensorError::Device { .. })));
    }

    #[test]
    fn sysfs_zero_full_scale_rejected() {
        assert!(matches!(
            SysfsAdc::new("/dev/null", 0),
            Err(SensorError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn fixed_reading() {
        assert_eq!(FixedReading::new(0.14).read().unwrap(), 0.14);
        assert_eq!(FixedReading::new(1.5).read().unwrap(), 1.5);
        assert!(matches!(
            FixedReading::new(f64::NAN).read(),
            Err(SensorError::NonFinite { .. })
        ));
    }
}
