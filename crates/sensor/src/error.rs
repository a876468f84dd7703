//! Error types for thermocast-sensor.

use std::path::PathBuf;

/// Error type for all fallible operations in the thermocast-sensor crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SensorError {
    /// Returned when the ADC device file cannot be read.
    #[error("cannot read ADC device {}: {reason}", path.display())]
    Device {
        /// Device file that was read.
        path: PathBuf,
        /// Description of the underlying OS error.
        reason: String,
    },

    /// Returned when the device file does not hold an unsigned integer.
    #[error("ADC device {} returned {raw:?}, expected an unsigned integer", path.display())]
    Parse {
        /// Device file that was read.
        path: PathBuf,
        /// Raw contents, trimmed.
        raw: String,
    },

    /// Returned when a raw count exceeds the converter's full scale.
    #[error("raw ADC count {raw} exceeds full scale {max_raw}")]
    OutOfRange {
        /// Count read from the device.
        raw: u32,
        /// Configured full-scale count.
        max_raw: u32,
    },

    /// Returned when a reading is NaN or infinite.
    #[error("ADC reading is not finite: {value}")]
    NonFinite {
        /// Offending reading.
        value: f64,
    },

    /// Returned when a source or calibration is constructed with invalid
    /// parameters.
    #[error("invalid sensor configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}
