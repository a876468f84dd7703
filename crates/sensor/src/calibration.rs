//! Conversion from a normalised reading to degrees Celsius.

use tracing::warn;

use crate::adc::AdcSource;
use crate::error::SensorError;

/// Linear sensor calibration `temperature = reading * scale`.
///
/// The default scale of 180 matches an LM35 (10 mV/°C) on a 1.8 V
/// full-scale converter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    scale: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self { scale: 180.0 }
    }
}

impl Calibration {
    /// Sets the degrees per unit of normalised reading.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Returns the degrees per unit of normalised reading.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Checks that the scale is finite and positive.
    pub fn validate(&self) -> Result<(), SensorError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(SensorError::InvalidConfig {
                reason: format!("scale must be finite and positive, got {}", self.scale),
            });
        }
        Ok(())
    }

    /// Converts a normalised reading to °C.
    pub fn temperature(&self, reading: f64) -> f64 {
        self.scale * reading
    }

    /// Reads `source` once and converts the result.
    ///
    /// A reading of exactly zero is logged as suspicious: it usually means
    /// a disconnected sensor.
    pub fn measure(&self, source: &dyn AdcSource) -> Result<f64, SensorError> {
        self.validate()?;
        let reading = source.read()?;
        if reading == 0.0 {
            warn!(source = source.name(), "ADC reading is zero");
        }
        Ok(self.temperature(reading))
    }
}
