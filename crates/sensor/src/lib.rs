//! # thermocast-sensor
//!
//! Temperature acquisition: an [`AdcSource`] yields readings normalised to
//! full scale and a [`Calibration`] turns them into degrees Celsius.
//!
//! ```
//! use thermocast_sensor::{Calibration, FixedReading};
//!
//! let celsius = Calibration::default().measure(&FixedReading::new(0.14)).unwrap();
//! assert!((celsius - 25.2).abs() < 1e-9);
//! ```

mod adc;
mod calibration;
mod error;

pub use adc::{AdcSource, FixedReading, SysfsAdc};
pub use calibration::Calibration;
pub use error::SensorError;
