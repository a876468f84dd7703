//! The pair of series files kept between invocations.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::IoError;
use crate::reader::read_series;
use crate::writer::write_pair;

/// Series written by [`SeriesStore::reset`].
pub const DEFAULT_SERIES: [f64; 10] = [25.0, 24.0, 23.0, 25.0, 24.0, 23.0, 25.0, 24.0, 23.0, 25.0];

/// Measured history and forecast log after [`SeriesStore::record`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    data: Vec<f64>,
    forecasts: Vec<f64>,
}

impl Recorded {
    /// Returns the measured series including the new observation.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Returns the forecast log including the new forecast.
    pub fn forecasts(&self) -> &[f64] {
        &self.forecasts
    }

    /// Last `window` (measured, forecast) pairs, aligned from the end of
    /// both series, oldest first. Shorter when either series is shorter.
    pub fn comparison(&self, window: usize) -> Vec<(f64, f64)> {
        let len = window.min(self.data.len()).min(self.forecasts.len());
        let data = &self.data[self.data.len() - len..];
        let forecasts = &self.forecasts[self.forecasts.len() - len..];
        data.iter().copied().zip(forecasts.iter().copied()).collect()
    }
}

/// Locations of the measured series and the forecast log.
///
/// # Example
///
/// ```no_run
/// use thermocast_io::SeriesStore;
///
/// let store = SeriesStore::new("data_temp.csv", "fcast_temp.csv");
/// let history = store.load_data().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesStore {
    data: PathBuf,
    forecasts: PathBuf,
}

impl SeriesStore {
    /// Creates a store over the two files. Nothing is read or created.
    pub fn new(data: impl Into<PathBuf>, forecasts: impl Into<PathBuf>) -> Self {
        Self {
            data: data.into(),
            forecasts: forecasts.into(),
        }
    }

    /// Returns the measured series path.
    pub fn data_path(&self) -> &Path {
        &self.data
    }

    /// Returns the forecast log path.
    pub fn forecasts_path(&self) -> &Path {
        &self.forecasts
    }

    /// Reads the measured series.
    pub fn load_data(&self) -> Result<Vec<f64>, IoError> {
        read_series(&self.data)
    }

    /// Reads the forecast log.
    pub fn load_forecasts(&self) -> Result<Vec<f64>, IoError> {
        read_series(&self.forecasts)
    }

    /// Appends `measured` to the data file and `forecast` to the forecast
    /// log.
    ///
    /// Both files are read, then both are staged, before either is
    /// replaced, so a failure leaves the pair consistent.
    pub fn record(&self, measured: f64, forecast: f64) -> Result<Recorded, IoError> {
        let mut data = self.load_data()?;
        let mut forecasts = self.load_forecasts()?;
        data.push(measured);
        forecasts.push(forecast);

        write_pair((&self.data, &data), (&self.forecasts, &forecasts))?;
        info!(
            measured,
            forecast,
            n_data = data.len(),
            n_forecasts = forecasts.len(),
            "recorded observation"
        );
        Ok(Recorded { data, forecasts })
    }

    /// Overwrites both files with [`DEFAULT_SERIES`].
    pub fn reset(&self) -> Result<(), IoError> {
        write_pair((&self.data, &DEFAULT_SERIES), (&self.forecasts, &DEFAULT_SERIES))?;
        info!(
            data = %self.data.display(),
            forecasts = %self.forecasts.display(),
            "restored default series"
        );
        Ok(())
    }
}
