//! AR model specification (unfitted).

use crate::config::FitConfig;
use crate::error::ArError;
use crate::fit::ArFit;
use crate::lag::{self, LagMatrix};
use crate::lstsq;

/// An unfitted AR model of order `p` (`p + 1` lag coefficients).
///
/// Create a spec with [`ArSpec::new()`], then call [`ArSpec::fit()`] to
/// obtain an [`ArFit`].
///
/// ```mermaid
/// graph LR
///     A["ArSpec::new(p)"] -->|".fit(&series, &config)?"| B["ArFit"]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArSpec {
    order: usize,
}

impl ArSpec {
    /// Creates a new specification with lag order `order`.
    ///
    /// # Example
    ///
    /// ```
    /// use thermocast_ar::ArSpec;
    ///
    /// let spec = ArSpec::new(2);
    /// assert_eq!(spec.order(), 2);
    /// assert_eq!(spec.n_coefficients(), 3);
    /// ```
    pub fn new(order: usize) -> Self {
        Self { order }
    }

    /// Returns the lag order `p`.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the number of estimated coefficients, `p + 1`.
    pub fn n_coefficients(&self) -> usize {
        self.order + 1
    }

    /// Fits this specification to the full history by least squares on
    /// the lagged design ([`LagMatrix::build_lagged`]).
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArError::NonFiniteData`] | any observation is NaN or infinite |
    /// | [`ArError::InsufficientData`] | `series.len() < p + 2` |
    /// | [`ArError::SingularSystem`] | lag columns are linearly dependent |
    /// | [`ArError::NonFiniteFit`] | the solution is not finite |
    pub fn fit(&self, series: &[f64], config: &FitConfig) -> Result<ArFit, ArError> {
        lag::validate_series(series)?;
        let lags = LagMatrix::build_lagged(series, self.order)?;
        let solution = lstsq::solve(lags.design(), lags.target(), config)?;
        Ok(ArFit::new(*self, solution, series.len()))
    }
}
