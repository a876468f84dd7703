//! Block and single-step forecasting.

use tracing::debug;

use crate::config::{FitConfig, RankPolicy};
use crate::error::ArError;
use crate::fit::{self, ArFit};
use crate::lag::{self, LagMatrix};
use crate::lstsq;
use crate::spec::ArSpec;

/// One-step-ahead forecast together with the series it extends.
#[derive(Clone, Debug, PartialEq)]
pub struct NextForecast {
    value: f64,
    extended: Vec<f64>,
    fit: ArFit,
}

impl NextForecast {
    /// Returns the forecast of the next observation.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the history with the forecast appended.
    pub fn extended(&self) -> &[f64] {
        &self.extended
    }

    /// Returns the model the forecast was computed from.
    pub fn fit(&self) -> &ArFit {
        &self.fit
    }
}

/// Produces `horizon` forecasts, each from a model refitted on a shrinking
/// window of the history.
///
/// Step `i` pairs the first `rows - i` rows of the lagged design with the
/// targets from offset `i`, refits, and evaluates the new coefficients on
/// the most recent `order + 1` observations. Every step uses the same lag
/// window, so the result is a set of alternative next-value estimates
/// rather than a forward trajectory.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ArError::NonFiniteData`] | any observation is NaN or infinite |
/// | [`ArError::InvalidHorizon`] | `horizon == 0` or `horizon >= series.len()` |
/// | [`ArError::InsufficientData`] | `order` too large, or a step leaves no rows |
/// | [`ArError::SingularSystem`] | a step's refit is rank deficient |
/// | [`ArError::NonFiniteFit`] | a forecast is not finite |
///
/// # Example
///
/// ```
/// use thermocast_ar::{FitConfig, forecast_block};
///
/// let series = [25.0, 24.0, 23.0, 25.0, 24.0, 23.0, 25.0, 24.0, 23.0, 25.0];
/// let forecasts = forecast_block(&series, 1, 3, &FitConfig::default()).unwrap();
/// assert_eq!(forecasts.len(), 3);
/// ```
pub fn forecast_block(
    series: &[f64],
    order: usize,
    horizon: usize,
    config: &FitConfig,
) -> Result<Vec<f64>, ArError> {
    lag::validate_series(series)?;
    let n = series.len();
    if horizon == 0 || horizon >= n {
        return Err(ArError::InvalidHorizon { horizon, n });
    }

    let lags = LagMatrix::build_lagged(series, order)?;
    let window = lag::latest_window(series, order);

    let mut forecasts = Vec::with_capacity(horizon);
    for step in 0..horizon {
        let (x, y) = lags.shifted(step).ok_or(ArError::InsufficientData {
            n: n - step,
            order,
            min: order + 2,
        })?;
        let refit = lstsq::solve(x, y, config)?;
        let value = fit::dot_finite(&window, refit.coefficients(), order)?;
        debug!(step, rows = x.nrows(), value, "block forecast step");
        forecasts.push(value);
    }
    Ok(forecasts)
}

/// Largest block horizon for a series of length `n` at `order` whose every
/// refit keeps enough rows to be solvable under `config`.
///
/// Step `i` refits on `n - order - 1 - i` rows. [`RankPolicy::Reject`]
/// needs at least `order + 1` of them, giving `n - 2 order - 1`;
/// [`RankPolicy::MinimumNorm`] needs one, giving `n - order - 1`. A
/// horizon within the bound can still fail when the data themselves are
/// collinear.
///
/// ```
/// use thermocast_ar::{FitConfig, max_block_horizon};
///
/// assert_eq!(max_block_horizon(10, 1, &FitConfig::default()), 7);
/// assert_eq!(max_block_horizon(10, 0, &FitConfig::default()), 9);
/// ```
pub fn max_block_horizon(n: usize, order: usize, config: &FitConfig) -> usize {
    let rows = n.saturating_sub(order + 1);
    let min_rows = match config.rank_policy() {
        RankPolicy::Reject => order + 1,
        RankPolicy::MinimumNorm => 1,
    };
    (rows + 1)
        .saturating_sub(min_rows)
        .min(n.saturating_sub(1))
}

/// Forecasts the observation following `series` with a single fit of
/// order `order` on the full history.
///
/// # Errors
///
/// Same as [`ArSpec::fit()`].
///
/// # Example
///
/// ```
/// use thermocast_ar::{FitConfig, forecast_next};
///
/// let series = [25.0, 24.0, 23.0, 25.0, 24.0, 23.0, 25.0, 24.0, 23.0, 25.0];
/// let next = forecast_next(&series, 0, &FitConfig::default()).unwrap();
/// assert!(next.value().is_finite());
/// assert_eq!(next.extended().len(), series.len() + 1);
/// ```
pub fn forecast_next(
    series: &[f64],
    order: usize,
    config: &FitConfig,
) -> Result<NextForecast, ArError> {
    let fit = ArSpec::new(order).fit(series, config)?;
    extend(series, fit)
}

/// Appends the prediction of `fit` to `series`.
pub(crate) fn extend(series: &[f64], fit: ArFit) -> Result<NextForecast, ArError> {
    let value = fit.predict(series)?;
    let mut extended = Vec::with_capacity(series.len() + 1);
    extended.extend_from_slice(series);
    extended.push(value);
    Ok(NextForecast {
        value,
        extended,
        fit,
    })
}
