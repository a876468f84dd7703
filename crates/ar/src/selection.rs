//! AIC-based AR order selection.

use tracing::{debug, info};

use crate::config::FitConfig;
use crate::error::ArError;
use crate::lag::{self, LagMatrix};
use crate::lstsq;

/// Outcome of an order search: the winning order and the AIC of every
/// candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderSelection {
    order: usize,
    scores: Vec<f64>,
}

impl OrderSelection {
    /// Returns the selected lag order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the AIC per candidate order; `scores()[i]` belongs to order `i`.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Returns the number of candidates that were scored (`P_max`).
    pub fn max_order(&self) -> usize {
        self.scores.len()
    }
}

/// Upper bound (exclusive) of the order search for a series of length `n`:
/// `round(sqrt(n - 1) / 2)`, rounding half to even.
///
/// ```
/// use thermocast_ar::max_order;
///
/// assert_eq!(max_order(2), 0);
/// assert_eq!(max_order(10), 2);
/// assert_eq!(max_order(26), 2);
/// assert_eq!(max_order(101), 5);
/// ```
pub fn max_order(n: usize) -> usize {
    ((n.saturating_sub(1) as f64).sqrt() / 2.0).round_ties_even() as usize
}

/// Akaike Information Criterion `ln(sigma2) + 2 (order + 1) / n`.
///
/// A perfect fit (`sigma2 == 0`) scores negative infinity.
pub fn aic(sigma2: f64, order: usize, n: usize) -> f64 {
    sigma2.ln() + 2.0 * (order + 1) as f64 / n as f64
}

/// Selects the lag order minimising AIC over candidates `0..max_order(n)`.
///
/// Each candidate `i` is built with [`LagMatrix::build`] and fitted on its
/// regressor block (design columns bounded by the row count). Ties go to
/// the lowest order.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ArError::NonFiniteData`] | any observation is NaN or infinite |
/// | [`ArError::DegenerateSeries`] | `max_order(n) == 0` |
/// | [`ArError::InsufficientData`] | a candidate is left with no regressor column |
/// | [`ArError::SingularSystem`] | a candidate fit is rank deficient |
/// | [`ArError::NonFiniteFit`] | a candidate score is NaN |
///
/// # Example
///
/// ```
/// use thermocast_ar::{FitConfig, select_order};
///
/// let series = [25.0, 24.0, 23.0, 25.0, 24.0, 23.0, 25.0, 24.0, 23.0, 25.0];
/// let selection = select_order(&series, &FitConfig::default()).unwrap();
/// assert_eq!(selection.max_order(), 2);
/// assert!(selection.order() < 2);
/// ```
pub fn select_order(series: &[f64], config: &FitConfig) -> Result<OrderSelection, ArError> {
    lag::validate_series(series)?;
    let n = series.len();
    let p_max = max_order(n);
    if p_max == 0 {
        return Err(ArError::DegenerateSeries { n });
    }

    let mut scores = Vec::with_capacity(p_max);
    for order in 0..p_max {
        let lags = LagMatrix::build(series, order)?;
        let x = lags.candidate_regressors();
        if x.ncols() == 0 {
            return Err(ArError::InsufficientData {
                n,
                order,
                min: order + 4,
            });
        }
        let fit = lstsq::solve(x, lags.target(), config).map_err(|e| relabel(e, order))?;
        let score = aic(fit.variance(), order, n);
        if score.is_nan() {
            return Err(ArError::NonFiniteFit { order });
        }
        debug!(order, sigma2 = fit.variance(), aic = score, "scored candidate order");
        scores.push(score);
    }

    let order = first_argmin(&scores);
    // Downstream fits use the lagged layout; make sure it admits this order.
    LagMatrix::build_lagged(series, order)?;
    info!(order, p_max, aic = scores[order], "selected AR order");

    Ok(OrderSelection { order, scores })
}

/// The regressor block may be narrower than `order + 1` columns, so the
/// solver's own order label is replaced by the candidate's.
fn relabel(err: ArError, order: usize) -> ArError {
    match err {
        ArError::NonFiniteFit { .. } => ArError::NonFiniteFit { order },
        other => other,
    }
}

/// Index of the first minimum; NaN-free input assumed.
fn first_argmin(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v < values[best] {
            best = i;
        }
    }
    best
}
