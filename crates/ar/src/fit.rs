//! Fitted AR model results.

use crate::error::ArError;
use crate::lag;
use crate::lstsq::LeastSquares;
use crate::spec::ArSpec;

/// An AR model fitted by [`ArSpec::fit()`].
///
/// Holds the least-squares solution on the lagged design: coefficients
/// (`phi`, most recent lag first), fitted values, residuals and the
/// residual variance (`sigma2`).
#[derive(Clone, Debug, PartialEq)]
pub struct ArFit {
    spec: ArSpec,
    solution: LeastSquares,
    n_obs: usize,
}

impl ArFit {
    pub(crate) fn new(spec: ArSpec, solution: LeastSquares, n_obs: usize) -> Self {
        Self {
            spec,
            solution,
            n_obs,
        }
    }

    /// Returns the [`ArSpec`] that produced this fit.
    pub fn spec(&self) -> ArSpec {
        self.spec
    }

    /// Returns the lag order `p`.
    pub fn order(&self) -> usize {
        self.spec.order()
    }

    /// Returns the lag coefficients `phi`; `phi[j]` weighs lag `j + 1`.
    pub fn coefficients(&self) -> &[f64] {
        self.solution.coefficients()
    }

    /// Returns the in-sample fitted values.
    pub fn fitted(&self) -> &[f64] {
        self.solution.fitted()
    }

    /// Returns the residuals (fitted minus observed).
    pub fn residuals(&self) -> &[f64] {
        self.solution.residuals()
    }

    /// Returns the residual variance `e'e / n`.
    pub fn sigma2(&self) -> f64 {
        self.solution.variance()
    }

    /// Returns the length of the series the model was fitted to.
    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    /// Akaike Information Criterion of this fit,
    /// `ln(sigma2) + 2 (p + 1) / n`.
    pub fn aic(&self) -> f64 {
        crate::selection::aic(self.sigma2(), self.order(), self.n_obs)
    }

    /// Predicts the value following `series` from its `p + 1` most recent
    /// observations.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArError::InsufficientData`] | `series.len() < p + 1` |
    /// | [`ArError::NonFiniteFit`] | the prediction is not finite |
    pub fn predict(&self, series: &[f64]) -> Result<f64, ArError> {
        let order = self.order();
        if series.len() < order + 1 {
            return Err(ArError::InsufficientData {
                n: series.len(),
                order,
                min: order + 1,
            });
        }
        let window = lag::latest_window(series, order);
        dot_finite(&window, self.coefficients(), order)
    }
}

/// Dot product of a lag window with coefficients, rejecting non-finite
/// results.
pub(crate) fn dot_finite(window: &[f64], coefficients: &[f64], order: usize) -> Result<f64, ArError> {
    let value: f64 = window.iter().zip(coefficients).map(|(y, phi)| y * phi).sum();
    if !value.is_finite() {
        return Err(ArError::NonFiniteFit { order });
    }
    Ok(value)
}
