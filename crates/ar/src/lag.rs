//! Lagged target/design matrix construction.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, s};

use crate::error::ArError;

/// A target vector paired row-by-row with a matrix of lagged regressors.
///
/// Two layouts are available:
///
/// | Constructor | Target row `r` | Design row `r` |
/// |-------------|----------------|----------------|
/// | [`LagMatrix::build`] | `y[r]` | `y[r+1], ..., y[r+p+1]` |
/// | [`LagMatrix::build_lagged`] | `y[r+p+1]` | `y[r+p], ..., y[r]` |
///
/// The sliding-window layout is the one scored during order selection;
/// the lagged layout (most recent lag first) drives the final fit and
/// both forecasting modes. Both have `n - p - 1` rows and `p + 1`
/// columns for a series of length `n` and order `p`.
#[derive(Clone, Debug, PartialEq)]
pub struct LagMatrix {
    order: usize,
    target: Array1<f64>,
    design: Array2<f64>,
}

impl LagMatrix {
    /// Builds the sliding-window layout for `order`.
    ///
    /// A working block of `order + 2` shifted windows is formed, where
    /// window `j` is `series[j .. n - order - 1 + j]`. Window 0 becomes the
    /// target and windows `1..=order+1` become the design columns.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArError::InsufficientData`] | `series.len() < order + 2` |
    ///
    /// # Example
    ///
    /// ```
    /// use thermocast_ar::LagMatrix;
    ///
    /// let lags = LagMatrix::build(&[1.0, 2.0, 3.0, 4.0], 1).unwrap();
    /// assert_eq!(lags.target().to_vec(), vec![1.0, 2.0]);
    /// assert_eq!(lags.design().row(0).to_vec(), vec![2.0, 3.0]);
    /// ```
    pub fn build(series: &[f64], order: usize) -> Result<Self, ArError> {
        let rows = usable_rows(series, order)?;
        let target = Array1::from_iter(series[..rows].iter().copied());
        let design = Array2::from_shape_fn((rows, order + 1), |(r, c)| series[r + c + 1]);
        Ok(Self {
            order,
            target,
            design,
        })
    }

    /// Builds the forecasting layout for `order`: target `series[order+1..]`
    /// and `design[r][j] = series[order - j + r]`, so column `j` holds lag
    /// `j + 1` of the matching target.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArError::InsufficientData`] | `series.len() < order + 2` |
    pub fn build_lagged(series: &[f64], order: usize) -> Result<Self, ArError> {
        let rows = usable_rows(series, order)?;
        let target = Array1::from_iter(series[order + 1..].iter().copied());
        let design = Array2::from_shape_fn((rows, order + 1), |(r, c)| series[order - c + r]);
        Ok(Self {
            order,
            target,
            design,
        })
    }

    /// Returns the lag order `p` this matrix was built for.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the number of aligned rows.
    pub fn n_rows(&self) -> usize {
        self.target.len()
    }

    /// Returns the target vector.
    pub fn target(&self) -> ArrayView1<'_, f64> {
        self.target.view()
    }

    /// Returns the full `(n_rows, order + 1)` design matrix.
    pub fn design(&self) -> ArrayView2<'_, f64> {
        self.design.view()
    }

    /// Regressor block scored during order selection.
    ///
    /// Keeps design columns `0..min(order + 1, n_rows - 2)`: the column
    /// slice is bounded by the row count, so short windows lose their most
    /// distant lags. May be empty.
    pub(crate) fn candidate_regressors(&self) -> ArrayView2<'_, f64> {
        let keep = (self.order + 1).min(self.n_rows().saturating_sub(2));
        self.design.slice(s![.., ..keep])
    }

    /// Design rows `0..n_rows - offset` paired with targets `offset..`.
    ///
    /// Used by block forecasting to refit on a shrinking window. Returns
    /// `None` when the offset leaves no rows.
    pub(crate) fn shifted(&self, offset: usize) -> Option<(ArrayView2<'_, f64>, ArrayView1<'_, f64>)> {
        let rows = self.n_rows().checked_sub(offset).filter(|&r| r > 0)?;
        Some((
            self.design.slice(s![..rows, ..]),
            self.target.slice(s![offset..]),
        ))
    }
}

/// Rejects series containing NaN or infinite observations.
pub(crate) fn validate_series(series: &[f64]) -> Result<(), ArError> {
    if series.iter().any(|x| !x.is_finite()) {
        return Err(ArError::NonFiniteData);
    }
    Ok(())
}

/// The `order + 1` most recent observations, newest first
/// (`[y(n-1), ..., y(n-order-1)]`), aligned with the columns of
/// [`LagMatrix::build_lagged`].
pub(crate) fn latest_window(series: &[f64], order: usize) -> Vec<f64> {
    series.iter().rev().take(order + 1).copied().collect()
}

fn usable_rows(series: &[f64], order: usize) -> Result<usize, ArError> {
    let min = order + 2;
    if series.len() < min {
        return Err(ArError::InsufficientData {
            n: series.len(),
            order,
            min,
        });
    }
    Ok(series.len() - order - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn build_sliding_window_alignment() {
        let series = ramp(6);
        let lags = LagMatrix::build(&series, 2).unwrap();
        assert_eq!(lags.order(), 2);
        assert_eq!(lags.n_rows(), 3);
        assert_eq!(lags.design().shape(), &[3, 3]);
        for r in 0..3 {
            assert_eq!(lags.target()[r], series[r]);
            for j in 0..3 {
                assert_eq!(lags.design()[[r, j]], series[r + j + 1]);
            }
        }
    }

    #[test]
    fn build_lagged_alignment() {
        let series = ramp(7);
        for p in 0..5 {
            let lags = LagMatrix::build_lagged(&series, p).unwrap();
            assert_eq!(lags.n_rows(), series.len() - p - 1);
            assert_eq!(lags.design().ncols(), p + 1);
            for r in 0..lags.n_rows() {
                assert_eq!(lags.target()[r], series[r + p + 1]);
                for j in 0..=p {
                    assert_eq!(lags.design()[[r, j]], series[p - j + r]);
                }
            }
        }
    }

    #[test]
    fn target_and_design_rows_match() {
        let series = [25.0, 24.0, 23.0, 25.0, 24.0, 23.0, 25.0, 24.0, 23.0, 25.0];
        for p in 0..=8 {
            let a = LagMatrix::build(&series, p).unwrap();
            let b = LagMatrix::build_lagged(&series, p).unwrap();
            assert_eq!(a.target().len(), a.design().nrows());
            assert_eq!(b.target().len(), b.design().nrows());
            assert_eq!(a.n_rows(), b.n_rows());
        }
    }

    #[test]
    fn single_row_is_allowed() {
        let lags = LagMatrix::build(&[1.0, 2.0, 3.0], 1).unwrap();
        assert_eq!(lags.n_rows(), 1);
        assert_eq!(lags.design().row(0).to_vec(), vec![2.0, 3.0]);
    }

    #[test]
    fn insufficient_data_rejected() {
        let err = LagMatrix::build(&[1.0, 2.0], 1).unwrap_err();
        assert_eq!(
            err,
            ArError::InsufficientData {
                n: 2,
                order: 1,
                min: 3
            }
        );
        assert!(matches!(
            LagMatrix::build_lagged(&[], 0),
            Err(ArError::InsufficientData { n: 0, .. })
        ));
    }

    #[test]
    fn candidate_regressors_bounded_by_rows() {
        // 10 observations, order 1: 8 rows, both columns kept.
        let lags = LagMatrix::build(&ramp(10), 1).unwrap();
        assert_eq!(lags.candidate_regressors().ncols(), 2);

        // 5 observations, order 1: 3 rows, slice stops at column 1.
        let lags = LagMatrix::build(&ramp(5), 1).unwrap();
        assert_eq!(lags.candidate_regressors().ncols(), 1);

        // 3 observations, order 0: 2 rows, nothing left.
        let lags = LagMatrix::build(&ramp(3), 0).unwrap();
        assert_eq!(lags.candidate_regressors().ncols(), 0);
    }

    #[test]
    fn shifted_pairs_design_head_with_target_tail() {
        let series = ramp(6);
        let lags = LagMatrix::build_lagged(&series, 1).unwrap();
        let (x, y) = lags.shifted(2).unwrap();
        assert_eq!(x.nrows(), 2);
        assert_eq!(y.len(), 2);
        assert_eq!(x.row(0).to_vec(), vec![1.0, 0.0]);
        assert_eq!(y.to_vec(), vec![4.0, 5.0]);
        assert!(lags.shifted(4).is_none());
    }

    #[test]
    fn latest_window_most_recent_first() {
        let window = latest_window(&[1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(window, vec![4.0, 3.0, 2.0]);
    }

    #[test]
    fn validate_rejects_nan() {
        assert_eq!(validate_series(&[1.0, f64::NAN]), Err(ArError::NonFiniteData));
        assert_eq!(
            validate_series(&[1.0, f64::NEG_INFINITY]),
            Err(ArError::NonFiniteData)
        );
        assert!(validate_series(&[1.0, 2.0]).is_ok());
    }
}
