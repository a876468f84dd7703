//! Linear least squares via singular value decomposition.
//!
//! `X phi = y` is solved directly from the SVD of `X` rather than through
//! the normal equations `(X'X) phi = X'y`, which square the condition
//! number of the design matrix. The design is copied column by column into
//! a `nalgebra::DMatrix` for the decomposition; results come back as plain
//! vectors. Rank-deficient systems under the minimum-norm policy are
//! resolved from the eigendecomposition of `X'X` instead.

use nalgebra::{DMatrix, DVector, Dyn, SVD, SymmetricEigen};
use ndarray::{Array1, ArrayView1, ArrayView2};
use tracing::trace;

use crate::config::{FitConfig, RankPolicy};
use crate::error::ArError;

/// Solution of a least-squares problem `min ||X phi - y||`.
#[derive(Clone, Debug, PartialEq)]
pub struct LeastSquares {
    coefficients: Vec<f64>,
    fitted: Vec<f64>,
    residuals: Vec<f64>,
    variance: f64,
    rank: usize,
}

impl LeastSquares {
    /// Returns the estimated coefficients `phi`, one per design column.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Returns the fitted values `X phi`.
    pub fn fitted(&self) -> &[f64] {
        &self.fitted
    }

    /// Returns the residuals `X phi - y`.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Returns the residual variance `e'e / n`.
    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Returns the numerical rank of the design matrix.
    pub fn rank(&self) -> usize {
        self.rank
    }
}

/// Solves `X phi = y` in the least-squares sense.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ArError::EmptySystem`] | `x` has no rows or no columns |
/// | [`ArError::SingularSystem`] | rank of `x` < columns under [`RankPolicy::Reject`] |
/// | [`ArError::NonFiniteFit`] | the solution contains NaN or infinity |
///
/// # Panics
///
/// Panics if `y.len() != x.nrows()`.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use thermocast_ar::{FitConfig, solve};
///
/// // y = 2 + 3x on x = [0, 1, 2]
/// let x = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]];
/// let y = array![2.0, 5.0, 8.0];
/// let fit = solve(x.view(), y.view(), &FitConfig::default()).unwrap();
/// assert!((fit.coefficients()[0] - 2.0).abs() < 1e-10);
/// assert!((fit.coefficients()[1] - 3.0).abs() < 1e-10);
/// ```
pub fn solve(
    x: ArrayView2<'_, f64>,
    y: ArrayView1<'_, f64>,
    config: &FitConfig,
) -> Result<LeastSquares, ArError> {
    let (rows, cols) = x.dim();
    assert_eq!(y.len(), rows, "solve: target length must match design rows");
    if rows == 0 || cols == 0 {
        return Err(ArError::EmptySystem { rows, cols });
    }

    let a = DMatrix::from_fn(rows, cols, |r, c| x[[r, c]]);
    let b = DVector::from_iterator(rows, y.iter().copied());

    let svd = a.clone().svd(true, true);
    let eps = config.threshold(rows, cols, svd.singular_values.max());
    let rank = svd.rank(eps);
    trace!(rows, cols, rank, eps, "decomposed design matrix");

    let (phi, rank) = match config.rank_policy() {
        RankPolicy::Reject if rank < cols => {
            return Err(ArError::SingularSystem { rank, cols });
        }
        RankPolicy::MinimumNorm => {
            let (phi, gram_rank) = minimum_norm(&a, &b, config.threshold(rows, cols, 1.0));
            if rank < cols || gram_rank < cols {
                (phi, gram_rank)
            } else {
                (svd_solve(&svd, &b, eps, rank, cols)?, rank)
            }
        }
        RankPolicy::Reject => (svd_solve(&svd, &b, eps, rank, cols)?, rank),
    };
    if phi.iter().any(|v| !v.is_finite()) {
        return Err(ArError::NonFiniteFit { order: cols - 1 });
    }

    let coefficients: Array1<f64> = phi.iter().copied().collect();
    let fitted = x.dot(&coefficients);
    let residuals = &fitted - &y;
    let variance = residuals.dot(&residuals) / rows as f64;

    Ok(LeastSquares {
        coefficients: coefficients.to_vec(),
        fitted: fitted.to_vec(),
        residuals: residuals.to_vec(),
        variance,
        rank,
    })
}

fn svd_solve(
    svd: &SVD<f64, Dyn, Dyn>,
    b: &DVector<f64>,
    eps: f64,
    rank: usize,
    cols: usize,
) -> Result<DVector<f64>, ArError> {
    svd.solve(b, eps)
        .map_err(|_| ArError::SingularSystem { rank, cols })
}

/// Minimum-norm solution of a rank-deficient system through the
/// eigendecomposition of `X'X`.
///
/// The iterative SVD can misplace singular values when several of them
/// vanish, so the rank-deficient path resolves the null space from the
/// Gram matrix instead. Eigenvalues at or below
/// `lambda_max * max(rcond^2, sqrt(eps))` are treated as zero; the Gram
/// matrix carries no information below that level. Returns the
/// coefficients and the number of retained directions.
fn minimum_norm(a: &DMatrix<f64>, b: &DVector<f64>, rcond: f64) -> (DVector<f64>, usize) {
    let gram = a.transpose() * a;
    let rhs = a.transpose() * b;
    let eigen = SymmetricEigen::new(gram);
    let lambda_max = eigen.eigenvalues.max();
    let cutoff = lambda_max * (rcond * rcond).max(f64::EPSILON.sqrt());

    let mut phi = DVector::zeros(a.ncols());
    let mut rank = 0;
    for (i, &lambda) in eigen.eigenvalues.iter().enumerate() {
        if lambda > cutoff {
            let v = eigen.eigenvectors.column(i);
            phi.axpy(v.dot(&rhs) / lambda, &v, 1.0);
            rank += 1;
        }
    }
    (phi, rank)
}
