//! Error types for the thermocast-ar crate.

/// Error type for all fallible operations in the thermocast-ar crate.
///
/// Every variant is terminal for the current run: fitting is deterministic,
/// so retrying with the same series cannot succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArError {
    /// Returned when the series is too short to leave a single regressor
    /// row for the requested lag order.
    #[error("insufficient data for order {order}: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations available.
        n: usize,
        /// Lag order that was requested.
        order: usize,
        /// Minimum number of observations the order requires.
        min: usize,
    },

    /// Returned when the order search has no candidate at all
    /// (`round(sqrt(n - 1) / 2) == 0`).
    #[error("series of {n} observations is too short to fit any autoregressive order")]
    DegenerateSeries {
        /// Number of observations provided.
        n: usize,
    },

    /// Returned when the least-squares design matrix is rank deficient.
    #[error("least-squares system is singular: rank {rank} < {cols} columns")]
    SingularSystem {
        /// Numerical rank of the design matrix.
        rank: usize,
        /// Number of columns (coefficients to estimate).
        cols: usize,
    },

    /// Returned when the least-squares system has no rows or no columns.
    #[error("least-squares system is empty ({rows} x {cols})")]
    EmptySystem {
        /// Number of rows in the design matrix.
        rows: usize,
        /// Number of columns in the design matrix.
        cols: usize,
    },

    /// Returned when the block forecast horizon is zero or not smaller than
    /// the series length.
    #[error("forecast horizon {horizon} must be in 1..{n} (series length {n})")]
    InvalidHorizon {
        /// Requested number of forecasts.
        horizon: usize,
        /// Length of the series.
        n: usize,
    },

    /// Returned when the input series contains NaN or infinite values.
    #[error("input series contains non-finite values")]
    NonFiniteData,

    /// Returned when a fit produces non-finite coefficients or a
    /// non-finite information criterion.
    #[error("fit produced non-finite values for order {order}")]
    NonFiniteFit {
        /// Lag order of the offending fit.
        order: usize,
    },
}
