//! Least-squares fitting configuration.

/// How the solver treats a rank-deficient design matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankPolicy {
    /// Fail with [`ArError::SingularSystem`](crate::ArError::SingularSystem).
    #[default]
    Reject,
    /// Return the minimum-norm solution, discarding singular directions
    /// below the cutoff. Directions weaker than `eps^(1/4)` of the
    /// strongest one are also dropped, since they are resolved through
    /// `X'X`.
    MinimumNorm,
}

/// Configuration shared by every least-squares fit in a run.
///
/// # Example
///
/// ```
/// use thermocast_ar::{FitConfig, RankPolicy};
///
/// let config = FitConfig::default()
///     .with_rcond(1e-10)
///     .with_rank_policy(RankPolicy::MinimumNorm);
///
/// assert_eq!(config.rcond(), Some(1e-10));
/// assert_eq!(config.rank_policy(), RankPolicy::MinimumNorm);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitConfig {
    /// Relative singular-value cutoff; `None` means `eps * max(rows, cols)`.
    rcond: Option<f64>,
    rank_policy: RankPolicy,
}

impl FitConfig {
    /// Sets the relative singular-value cutoff used to count the rank.
    pub fn with_rcond(mut self, rcond: f64) -> Self {
        self.rcond = Some(rcond);
        self
    }

    /// Sets the rank-deficiency policy.
    pub fn with_rank_policy(mut self, policy: RankPolicy) -> Self {
        self.rank_policy = policy;
        self
    }

    /// Returns the explicit cutoff, if one was set.
    pub fn rcond(&self) -> Option<f64> {
        self.rcond
    }

    /// Returns the rank-deficiency policy.
    pub fn rank_policy(&self) -> RankPolicy {
        self.rank_policy
    }

    /// Absolute singular-value threshold for a `rows x cols` system whose
    /// largest singular value is `max_sv`.
    pub(crate) fn threshold(&self, rows: usize, cols: usize, max_sv: f64) -> f64 {
        let rcond = self
            .rcond
            .unwrap_or(f64::EPSILON * rows.max(cols) as f64);
        rcond * max_sv
    }
}
