//! End-to-end run: order selection, final fit, forecast.

use tracing::info;

use crate::config::FitConfig;
use crate::error::ArError;
use crate::fit::ArFit;
use crate::forecast::{self, NextForecast};
use crate::selection::{self, OrderSelection};
use crate::spec::ArSpec;

/// Progress of a [`Pipeline`] run.
///
/// ```text
/// Idle -> OrderSelecting -> Fitting -> Forecasting -> Done
///               \______________\____________\______-> Failed(error)
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Stage {
    /// No run started yet.
    Idle,
    /// Scoring candidate orders.
    OrderSelecting,
    /// Fitting the selected order on the full history.
    Fitting,
    /// Producing forecasts.
    Forecasting,
    /// The last run completed.
    Done,
    /// The last run aborted with this error.
    Failed(ArError),
}

/// Result of [`Pipeline::run_block`].
#[derive(Clone, Debug, PartialEq)]
pub struct BlockOutcome {
    selection: OrderSelection,
    fit: ArFit,
    forecasts: Vec<f64>,
}

impl BlockOutcome {
    /// Returns the order search that chose the model.
    pub fn selection(&self) -> &OrderSelection {
        &self.selection
    }

    /// Returns the selected model fitted on the full history.
    pub fn fit(&self) -> &ArFit {
        &self.fit
    }

    /// Returns the block forecasts, one per step.
    pub fn forecasts(&self) -> &[f64] {
        &self.forecasts
    }
}

/// Result of [`Pipeline::run_next`].
#[derive(Clone, Debug, PartialEq)]
pub struct NextOutcome {
    selection: OrderSelection,
    forecast: NextForecast,
}

impl NextOutcome {
    /// Returns the order search that chose the model.
    pub fn selection(&self) -> &OrderSelection {
        &self.selection
    }

    /// Returns the one-step forecast and extended series.
    pub fn forecast(&self) -> &NextForecast {
        &self.forecast
    }
}

/// Runs the fitting pipeline for one invocation and records its stage.
///
/// Stages advance linearly; the first error moves the pipeline to
/// [`Stage::Failed`] and is returned unchanged. Nothing is retried.
///
/// # Example
///
/// ```
/// use thermocast_ar::{FitConfig, Pipeline, Stage};
///
/// let series = [25.0, 24.0, 23.0, 25.0, 24.0, 23.0, 25.0, 24.0, 23.0, 25.0];
/// let mut pipeline = Pipeline::new(FitConfig::default());
/// let outcome = pipeline.run_next(&series).unwrap();
/// assert!(outcome.forecast().value().is_finite());
/// assert_eq!(pipeline.stage(), &Stage::Done);
/// ```
#[derive(Clone, Debug)]
pub struct Pipeline {
    config: FitConfig,
    stage: Stage,
}

impl Pipeline {
    /// Creates an idle pipeline.
    pub fn new(config: FitConfig) -> Self {
        Self {
            config,
            stage: Stage::Idle,
        }
    }

    /// Returns the stage reached by the last run.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Returns the fitting configuration.
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Selects an order, fits it, and produces `horizon` block forecasts
    /// (see [`forecast_block`](crate::forecast_block)).
    pub fn run_block(&mut self, series: &[f64], horizon: usize) -> Result<BlockOutcome, ArError> {
        let (selection, fit) = self.select_and_fit(series)?;

        self.stage = Stage::Forecasting;
        let forecasts = self.record(forecast::forecast_block(
            series,
            selection.order(),
            horizon,
            &self.config,
        ))?;
        info!(horizon, "block forecast complete");

        self.stage = Stage::Done;
        Ok(BlockOutcome {
            selection,
            fit,
            forecasts,
        })
    }

    /// Selects an order, fits it, and forecasts the next observation
    /// (see [`forecast_next`](crate::forecast_next)).
    pub fn run_next(&mut self, series: &[f64]) -> Result<NextOutcome, ArError> {
        let (selection, fit) = self.select_and_fit(series)?;

        self.stage = Stage::Forecasting;
        let forecast = self.record(forecast::extend(series, fit))?;
        info!(value = forecast.value(), "next-step forecast complete");

        self.stage = Stage::Done;
        Ok(NextOutcome {
            selection,
            forecast,
        })
    }

    fn select_and_fit(&mut self, series: &[f64]) -> Result<(OrderSelection, ArFit), ArError> {
        self.stage = Stage::OrderSelecting;
        let selection = self.record(selection::select_order(series, &self.config))?;

        self.stage = Stage::Fitting;
        let fit = self.record(ArSpec::new(selection.order()).fit(series, &self.config))?;
        info!(
            order = fit.order(),
            sigma2 = fit.sigma2(),
            coefficients = ?fit.coefficients(),
            "fitted final model"
        );
        Ok((selection, fit))
    }

    fn record<T>(&mut self, result: Result<T, ArError>) -> Result<T, ArError> {
        if let Err(e) = &result {
            self.stage = Stage::Failed(e.clone());
        }
        result
    }
}
