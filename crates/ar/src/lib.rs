//! # thermocast-ar
//!
//! Least-squares autoregressive (AR) models with AIC order selection and
//! two forecasting modes.
//!
//! ## Workflow
//!
//! ```mermaid
//! graph LR
//!     A["select_order(&series, &config)?"] -->|"order p"| B["ArSpec::new(p)"]
//!     B -->|".fit(&series, &config)?"| C["ArFit"]
//!     C --> D["forecast_next: one step, extended series"]
//!     A -->|"order p"| E["forecast_block: h refitted estimates"]
//!     F["Pipeline"] -->|"run_next / run_block"| A
//! ```
//!
//! ## Usage
//!
//! **Pipeline** (order search, final fit and forecast in one call):
//! ```ignore
//! let outcome = Pipeline::new(FitConfig::default()).run_next(&series)?;
//! println!("next = {}", outcome.forecast().value());
//! ```
//!
//! **Direct fit** (known order):
//! ```ignore
//! let fit = ArSpec::new(1).fit(&series, &FitConfig::default())?;
//! ```
//!
//! ## Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | p | [`ArFit::order()`] | lag order; the model has `p + 1` lag coefficients |
//! | phi | [`ArFit::coefficients()`] | lag weights, most recent lag first |
//! | sigma2 | [`ArFit::sigma2()`] | residual variance `e'e / n` |
//! | AIC | [`ArFit::aic()`] | `ln(sigma2) + 2 (p + 1) / n`, lower is better |
//! | P_max | [`max_order()`] | `round(sqrt(n - 1) / 2)`, exclusive bound of the search |

mod config;
mod error;
mod fit;
mod forecast;
mod lag;
mod lstsq;
mod pipeline;
mod selection;
mod spec;

pub use config::{FitConfig, RankPolicy};
pub use error::ArError;
pub use fit::ArFit;
pub use forecast::{NextForecast, forecast_block, forecast_next, max_block_horizon};
pub use lag::LagMatrix;
pub use lstsq::{LeastSquares, solve};
pub use pipeline::{BlockOutcome, NextOutcome, Pipeline, Stage};
pub use selection::{OrderSelection, aic, max_order, select_order};
pub use spec::ArSpec;
