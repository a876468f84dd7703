//! Actual command: forecast the next value, measure it, and record both.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use thermocast_ar::Pipeline;
use thermocast_sensor::FixedReading;

use crate::cli::ActualArgs;
use crate::config::ThermocastConfig;
use crate::convert;

/// Run the measure-and-compare cycle.
///
/// Files are only written once the forecast and the measurement have both
/// succeeded.
pub fn run(args: ActualArgs, config: &ThermocastConfig) -> Result<()> {
    let _cmd = info_span!("actual").entered();

    // 1. Load history and forecast
    let store = convert::build_store(&config.io);
    let series = store
        .load_data()
        .with_context(|| format!("failed to load series: {}", store.data_path().display()))?;
    let fit_cfg = convert::build_fit_config(&config.fit)?;
    let outcome = Pipeline::new(fit_cfg)
        .run_next(&series)
        .context("single-step forecast failed")?;
    let forecast = outcome.forecast().value();

    // 2. Measure
    let calibration = convert::build_calibration(&config.sensor)?;
    let measured = match args.reading {
        Some(reading) => calibration.measure(&FixedReading::new(reading)),
        None => calibration.measure(&convert::build_adc(&config.sensor)?),
    }
    .context("failed to read temperature sensor")?;
    info!(forecast, measured, "measurement taken");

    println!("Forecast temperature: {forecast:.2} °C");
    println!("Measured temperature: {measured:.2} °C");
    match percent_error(measured, forecast) {
        Some(err) => println!("Forecast error:       {err:.2} %"),
        None => println!("Forecast error:       n/a (zero reading)"),
    }

    // 3. Record and compare
    let recorded = store
        .record(measured, forecast)
        .context("failed to update series files")?;

    let pairs = recorded.comparison(config.io.compare_window);
    println!();
    println!("Last {} samples:", pairs.len());
    println!("{:>10} {:>10}", "measured", "forecast");
    for (m, f) in pairs {
        println!("{m:>10.2} {f:>10.2}");
    }

    Ok(())
}

/// Absolute forecast error as a percentage of the measurement.
/// `None` when the measurement is zero.
fn percent_error(measured: f64, forecast: f64) -> Option<f64> {
    if measured == 0.0 {
        return None;
    }
    Some(((measured - forecast) / measured).abs() * 100.0)
}
