//! Block command: several refitted next-value estimates from the stored series.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use thermocast_ar::{Pipeline, max_block_horizon, select_order};
use thermocast_io::write_series;

use crate::cli::BlockArgs;
use crate::config::ThermocastConfig;
use crate::convert;

/// Run the block forecast.
pub fn run(args: BlockArgs, config: &ThermocastConfig) -> Result<()> {
    let _cmd = info_span!("block").entered();

    // 1. Load history
    let store = convert::build_store(&config.io);
    let series = store
        .load_data()
        .with_context(|| format!("failed to load series: {}", store.data_path().display()))?;
    let n = series.len();
    let fit_cfg = convert::build_fit_config(&config.fit)?;

    // 2. Horizon bounded by the selected order
    let order = select_order(&series, &fit_cfg)
        .context("order selection failed")?
        .order();
    let max = max_block_horizon(n, order, &fit_cfg);
    if max == 0 {
        bail!("{n} observations leave no block horizon for AR order {order}");
    }
    let horizon = match args.horizon {
        Some(h) if h == 0 || h > max => {
            bail!("horizon must be between 1 and {max} for {n} observations at AR order {order}, got {h}")
        }
        Some(h) => h,
        None => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            prompt_horizon(max, &mut stdin.lock(), &mut stdout)?
        }
    };

    // 3. Fit and forecast
    let outcome = Pipeline::new(fit_cfg)
        .run_block(&series, horizon)
        .context("block forecast failed")?;

    let fit = outcome.fit();
    println!(
        "AR order {} (searched 0..{}), coefficients {:?}",
        fit.order(),
        outcome.selection().max_order(),
        fit.coefficients()
    );
    for (i, f) in outcome.forecasts().iter().enumerate() {
        println!("forecast {:>3}: {f:.4} °C", i + 1);
    }

    // 4. Optional output
    if let Some(path) = args.output {
        write_series(&path, outcome.forecasts())
            .with_context(|| format!("failed to write forecasts: {}", path.display()))?;
        info!(path = %path.display(), "forecasts written");
    }

    Ok(())
}

/// Asks for a horizon until a value in `1..=max` is entered.
fn prompt_horizon(max: usize, input: &mut impl BufRead, output: &mut impl Write) -> Result<usize> {
    let mut line = String::new();
    loop {
        write!(output, "Number of forecasts (1-{max}): ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line).context("failed to read horizon")? == 0 {
            bail!("no horizon given before end of input");
        }
        match line.trim().parse::<usize>() {
            Ok(h) if (1..=max).contains(&h) => return Ok(h),
            Ok(h) => {
                warn!(horizon = h, max, "horizon out of range");
                writeln!(output, "The horizon must be between 1 and {max}.")?;
            }
            Err(_) => writeln!(output, "Enter a positive whole number.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use thermocast_ar::FitConfig;

    #[test]
    fn prompt_accepts_first_valid() {
        let mut input = Cursor::new("3\n");
        let mut output = Vec::new();
        assert_eq!(prompt_horizon(7, &mut input, &mut output).unwrap(), 3);
        assert_eq!(String::from_utf8(output).unwrap(), "Number of forecasts (1-7): ");
    }

    #[test]
    fn prompt_repeats_until_in_range() {
        let mut input = Cursor::new("8\nabc\n0\n 7 \n");
        let mut output = Vec::new();
        assert_eq!(prompt_horizon(7, &mut input, &mut output).unwrap(), 7);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Number of forecasts").count(), 4);
        assert_eq!(text.matches("between 1 and 7").count(), 2);
        assert!(text.contains("positive whole number"));
    }

    #[test]
    fn prompt_fails_at_end_of_input() {
        let mut input = Cursor::new("25\n");
        let mut output = Vec::new();
        assert!(prompt_horizon(9, &mut input, &mut output).is_err());
    }

    #[test]
    fn default_series_bound_excludes_singular_steps() {
        // Order 1 on the ten-sample default: steps 8 and 9 would refit two
        // coefficients on a single row.
        let series = thermocast_io::DEFAULT_SERIES;
        let config = FitConfig::default();
        let max = max_block_horizon(series.len(), 1, &config);
        assert_eq!(max, 7);

        let mut input = Cursor::new("8\n9\n7\n");
        let mut output = Vec::new();
        let h = prompt_horizon(max, &mut input, &mut output).unwrap();
        assert_eq!(h, 7);
        assert!(Pipeline::new(config).run_block(&series, h).is_ok());
    }
}
