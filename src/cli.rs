use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Thermocast AR temperature forecaster.
#[derive(Parser)]
#[command(
    name = "thermocast",
    version,
    about = "Autoregressive temperature forecasting with AIC order selection"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file [default: thermocast.toml if present].
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the measured series path from config.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Override the forecast log path from config.
    #[arg(long, global = true)]
    pub forecasts: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Forecast a block of values from the stored series.
    Block(BlockArgs),
    /// Forecast the next value, measure it, and record both.
    Actual(ActualArgs),
    /// Restore both series files to the default history.
    Reset,
}

/// Arguments for the `block` subcommand.
#[derive(clap::Args)]
pub struct BlockArgs {
    /// Number of forecasts; prompted for on stdin when absent.
    #[arg(short = 'H', long)]
    pub horizon: Option<usize>,

    /// Also write the forecasts as one delimited record to this path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `actual` subcommand.
#[derive(clap::Args)]
pub struct ActualArgs {
    /// Use this normalised ADC reading (fraction of full scale) instead of
    /// reading the device.
    #[arg(short, long)]
    pub reading: Option<f64>,
}
