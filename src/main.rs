mod actual_cmd;
mod block_cmd;
mod cli;
mod config;
mod convert;
mod logging;
mod reset_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::ThermocastConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ThermocastConfig::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.io.data = data;
    }
    if let Some(forecasts) = cli.forecasts {
        config.io.forecasts = forecasts;
    }

    match cli.command {
        Command::Block(args) => block_cmd::run(args, &config),
        Command::Actual(args) => actual_cmd::run(args, &config),
        Command::Reset => reset_cmd::run(&config),
    }
}
