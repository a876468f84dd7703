//! Reset command: restore both series files to the default history.

use anyhow::{Context, Result};
use tracing::info_span;

use crate::config::ThermocastConfig;
use crate::convert;

/// Overwrite the measured series and the forecast log.
pub fn run(config: &ThermocastConfig) -> Result<()> {
    let _cmd = info_span!("reset").entered();
    let store = convert::build_store(&config.io);
    store.reset().with_context(|| {
        format!(
            "failed to reset {} and {}",
            store.data_path().display(),
            store.forecasts_path().display()
        )
    })?;
    println!("Series restored to default values");
    Ok(())
}
