//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use crate::config::*;

use thermocast_ar::{FitConfig, RankPolicy};
use thermocast_io::SeriesStore;
use thermocast_sensor::{Calibration, SysfsAdc};

/// Parses a rank policy name into the corresponding enum variant.
pub fn parse_rank_policy(s: &str) -> Result<RankPolicy> {
    match s.to_lowercase().as_str() {
        "reject" => Ok(RankPolicy::Reject),
        "minimum-norm" | "minimum_norm" => Ok(RankPolicy::MinimumNorm),
        other => bail!("unknown rank policy: {other:?}"),
    }
}

/// Builds a [`FitConfig`] from the TOML fit configuration.
pub fn build_fit_config(fit: &FitToml) -> Result<FitConfig> {
    let mut cfg = FitConfig::default().with_rank_policy(parse_rank_policy(&fit.rank_policy)?);
    if let Some(rcond) = fit.rcond {
        if !rcond.is_finite() || rcond < 0.0 {
            bail!("rcond must be finite and non-negative, got {rcond}");
        }
        cfg = cfg.with_rcond(rcond);
    }
    Ok(cfg)
}

/// Builds a [`SeriesStore`] from the TOML I/O configuration.
pub fn build_store(io: &IoToml) -> SeriesStore {
    SeriesStore::new(&io.data, &io.forecasts)
}

/// Builds a [`Calibration`] from the TOML sensor configuration.
pub fn build_calibration(sensor: &SensorToml) -> Result<Calibration> {
    let cal = Calibration::default().with_scale(sensor.scale);
    cal.validate()?;
    Ok(cal)
}

/// Builds the device-backed ADC source from the TOML sensor configuration.
pub fn build_adc(sensor: &SensorToml) -> Result<SysfsAdc> {
    Ok(SysfsAdc::new(&sensor.device, sensor.max_raw)?)
}
