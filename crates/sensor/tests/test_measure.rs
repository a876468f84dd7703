//! Integration test: measuring through a device file.

use approx::assert_abs_diff_eq;
use thermocast_sensor::{AdcSource, Calibration, SensorError, SysfsAdc};

#[test]
fn measure_from_device_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("in_voltage0_raw");
    std::fs::write(&path, "455\n").expect("write device");

    let adc = SysfsAdc::new(&path, 4095).expect("valid source");
    let celsius = Calibration::default().measure(&adc).expect("measure");

    assert_abs_diff_eq!(celsius, 455.0 / 4095.0 * 180.0, epsilon = 1e-12);
}

#[test]
fn sources_are_object_safe() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("raw");
    std::fs::write(&path, "0").expect("write device");

    let sources: Vec<Box<dyn AdcSource>> = vec![
        Box::new(SysfsAdc::new(&path, 1023).expect("valid source")),
        Box::new(thermocast_sensor::FixedReading::new(0.5)),
    ];
    let readings: Vec<f64> = sources.iter().map(|s| s.read().expect("read")).collect();
    assert_eq!(readings, vec![0.0, 0.5]);
}

#[test]
fn device_error_propagates_through_measure() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let adc = SysfsAdc::new(dir.path().join("missing"), 4095).expect("valid source");

    let err = Calibration::default().measure(&adc).unwrap_err();
    assert!(
        matches!(err, SensorError::Device { .. }),
        "expected Device error, got {err:?}",
    );
}
