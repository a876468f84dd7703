//! Integration test: the measure-and-record cycle over a series store.

use thermocast_io::{DEFAULT_SERIES, SeriesStore};

#[test]
fn repeated_records_grow_both_files() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = SeriesStore::new(
        dir.path().join("data_temp.csv"),
        dir.path().join("fcast_temp.csv"),
    );
    store.reset().expect("reset");

    for k in 0..5 {
        let recorded = store
            .record(20.0 + k as f64, 21.0 + k as f64)
            .expect("record");
        assert_eq!(recorded.data().len(), DEFAULT_SERIES.len() + k + 1);
    }

    let data = store.load_data().expect("load data");
    let forecasts = store.load_forecasts().expect("load forecasts");
    assert_eq!(&data[..10], &DEFAULT_SERIES[..]);
    assert_eq!(&data[10..], &[20.0, 21.0, 22.0, 23.0, 24.0]);
    assert_eq!(&forecasts[10..], &[21.0, 22.0, 23.0, 24.0, 25.0]);
}

#[test]
fn comparison_window_after_record() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = SeriesStore::new(dir.path().join("d.csv"), dir.path().join("f.csv"));
    store.reset().expect("reset");

    let recorded = store.record(30.0, 26.0).expect("record");
    let pairs = recorded.comparison(3);
    assert_eq!(pairs, vec![(23.0, 23.0), (25.0, 25.0), (30.0, 26.0)]);
}

#[test]
fn reset_overwrites_longer_history() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = SeriesStore::new(dir.path().join("d.csv"), dir.path().join("f.csv"));
    store.reset().expect("reset");
    store.record(1.0, 2.0).expect("record");

    store.reset().expect("second reset");
    assert_eq!(store.load_data().expect("load"), DEFAULT_SERIES.to_vec());
}
