//! Reading a numeric series from a delimited text file.

use std::path::Path;

use tracing::info;

use crate::error::IoError;
use crate::validate::ValidationCollector;

/// Reads every numeric field of `path` into one series, in file order.
///
/// Records are concatenated, so a single comma-separated row and one value
/// per line both load the same series. Blank fields and surrounding
/// whitespace are ignored. No header row is expected.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`IoError::FileNotFound`] | `path` does not exist |
/// | [`IoError::Csv`] | the file cannot be opened or decoded |
/// | [`IoError::Validation`] | a field is not a finite number |
/// | [`IoError::EmptySeries`] | the file holds no values |
pub fn read_series(path: &Path) -> Result<Vec<f64>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| IoError::csv(path, e))?;

    let mut collector = ValidationCollector::new();
    let mut series = Vec::new();
    for (r, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IoError::csv(path, e))?;
        for (f, field) in record.iter().enumerate() {
            if field.is_empty() {
                continue;
            }
            if let Some(v) = collector.parse(field, r + 1, f + 1) {
                series.push(v);
            }
        }
    }
    collector.finish(path)?;

    if series.is_empty() {
        return Err(IoError::EmptySeries {
            path: path.to_path_buf(),
        });
    }
    info!(path = %path.display(), n = series.len(), "loaded series");
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file_with(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn single_row() {
        let f = file_with("25.0,24.0,23.0\n");
        assert_eq!(read_series(f.path()).unwrap(), vec![25.0, 24.0, 23.0]);
    }

    #[test]
    fn one_value_per_line() {
        let f = file_with("25\n24.5\n-3\n");
        assert_eq!(read_series(f.path()).unwrap(), vec![25.0, 24.5, -3.0]);
    }

    #[test]
    fn ragged_rows_and_whitespace() {
        let f = file_with(" 1.0 , 2.0\n3.0,,4.0 \n");
        assert_eq!(read_series(f.path()).unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        assert!(matches!(
            read_series(&path),
            Err(IoError::FileNotFound { .. })
        ));
    }

    #[test]
    fn empty_file() {
        let f = file_with("");
        assert!(matches!(
            read_series(f.path()),
            Err(IoError::EmptySeries { .. })
        ));
    }

    #[test]
    fn bad_fields_are_all_reported() {
        let f = file_with("1.0,abc,2.0\nnan,3.0\n");
        match read_series(f.path()) {
            Err(IoError::Validation { count, details, .. }) => {
                assert_eq!(count, 2);
                assert!(details.contains("record 1 field 2"));
                assert!(details.contains("record 2 field 1"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
