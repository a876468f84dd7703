//! Writing a numeric series as one delimited record.
//!
//! Every write goes to a temporary file next to its target and replaces the
//! target by rename, so a failed write never truncates existing history.

use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::IoError;

/// A series written to a temporary file, waiting to replace its target.
pub(crate) struct Staged {
    file: NamedTempFile,
    target: PathBuf,
}

impl Staged {
    /// Replaces the target with the staged contents.
    pub(crate) fn commit(self) -> Result<(), IoError> {
        let target = self.target;
        self.file
            .persist(&target)
            .map_err(|e| IoError::csv(&target, csv::Error::from(e.error)))?;
        debug!(path = %target.display(), "committed series");
        Ok(())
    }
}

/// Writes `series` to a temporary file in the directory of `path`.
pub(crate) fn stage_series(path: &Path, series: &[f64]) -> Result<Staged, IoError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let io_err = |e: std::io::Error| IoError::csv(path, csv::Error::from(e));
    let mut file = NamedTempFile::new_in(dir).map_err(io_err)?;
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file.as_file_mut());
        writer
            .serialize(series)
            .map_err(|e| IoError::csv(path, e))?;
        writer.flush().map_err(io_err)?;
    }
    file.as_file().sync_all().map_err(io_err)?;
    debug!(path = %path.display(), n = series.len(), "staged series");
    Ok(Staged {
        file,
        target: path.to_path_buf(),
    })
}

/// Writes `series` to `path` as a single comma-separated record,
/// replacing any existing contents.
///
/// Values use the shortest representation that reads back exactly.
///
/// # Errors
///
/// Returns [`IoError::Csv`] when the file cannot be created or written.
pub fn write_series(path: &Path, series: &[f64]) -> Result<(), IoError> {
    stage_series(path, series)?.commit()
}

/// Writes two series together: both are staged before either target is
/// replaced, so a failure while writing leaves both files untouched.
pub(crate) fn write_pair(first: (&Path, &[f64]), second: (&Path, &[f64])) -> Result<(), IoError> {
    let a = stage_series(first.0, first.1)?;
    let b = stage_series(second.0, second.1)?;
    a.commit()?;
    b.commit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_series(&path, &[25.0, 24.5, -3.0]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "25.0,24.5,-3.0\n");
    }

    #[test]
    fn overwrites_existing_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_series(&path, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        write_series(&path, &[7.0]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "7.0\n");
    }

    #[test]
    fn failed_second_write_leaves_first_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("data.csv");
        let second = dir.path().join("missing").join("fcast.csv");
        write_series(&first, &[1.0, 2.0]).unwrap();

        let err = write_pair((&first, &[1.0, 2.0, 3.0]), (&second, &[9.0])).unwrap_err();
        assert!(matches!(err, IoError::Csv { .. }));
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "1.0,2.0\n");
    }

    #[test]
    fn staged_write_leaves_no_stray_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_series(&path, &[1.0]).unwrap();
        drop(stage_series(&path, &[2.0]).unwrap());
        let names: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(names.len(), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1.0\n");
    }

    #[test]
    fn unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        assert!(matches!(
            write_series(&path, &[1.0]),
            Err(IoError::Csv { .. })
        ));
    }
}
