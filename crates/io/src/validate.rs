//! Accumulated validation of parsed series fields.

use std::path::Path;

use crate::error::IoError;

/// Accumulates bad fields and converts them into a single
/// [`IoError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Parses one field, recording it when it is not a finite number.
    ///
    /// `record` and `field` are 1-based positions used in the report.
    pub(crate) fn parse(&mut self, raw: &str, record: usize, field: usize) -> Option<f64> {
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => {
                self.errors
                    .push(format!("record {record} field {field}: {raw:?}"));
                None
            }
        }
    }

    /// Returns the number of recorded errors.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were
    /// recorded. The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self, path: &Path) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                path: path.to_path_buf(),
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}
