//! # thermocast-io
//!
//! Delimited-text persistence for the measured temperature series and the
//! forecast log. Files hold plain comma-separated numbers with no header.

mod error;
mod reader;
mod store;
mod validate;
mod writer;

pub use error::IoError;
pub use reader::read_series;
pub use store::{DEFAULT_SERIES, Recorded, SeriesStore};
pub use writer::write_series;
