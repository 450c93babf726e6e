//! Error type for `clinic-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored integer does not fit the domain type it decodes into.
  #[error("column {column} value {value} is out of range")]
  OutOfRange { column: &'static str, value: String },

  #[error("no patient with PHN {0}")]
  PatientNotFound(u64),

  #[error("a patient with PHN {0} already exists")]
  DuplicatePhn(u64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
