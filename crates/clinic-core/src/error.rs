//! Error types for `clinic-core`.
//!
//! Every facade call fails with exactly one of these kinds, so a front-end
//! can render a specific message by matching on the variant.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The operation needs a logged-in user.
  #[error("access denied: not logged in")]
  AccessDenied,

  /// The operation needs a current patient and none is selected.
  #[error("no current patient selected")]
  NoActivePatient,

  #[error("invalid login")]
  InvalidCredentials,

  #[error("invalid logout: not logged in")]
  InvalidLogoutState,

  #[error("invalid operation: {0}")]
  InvalidOperation(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
