//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use clinic_core::Error as ClinicError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Clinic(#[from] ClinicError),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Clinic(e) => match e {
        ClinicError::AccessDenied | ClinicError::InvalidCredentials => {
          StatusCode::UNAUTHORIZED
        }
        ClinicError::NoActivePatient
        | ClinicError::InvalidLogoutState
        | ClinicError::InvalidOperation(_) => StatusCode::CONFLICT,
        ClinicError::NotFound(_) => StatusCode::NOT_FOUND,
        ClinicError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
      },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
