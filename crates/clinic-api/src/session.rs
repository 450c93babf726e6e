//! Handlers for `/session` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/session` | `{"logged_in":bool,"username":..}` |
//! | `POST`   | `/session` | Body: `{"username":"..","password":".."}`; 204 |
//! | `DELETE` | `/session` | Log out; 204 |
//! | `GET`    | `/session/patient` | Current patient; 404 if none selected |
//! | `PUT`    | `/session/patient` | Body: `{"phn":123}` |
//! | `DELETE` | `/session/patient` | End the appointment; 204 |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
};
use clinic_core::{
  patient::{Patient, Phn},
  store::ClinicStore,
};
use serde::{Deserialize, Serialize};

use crate::{SharedController, error::ApiError};

// ─── Login state ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionStatus {
  pub logged_in: bool,
  pub username:  Option<String>,
}

/// `GET /session`
pub async fn status<S>(
  State(controller): State<SharedController<S>>,
) -> Json<SessionStatus>
where
  S: ClinicStore,
{
  let controller = controller.lock().await;
  let session = controller.session();
  Json(SessionStatus {
    logged_in: session.is_logged_in(),
    username:  session.user().map(str::to_owned),
  })
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub username: String,
  pub password: String,
}

/// `POST /session`
pub async fn login<S>(
  State(controller): State<SharedController<S>>,
  Json(body): Json<LoginBody>,
) -> Result<StatusCode, ApiError>
where
  S: ClinicStore,
{
  controller
    .lock()
    .await
    .login(&body.username, &body.password)?;
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /session`
pub async fn logout<S>(
  State(controller): State<SharedController<S>>,
) -> Result<StatusCode, ApiError>
where
  S: ClinicStore,
{
  controller.lock().await.logout()?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Current patient ──────────────────────────────────────────────────────────

/// `GET /session/patient`
pub async fn current<S>(
  State(controller): State<SharedController<S>>,
) -> Result<Json<Patient>, ApiError>
where
  S: ClinicStore,
{
  let patient = controller
    .lock()
    .await
    .get_current_patient()
    .await?
    .ok_or_else(|| ApiError::NotFound("no current patient".into()))?;
  Ok(Json(patient))
}

#[derive(Debug, Deserialize)]
pub struct SelectBody {
  pub phn: Phn,
}

/// `PUT /session/patient` — returns the newly selected patient.
pub async fn select<S>(
  State(controller): State<SharedController<S>>,
  Json(body): Json<SelectBody>,
) -> Result<Json<Patient>, ApiError>
where
  S: ClinicStore,
{
  let mut controller = controller.lock().await;
  controller.set_current_patient(body.phn).await?;
  Ok(Json(controller.current_patient().await?))
}

/// `DELETE /session/patient`
pub async fn unselect<S>(
  State(controller): State<SharedController<S>>,
) -> Result<StatusCode, ApiError>
where
  S: ClinicStore,
{
  controller.lock().await.unset_current_patient()?;
  Ok(StatusCode::NO_CONTENT)
}
