//! Handlers for `/patients` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/patients` | Optional `?name=<substring>` |
//! | `POST`   | `/patients` | Body: a full [`Patient`]; 201 |
//! | `GET`    | `/patients/{phn}` | 404 if not found |
//! | `PUT`    | `/patients/{phn}` | Body: replacement [`Patient`] (may change the PHN) |
//! | `DELETE` | `/patients/{phn}` | 204; 404 if not found |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use clinic_core::{
  patient::{Patient, Phn},
  store::ClinicStore,
};
use serde::Deserialize;

use crate::{SharedController, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Case-insensitive name substring. Absent means all patients.
  pub name: Option<String>,
}

/// `GET /patients[?name=<substring>]`
pub async fn list<S>(
  State(controller): State<SharedController<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Patient>>, ApiError>
where
  S: ClinicStore,
{
  let controller = controller.lock().await;
  let patients = match params.name.as_deref().map(str::trim) {
    Some(needle) if !needle.is_empty() => {
      controller.retrieve_patients(needle).await?
    }
    _ => controller.list_patients().await?,
  };
  Ok(Json(patients))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /patients` — returns 201 + the stored patient.
pub async fn create<S>(
  State(controller): State<SharedController<S>>,
  Json(body): Json<Patient>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ClinicStore,
{
  let patient = controller.lock().await.create_patient(body).await?;
  Ok((StatusCode::CREATED, Json(patient)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /patients/{phn}`
pub async fn get_one<S>(
  State(controller): State<SharedController<S>>,
  Path(phn): Path<Phn>,
) -> Result<Json<Patient>, ApiError>
where
  S: ClinicStore,
{
  let patient = controller
    .lock()
    .await
    .search_patient(phn)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("no patient with PHN {phn}")))?;
  Ok(Json(patient))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /patients/{phn}`
pub async fn update<S>(
  State(controller): State<SharedController<S>>,
  Path(phn): Path<Phn>,
  Json(body): Json<Patient>,
) -> Result<Json<Patient>, ApiError>
where
  S: ClinicStore,
{
  let updated = controller
    .lock()
    .await
    .update_patient(phn, body.clone())
    .await?;
  if !updated {
    return Err(ApiError::NotFound(format!("no patient with PHN {phn}")));
  }
  Ok(Json(body))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /patients/{phn}`
pub async fn delete<S>(
  State(controller): State<SharedController<S>>,
  Path(phn): Path<Phn>,
) -> Result<StatusCode, ApiError>
where
  S: ClinicStore,
{
  if controller.lock().await.delete_patient(phn).await? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("no patient with PHN {phn}")))
  }
}
