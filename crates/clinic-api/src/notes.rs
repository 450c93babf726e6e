//! Handlers for `/notes` endpoints. All act on the current patient.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/notes` | Optional `?text=<substring>` |
//! | `POST`   | `/notes` | Body: `{"text":".."}`; 201; blank text is a 400 |
//! | `GET`    | `/notes/{code}` | 404 if not found |
//! | `PUT`    | `/notes/{code}` | Body: `{"text":".."}` |
//! | `DELETE` | `/notes/{code}` | 204 |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use clinic_core::{
  note::{Note, NoteCode},
  store::ClinicStore,
};
use serde::Deserialize;

use crate::{SharedController, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NoteBody {
  pub text: String,
}

/// Reject blank replacement text before it reaches the facade.
fn non_blank(text: &str) -> Result<&str, ApiError> {
  let text = text.trim();
  if text.is_empty() {
    return Err(ApiError::BadRequest("note text must not be empty".into()));
  }
  Ok(text)
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /notes[?text=<substring>]`
pub async fn list<S>(
  State(controller): State<SharedController<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Note>>, ApiError>
where
  S: ClinicStore,
{
  let controller = controller.lock().await;
  let notes = match params.text.as_deref().map(str::trim) {
    Some(needle) if !needle.is_empty() => controller.retrieve_notes(needle).await?,
    _ => controller.list_notes().await?,
  };
  Ok(Json(notes))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /notes` — returns 201 + the stored note.
pub async fn create<S>(
  State(controller): State<SharedController<S>>,
  Json(body): Json<NoteBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ClinicStore,
{
  // The ledger trims the text and returns `None` when nothing is left.
  let note = controller
    .lock()
    .await
    .create_note(&body.text)
    .await?
    .ok_or_else(|| ApiError::BadRequest("note text must not be empty".into()))?;
  Ok((StatusCode::CREATED, Json(note)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /notes/{code}`
pub async fn get_one<S>(
  State(controller): State<SharedController<S>>,
  Path(code): Path<NoteCode>,
) -> Result<Json<Note>, ApiError>
where
  S: ClinicStore,
{
  let note = controller
    .lock()
    .await
    .search_note(code)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("no note #{code}")))?;
  Ok(Json(note))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /notes/{code}` — returns the updated note.
pub async fn update<S>(
  State(controller): State<SharedController<S>>,
  Path(code): Path<NoteCode>,
  Json(body): Json<NoteBody>,
) -> Result<Json<Note>, ApiError>
where
  S: ClinicStore,
{
  let text = non_blank(&body.text)?;
  let controller = controller.lock().await;
  controller.update_note(code, text).await?;
  let note = controller
    .search_note(code)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("no note #{code}")))?;
  Ok(Json(note))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /notes/{code}`
pub async fn delete<S>(
  State(controller): State<SharedController<S>>,
  Path(code): Path<NoteCode>,
) -> Result<StatusCode, ApiError>
where
  S: ClinicStore,
{
  controller.lock().await.delete_note(code).await?;
  Ok(StatusCode::NO_CONTENT)
}
