//! JSON REST API for the clinic records facade.
//!
//! Exposes an axum [`Router`] over one shared [`Controller`]. The controller
//! sits behind a mutex, so each request's facade call runs to completion
//! before the next starts.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", clinic_api::api_router(controller))
//! ```

pub mod error;
pub mod notes;
pub mod patients;
pub mod session;

use std::sync::Arc;

use axum::{Router, routing::get};
use clinic_core::{Controller, store::ClinicStore};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// The facade shared by all handlers.
pub type SharedController<S> = Arc<Mutex<Controller<S>>>;

/// Build the API router for `controller`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(controller: SharedController<S>) -> Router<()>
where
  S: ClinicStore + 'static,
{
  Router::new()
    // Session
    .route(
      "/session",
      get(session::status::<S>)
        .post(session::login::<S>)
        .delete(session::logout::<S>),
    )
    .route(
      "/session/patient",
      get(session::current::<S>)
        .put(session::select::<S>)
        .delete(session::unselect::<S>),
    )
    // Patients
    .route("/patients", get(patients::list::<S>).post(patients::create::<S>))
    .route(
      "/patients/{phn}",
      get(patients::get_one::<S>)
        .put(patients::update::<S>)
        .delete(patients::delete::<S>),
    )
    // Notes
    .route("/notes", get(notes::list::<S>).post(notes::create::<S>))
    .route(
      "/notes/{code}",
      get(notes::get_one::<S>)
        .put(notes::update::<S>)
        .delete(notes::delete::<S>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(controller)
}
