//! [`Controller`] — the single entry point front-ends talk to.
//!
//! It owns the session and a handle on the store, and hands borrowed
//! [`PatientDirectory`] and [`NoteLedger`] views to each call. A GUI, a CLI
//! and the HTTP API all drive it the same way.

use std::sync::Arc;

use tracing::{info, warn};

use crate::{
  Error, Result,
  auth::Credentials,
  directory::PatientDirectory,
  ledger::NoteLedger,
  note::{Note, NoteCode},
  patient::{Patient, Phn},
  session::Session,
  store::ClinicStore,
};

pub struct Controller<S> {
  store:       Arc<S>,
  credentials: Credentials,
  session:     Session,
}

impl<S: ClinicStore> Controller<S> {
  pub fn new(store: Arc<S>, credentials: Credentials) -> Self {
    Self { store, credentials, session: Session::new() }
  }

  pub fn session(&self) -> &Session { &self.session }

  pub fn directory(&self) -> PatientDirectory<'_, S> {
    PatientDirectory::new(&self.store, &self.session)
  }

  pub fn ledger(&self) -> NoteLedger<'_, S> {
    NoteLedger::new(&self.store, &self.session)
  }

  // ── Session ───────────────────────────────────────────────────────────

  pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
    match self.session.login(&self.credentials, username, password) {
      Ok(()) => {
        info!(username, "logged in");
        Ok(())
      }
      Err(e) => {
        warn!(username, "login rejected");
        Err(e)
      }
    }
  }

  pub fn logout(&mut self) -> Result<()> {
    let user = self.session.user().map(str::to_owned);
    self.session.logout()?;
    info!(username = user.as_deref(), "logged out");
    Ok(())
  }

  pub fn is_logged_in(&self) -> bool { self.session.is_logged_in() }

  /// Open an appointment with patient `phn`. An unknown PHN leaves any prior
  /// selection untouched.
  pub async fn set_current_patient(&mut self, phn: Phn) -> Result<()> {
    self.session.require_login()?;
    if self.directory().search(phn).await?.is_none() {
      return Err(Error::InvalidOperation(format!(
        "no patient is registered with PHN {phn}"
      )));
    }
    self.session.select(phn)?;
    info!(phn, "current patient set");
    Ok(())
  }

  /// End the current appointment, if any.
  pub fn unset_current_patient(&mut self) -> Result<()> {
    self.session.clear_selection()
  }

  /// The current patient, or `None` when no appointment is open.
  pub async fn get_current_patient(&self) -> Result<Option<Patient>> {
    match self.session.current_phn()? {
      Some(phn) => self.directory().search(phn).await,
      None => Ok(None),
    }
  }

  /// The current patient; a missing selection is [`Error::NoActivePatient`].
  pub async fn current_patient(&self) -> Result<Patient> {
    self
      .get_current_patient()
      .await?
      .ok_or(Error::NoActivePatient)
  }

  // ── Patients ──────────────────────────────────────────────────────────

  pub async fn create_patient(&self, patient: Patient) -> Result<Patient> {
    self.directory().create(patient).await
  }

  pub async fn search_patient(&self, phn: Phn) -> Result<Option<Patient>> {
    self.directory().search(phn).await
  }

  pub async fn retrieve_patients(&self, needle: &str) -> Result<Vec<Patient>> {
    self.directory().retrieve(needle).await
  }

  pub async fn list_patients(&self) -> Result<Vec<Patient>> {
    self.directory().list().await
  }

  pub async fn update_patient(
    &self,
    original_phn: Phn,
    patient: Patient,
  ) -> Result<bool> {
    self.directory().update(original_phn, patient).await
  }

  pub async fn delete_patient(&self, phn: Phn) -> Result<bool> {
    self.directory().delete(phn).await
  }

  // ── Notes ─────────────────────────────────────────────────────────────

  pub async fn create_note(&self, text: &str) -> Result<Option<Note>> {
    self.ledger().create_note(text).await
  }

  pub async fn retrieve_notes(&self, needle: &str) -> Result<Vec<Note>> {
    self.ledger().retrieve_notes(needle).await
  }

  pub async fn search_note(&self, code: NoteCode) -> Result<Option<Note>> {
    self.ledger().search_note(code).await
  }

  pub async fn list_notes(&self) -> Result<Vec<Note>> {
    self.ledger().list_notes().await
  }

  pub async fn update_note(&self, code: NoteCode, text: &str) -> Result<()> {
    self.ledger().update_note(code, text).await
  }

  pub async fn delete_note(&self, code: NoteCode) -> Result<()> {
    self.ledger().delete_note(code).await
  }
}
