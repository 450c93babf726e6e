//! Note ledger: notes of the current patient.
//!
//! Every operation checks login first, then the current patient, so a caller
//! that has logged out sees [`Error::AccessDenied`] rather than
//! [`Error::NoActivePatient`].

use tracing::info;

use crate::{
  Error, Result,
  note::{Note, NoteCode},
  patient::Phn,
  session::Session,
  store::ClinicStore,
};

pub struct NoteLedger<'a, S> {
  store:   &'a S,
  session: &'a Session,
}

impl<'a, S: ClinicStore> NoteLedger<'a, S> {
  pub fn new(store: &'a S, session: &'a Session) -> Self {
    Self { store, session }
  }

  /// Append a note. Blank text (after trimming) is ignored and yields `None`.
  pub async fn create_note(&self, text: &str) -> Result<Option<Note>> {
    let phn = self.session.require_patient()?;
    let text = text.trim();
    if text.is_empty() {
      return Ok(None);
    }

    let note = self.store.insert_note(phn, text).await.map_err(Error::store)?;
    info!(phn, code = note.code, "note created");
    Ok(Some(note))
  }

  /// Notes whose text contains `needle`, ignoring case.
  pub async fn retrieve_notes(&self, needle: &str) -> Result<Vec<Note>> {
    let phn = self.session.require_patient()?;
    self.store.find_notes(phn, needle).await.map_err(Error::store)
  }

  pub async fn search_note(&self, code: NoteCode) -> Result<Option<Note>> {
    let phn = self.session.require_patient()?;
    self.store.get_note(phn, code).await.map_err(Error::store)
  }

  pub async fn list_notes(&self) -> Result<Vec<Note>> {
    let phn = self.session.require_patient()?;
    self.store.list_notes(phn).await.map_err(Error::store)
  }

  /// Replace the text of note `code`, keeping its code and timestamp.
  pub async fn update_note(&self, code: NoteCode, text: &str) -> Result<()> {
    let phn = self.session.require_patient()?;
    let text = text.trim();
    if text.is_empty() {
      return Err(Error::InvalidOperation("note text must not be empty".into()));
    }

    let updated = self
      .store
      .update_note(phn, code, text)
      .await
      .map_err(Error::store)?;
    if !updated {
      return Err(not_found(phn, code));
    }
    info!(phn, code, "note updated");
    Ok(())
  }

  pub async fn delete_note(&self, code: NoteCode) -> Result<()> {
    let phn = self.session.require_patient()?;
    let deleted = self.store.delete_note(phn, code).await.map_err(Error::store)?;
    if !deleted {
      return Err(not_found(phn, code));
    }
    info!(phn, code, "note deleted");
    Ok(())
  }
}

fn not_found(phn: Phn, code: NoteCode) -> Error {
  Error::NotFound(format!("note #{code} for patient {phn}"))
}
