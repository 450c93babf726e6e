//! Patient directory: access-checked patient CRUD over a [`ClinicStore`].

use tracing::{debug, info};

use crate::{
  Error, Result,
  patient::{Patient, Phn},
  session::Session,
  store::ClinicStore,
};

/// A borrowed view pairing a store with the session that gates it.
pub struct PatientDirectory<'a, S> {
  store:   &'a S,
  session: &'a Session,
}

impl<'a, S: ClinicStore> PatientDirectory<'a, S> {
  pub fn new(store: &'a S, session: &'a Session) -> Self {
    Self { store, session }
  }

  pub async fn create(&self, patient: Patient) -> Result<Patient> {
    self.session.require_login()?;
    patient.validate()?;

    if self.exists(patient.phn).await? {
      return Err(Error::InvalidOperation(format!(
        "a patient with PHN {} already exists",
        patient.phn
      )));
    }

    self.store.insert_patient(&patient).await.map_err(Error::store)?;
    info!(phn = patient.phn, "patient created");
    Ok(patient)
  }

  /// Exact PHN lookup; absence is not an error.
  pub async fn search(&self, phn: Phn) -> Result<Option<Patient>> {
    self.session.require_login()?;
    self.store.get_patient(phn).await.map_err(Error::store)
  }

  /// Patients whose name contains `needle`, ignoring case.
  pub async fn retrieve(&self, needle: &str) -> Result<Vec<Patient>> {
    self.session.require_login()?;
    self.store.find_patients(needle).await.map_err(Error::store)
  }

  pub async fn list(&self) -> Result<Vec<Patient>> {
    self.session.require_login()?;
    self.store.list_patients().await.map_err(Error::store)
  }

  /// Replace the patient stored under `original_phn` with `patient`.
  ///
  /// Returns `false` when `original_phn` is unknown.
  pub async fn update(&self, original_phn: Phn, patient: Patient) -> Result<bool> {
    self.session.require_login()?;
    self.refuse_if_current(original_phn, "update")?;
    patient.validate()?;

    if !self.exists(original_phn).await? {
      debug!(phn = original_phn, "update of unknown patient");
      return Ok(false);
    }
    if patient.phn != original_phn && self.exists(patient.phn).await? {
      return Err(Error::InvalidOperation(format!(
        "a patient with PHN {} already exists",
        patient.phn
      )));
    }

    let updated = self
      .store
      .update_patient(original_phn, &patient)
      .await
      .map_err(Error::store)?;
    if updated {
      info!(phn = original_phn, new_phn = patient.phn, "patient updated");
    }
    Ok(updated)
  }

  /// Remove a patient and their notes. Returns `false` when `phn` is unknown.
  pub async fn delete(&self, phn: Phn) -> Result<bool> {
    self.session.require_login()?;
    self.refuse_if_current(phn, "delete")?;

    let deleted = self.store.delete_patient(phn).await.map_err(Error::store)?;
    if deleted {
      info!(phn, "patient deleted");
    } else {
      debug!(phn, "delete of unknown patient");
    }
    Ok(deleted)
  }

  async fn exists(&self, phn: Phn) -> Result<bool> {
    Ok(self.store.get_patient(phn).await.map_err(Error::store)?.is_some())
  }

  fn refuse_if_current(&self, phn: Phn, action: &str) -> Result<()> {
    if self.session.current_phn()? == Some(phn) {
      return Err(Error::InvalidOperation(format!(
        "cannot {action} the current patient during an appointment"
      )));
    }
    Ok(())
  }
}
