//! The `ClinicStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `clinic-store-sqlite`).
//! It does no access control: the session checks live in
//! [`PatientDirectory`](crate::directory::PatientDirectory) and
//! [`NoteLedger`](crate::ledger::NoteLedger), which are the only callers.

use std::future::Future;

use crate::{
  note::{Note, NoteCode},
  patient::{Patient, Phn},
};

/// Abstraction over a clinic records backend.
///
/// Every mutating method is a single atomic unit: either it fully applies or
/// the store is left unchanged. List-returning methods yield records in
/// insertion order.
pub trait ClinicStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Patients ──────────────────────────────────────────────────────────

  /// Persist a new patient. The caller has already checked that the PHN is
  /// free; backends still reject a duplicate with an error.
  fn insert_patient<'a>(
    &'a self,
    patient: &'a Patient,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Retrieve a patient by PHN. Returns `None` if not found.
  fn get_patient(
    &self,
    phn: Phn,
  ) -> impl Future<Output = Result<Option<Patient>, Self::Error>> + Send + '_;

  /// All patients whose name contains `needle`, ignoring case.
  fn find_patients<'a>(
    &'a self,
    needle: &'a str,
  ) -> impl Future<Output = Result<Vec<Patient>, Self::Error>> + Send + 'a;

  fn list_patients(
    &self,
  ) -> impl Future<Output = Result<Vec<Patient>, Self::Error>> + Send + '_;

  /// Replace the record stored under `original_phn`. The patient keeps its
  /// notes and its position in insertion order, even when the PHN changes.
  /// Returns `false` if `original_phn` does not exist.
  fn update_patient<'a>(
    &'a self,
    original_phn: Phn,
    patient: &'a Patient,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Remove a patient together with all of their notes. Returns `false` if
  /// the patient does not exist.
  fn delete_patient(
    &self,
    phn: Phn,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Notes ─────────────────────────────────────────────────────────────

  /// Append a note to a patient's ledger under the next free code. The
  /// timestamp is set by the store.
  fn insert_note<'a>(
    &'a self,
    phn: Phn,
    text: &'a str,
  ) -> impl Future<Output = Result<Note, Self::Error>> + Send + 'a;

  fn get_note(
    &self,
    phn: Phn,
    code: NoteCode,
  ) -> impl Future<Output = Result<Option<Note>, Self::Error>> + Send + '_;

  /// All notes of a patient whose text contains `needle`, ignoring case.
  fn find_notes<'a>(
    &'a self,
    phn: Phn,
    needle: &'a str,
  ) -> impl Future<Output = Result<Vec<Note>, Self::Error>> + Send + 'a;

  fn list_notes(
    &self,
    phn: Phn,
  ) -> impl Future<Output = Result<Vec<Note>, Self::Error>> + Send + '_;

  /// Replace a note's text, keeping its code and timestamp. Returns `false`
  /// if the note does not exist.
  fn update_note<'a>(
    &'a self,
    phn: Phn,
    code: NoteCode,
    text: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Returns `false` if the note does not exist.
  fn delete_note(
    &self,
    phn: Phn,
    code: NoteCode,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
