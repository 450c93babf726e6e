//! [`SqliteStore`] — the SQLite implementation of [`ClinicStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tracing::debug;

use clinic_core::{
  note::{Note, NoteCode},
  patient::{Patient, Phn},
  store::ClinicStore,
};

use crate::{
  Error, Result,
  encode::{
    NOTE_COLUMNS, PATIENT_COLUMNS, RawNote, RawPatient, decode_code, encode_dt,
    encode_phn,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A clinic store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// All patients in insertion order.
  async fn all_patients(&self) -> Result<Vec<Patient>> {
    let raws: Vec<RawPatient> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PATIENT_COLUMNS} FROM patients ORDER BY seq"
        ))?;
        let rows = stmt
          .query_map([], RawPatient::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPatient::into_patient).collect()
  }

  /// All notes of `phn` in insertion order.
  async fn all_notes(&self, phn: Phn) -> Result<Vec<Note>> {
    let Some(phn_val) = lookup_phn(phn) else {
      return Ok(Vec::new());
    };

    let raws: Vec<RawNote> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {NOTE_COLUMNS} FROM notes WHERE phn = ?1 ORDER BY seq"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![phn_val], RawNote::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNote::into_note).collect()
  }
}

/// Encode a PHN used as a lookup key. A PHN too large to store cannot match
/// any row, so it maps to `None` rather than an error.
fn lookup_phn(phn: Phn) -> Option<i64> { encode_phn(phn).ok() }

// ─── ClinicStore impl ────────────────────────────────────────────────────────

impl ClinicStore for SqliteStore {
  type Error = Error;

  // ── Patients ──────────────────────────────────────────────────────────────

  async fn insert_patient(&self, patient: &Patient) -> Result<()> {
    let phn_val = encode_phn(patient.phn)?;
    let p       = patient.clone();

    let inserted: bool = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let taken = tx
          .query_row(
            "SELECT 1 FROM patients WHERE phn = ?1",
            rusqlite::params![phn_val],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if taken {
          return Ok(false);
        }

        tx.execute(
          "INSERT INTO patients (phn, name, birth_date, phone, email, address)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            phn_val, p.name, p.birth_date, p.phone, p.email, p.address
          ],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(Error::DuplicatePhn(patient.phn));
    }
    debug!(phn = patient.phn, "patient row inserted");
    Ok(())
  }

  async fn get_patient(&self, phn: Phn) -> Result<Option<Patient>> {
    let Some(phn_val) = lookup_phn(phn) else {
      return Ok(None);
    };

    let raw: Option<RawPatient> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE phn = ?1"),
              rusqlite::params![phn_val],
              RawPatient::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPatient::into_patient).transpose()
  }

  async fn find_patients(&self, needle: &str) -> Result<Vec<Patient>> {
    // Matching happens in Rust: SQLite's LIKE and lower() fold ASCII only.
    let mut patients = self.all_patients().await?;
    patients.retain(|p| p.name_matches(needle));
    Ok(patients)
  }

  async fn list_patients(&self) -> Result<Vec<Patient>> {
    self.all_patients().await
  }

  async fn update_patient(&self, original_phn: Phn, patient: &Patient) -> Result<bool> {
    let Some(original_val) = lookup_phn(original_phn) else {
      return Ok(false);
    };
    let new_val = encode_phn(patient.phn)?;
    let p            = patient.clone();

    // Notes follow a PHN change through `ON UPDATE CASCADE`.
    let rows = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE patients
              SET phn = ?2, name = ?3, birth_date = ?4,
                  phone = ?5, email = ?6, address = ?7
            WHERE phn = ?1",
          rusqlite::params![
            original_val, new_val, p.name, p.birth_date, p.phone, p.email,
            p.address
          ],
        )?)
      })
      .await?;

    Ok(rows > 0)
  }

  async fn delete_patient(&self, phn: Phn) -> Result<bool> {
    let Some(phn_val) = lookup_phn(phn) else {
      return Ok(false);
    };

    let rows = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM notes WHERE phn = ?1", rusqlite::params![phn_val])?;
        let rows = tx.execute(
          "DELETE FROM patients WHERE phn = ?1",
          rusqlite::params![phn_val],
        )?;
        tx.commit()?;
        Ok(rows)
      })
      .await?;

    Ok(rows > 0)
  }

  // ── Notes ─────────────────────────────────────────────────────────────────

  async fn insert_note(&self, phn: Phn, text: &str) -> Result<Note> {
    let phn_val     = lookup_phn(phn).ok_or(Error::PatientNotFound(phn))?;
    let recorded_at = Utc::now();
    let at_str      = encode_dt(recorded_at);
    let text        = text.to_owned();
    let text_col    = text.clone();

    let code: Option<i64> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let next: Option<i64> = tx
          .query_row(
            "SELECT next_note_code FROM patients WHERE phn = ?1",
            rusqlite::params![phn_val],
            |r| r.get(0),
          )
          .optional()?;
        let Some(code) = next else {
          return Ok(None);
        };

        tx.execute(
          "INSERT INTO notes (phn, code, recorded_at, text) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![phn_val, code, at_str, text_col],
        )?;
        tx.execute(
          "UPDATE patients SET next_note_code = ?2 WHERE phn = ?1",
          rusqlite::params![phn_val, code + 1],
        )?;
        tx.commit()?;
        Ok(Some(code))
      })
      .await?;

    let code = code.ok_or(Error::PatientNotFound(phn))?;
    Ok(Note { code: decode_code(code)?, timestamp: recorded_at, text })
  }

  async fn get_note(&self, phn: Phn, code: NoteCode) -> Result<Option<Note>> {
    let Some(phn_val) = lookup_phn(phn) else {
      return Ok(None);
    };

    let raw: Option<RawNote> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE phn = ?1 AND code = ?2"),
              rusqlite::params![phn_val, code],
              RawNote::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawNote::into_note).transpose()
  }

  async fn find_notes(&self, phn: Phn, needle: &str) -> Result<Vec<Note>> {
    let mut notes = self.all_notes(phn).await?;
    notes.retain(|n| n.text_matches(needle));
    Ok(notes)
  }

  async fn list_notes(&self, phn: Phn) -> Result<Vec<Note>> {
    self.all_notes(phn).await
  }

  async fn update_note(&self, phn: Phn, code: NoteCode, text: &str) -> Result<bool> {
    let Some(phn_val) = lookup_phn(phn) else {
      return Ok(false);
    };
    let text = text.to_owned();

    let rows = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE notes SET text = ?3 WHERE phn = ?1 AND code = ?2",
          rusqlite::params![phn_val, code, text],
        )?)
      })
      .await?;

    Ok(rows > 0)
  }

  async fn delete_note(&self, phn: Phn, code: NoteCode) -> Result<bool> {
    let Some(phn_val) = lookup_phn(phn) else {
      return Ok(false);
    };

    let rows = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM notes WHERE phn = ?1 AND code = ?2",
          rusqlite::params![phn_val, code],
        )?)
      })
      .await?;

    Ok(rows > 0)
  }
}
