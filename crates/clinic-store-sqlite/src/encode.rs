//! Encoding and decoding helpers between domain types and the column values
//! stored in SQLite.
//!
//! Timestamps are stored as RFC 3339 strings. PHNs and note codes are stored
//! as `INTEGER` and range-checked on the way out.

use chrono::{DateTime, Utc};
use clinic_core::{
  note::{Note, NoteCode},
  patient::{Patient, Phn},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Integers ────────────────────────────────────────────────────────────────

pub fn encode_phn(phn: Phn) -> Result<i64> {
  i64::try_from(phn).map_err(|_| Error::OutOfRange {
    column: "phn",
    value:  phn.to_string(),
  })
}

pub fn decode_phn(v: i64) -> Result<Phn> {
  Phn::try_from(v).map_err(|_| Error::OutOfRange {
    column: "phn",
    value:  v.to_string(),
  })
}

pub fn decode_code(v: i64) -> Result<NoteCode> {
  NoteCode::try_from(v).map_err(|_| Error::OutOfRange {
    column: "code",
    value:  v.to_string(),
  })
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `patients` row.
pub struct RawPatient {
  pub phn:        i64,
  pub name:       String,
  pub birth_date: String,
  pub phone:      String,
  pub email:      String,
  pub address:    String,
}

/// Column list matching [`RawPatient::from_row`].
pub const PATIENT_COLUMNS: &str = "phn, name, birth_date, phone, email, address";

impl RawPatient {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      phn:        row.get(0)?,
      name:       row.get(1)?,
      birth_date: row.get(2)?,
      phone:      row.get(3)?,
      email:      row.get(4)?,
      address:    row.get(5)?,
    })
  }

  pub fn into_patient(self) -> Result<Patient> {
    Ok(Patient {
      phn:        decode_phn(self.phn)?,
      name:       self.name,
      birth_date: self.birth_date,
      phone:      self.phone,
      email:      self.email,
      address:    self.address,
    })
  }
}

/// Raw values read directly from a `notes` row.
pub struct RawNote {
  pub code:        i64,
  pub recorded_at: String,
  pub text:        String,
}

/// Column list matching [`RawNote::from_row`].
pub const NOTE_COLUMNS: &str = "code, recorded_at, text";

impl RawNote {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      code:        row.get(0)?,
      recorded_at: row.get(1)?,
      text:        row.get(2)?,
    })
  }

  pub fn into_note(self) -> Result<Note> {
    Ok(Note {
      code:      decode_code(self.code)?,
      timestamp: decode_dt(&self.recorded_at)?,
      text:      self.text,
    })
  }
}
