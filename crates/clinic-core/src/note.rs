//! Notes — timestamped free-text entries in a patient's record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-patient note identifier. Codes start at 1 and are never reused.
pub type NoteCode = u32;

/// A note in one patient's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
  pub code:      NoteCode,
  /// Store-assigned creation time; not changed by updates.
  pub timestamp: DateTime<Utc>,
  pub text:      String,
}

impl Note {
  /// Case-insensitive substring match against the note text.
  pub fn text_matches(&self, needle: &str) -> bool {
    self.text.to_lowercase().contains(&needle.to_lowercase())
  }
}
