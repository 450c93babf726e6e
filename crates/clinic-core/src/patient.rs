//! Patient records, keyed by their Personal Health Number.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Personal Health Number: the unique patient identifier.
pub type Phn = u64;

/// Largest PHN a record may carry; stores hold it as a signed 64-bit integer.
pub const MAX_PHN: Phn = i64::MAX as Phn;

/// A patient in the clinic directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
  pub phn:        Phn,
  pub name:       String,
  pub birth_date: String,
  pub phone:      String,
  pub email:      String,
  pub address:    String,
}

impl Patient {
  pub fn new(
    phn: Phn,
    name: impl Into<String>,
    birth_date: impl Into<String>,
    phone: impl Into<String>,
    email: impl Into<String>,
    address: impl Into<String>,
  ) -> Self {
    Self {
      phn,
      name: name.into(),
      birth_date: birth_date.into(),
      phone: phone.into(),
      email: email.into(),
      address: address.into(),
    }
  }

  /// Check the field rules enforced on create and update.
  pub fn validate(&self) -> Result<()> {
    if self.phn == 0 {
      return Err(Error::InvalidOperation(
        "PHN must be a positive integer".into(),
      ));
    }
    if self.phn > MAX_PHN {
      return Err(Error::InvalidOperation(format!(
        "PHN must not exceed {MAX_PHN}"
      )));
    }

    let fields = [
      ("name", &self.name),
      ("birth date", &self.birth_date),
      ("phone", &self.phone),
      ("email", &self.email),
      ("address", &self.address),
    ];
    if let Some((label, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
      return Err(Error::InvalidOperation(format!("{label} must not be empty")));
    }

    Ok(())
  }

  /// Case-insensitive substring match against the patient's name.
  pub fn name_matches(&self, needle: &str) -> bool {
    self.name.to_lowercase().contains(&needle.to_lowercase())
  }
}
