//! Session state: who is logged in and which patient is the subject of the
//! current appointment.
//!
//! ```text
//! anonymous ──login──▶ authenticated ──select──▶ authenticated + patient
//!     ▲                    │    ▲                        │
//!     └──────logout────────┘    └────clear_selection─────┘
//!     ▲                                                  │
//!     └──────────────────────logout──────────────────────┘
//! ```
//!
//! The session only records the selected PHN; it never owns patient data.

use crate::{Error, Result, auth::Credentials, patient::Phn};

#[derive(Debug, Clone, Default)]
pub struct Session {
  user:            Option<String>,
  current_patient: Option<Phn>,
}

impl Session {
  pub fn new() -> Self { Self::default() }

  pub fn is_logged_in(&self) -> bool { self.user.is_some() }

  /// The logged-in username, if any.
  pub fn user(&self) -> Option<&str> { self.user.as_deref() }

  /// Authenticate against `credentials`. Fails if someone is already logged
  /// in, leaving the existing login in place.
  pub fn login(
    &mut self,
    credentials: &Credentials,
    username: &str,
    password: &str,
  ) -> Result<()> {
    if self.is_logged_in() {
      return Err(Error::InvalidCredentials);
    }
    credentials.verify(username, password)?;
    self.user = Some(username.to_string());
    Ok(())
  }

  /// End the session and drop the current patient selection.
  pub fn logout(&mut self) -> Result<()> {
    if !self.is_logged_in() {
      return Err(Error::InvalidLogoutState);
    }
    self.user = None;
    self.current_patient = None;
    Ok(())
  }

  pub fn require_login(&self) -> Result<()> {
    if self.is_logged_in() { Ok(()) } else { Err(Error::AccessDenied) }
  }

  /// The selected PHN, or `None` when no appointment is open.
  pub fn current_phn(&self) -> Result<Option<Phn>> {
    self.require_login()?;
    Ok(self.current_patient)
  }

  /// Like [`Self::current_phn`] but treats a missing selection as an error.
  pub fn require_patient(&self) -> Result<Phn> {
    self.current_phn()?.ok_or(Error::NoActivePatient)
  }

  /// Record `phn` as the current patient. The caller has checked that the
  /// patient exists.
  pub fn select(&mut self, phn: Phn) -> Result<()> {
    self.require_login()?;
    self.current_patient = Some(phn);
    Ok(())
  }

  pub fn clear_selection(&mut self) -> Result<()> {
    self.require_login()?;
    self.current_patient = None;
    Ok(())
  }
}
