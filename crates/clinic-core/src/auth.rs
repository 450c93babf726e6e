//! Operator accounts and password verification.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use serde::Deserialize;

use crate::{Error, Result};

/// One operator allowed to log in.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

/// The set of accounts accepted by a facade instance.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
  accounts: Vec<Account>,
}

impl Credentials {
  pub fn new(accounts: Vec<Account>) -> Self { Self { accounts } }

  /// Check `username`/`password` against the known accounts.
  ///
  /// Unknown users, wrong passwords and unparsable stored hashes all yield
  /// [`Error::InvalidCredentials`].
  pub fn verify(&self, username: &str, password: &str) -> Result<()> {
    let account = self
      .accounts
      .iter()
      .find(|a| a.username == username)
      .ok_or(Error::InvalidCredentials)?;

    let parsed_hash = PasswordHash::new(&account.password_hash)
      .map_err(|_| Error::InvalidCredentials)?;

    Argon2::default()
      .verify_password(password.as_bytes(), &parsed_hash)
      .map_err(|_| Error::InvalidCredentials)
  }
}
