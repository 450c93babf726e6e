//! Configuration and wiring for the clinic server binary.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use axum::Router;
use clinic_core::{
  Controller,
  auth::{Account, Credentials},
};
use clinic_store_sqlite::SqliteStore;
use rand_core::OsRng;
use serde::Deserialize;
use tokio::sync::Mutex;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CLINIC_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  /// Operators allowed to log in.
  #[serde(default)]
  pub accounts:   Vec<Account>,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("clinic.db") }

impl ServerConfig {
  /// Layer the optional file at `path` under `CLINIC_*` environment variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("CLINIC"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Wiring ───────────────────────────────────────────────────────────────────

/// Build the HTTP app over an opened store.
pub fn app(store: SqliteStore, config: &ServerConfig) -> Router {
  let controller = Controller::new(
    Arc::new(store),
    Credentials::new(config.accounts.clone()),
  );
  clinic_api::api_router(Arc::new(Mutex::new(controller)))
}

/// Produce the argon2 PHC string stored in `accounts[].password_hash`.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?
      .to_string(),
  )
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use tower::ServiceExt as _;

  fn parse(toml: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn defaults_fill_missing_fields() {
    let cfg = parse("");
    assert_eq!(cfg.address(), "127.0.0.1:8080");
    assert_eq!(cfg.store_path, PathBuf::from("clinic.db"));
    assert!(cfg.accounts.is_empty());
  }

  #[test]
  fn accounts_are_read_from_toml() {
    let cfg = parse(
      r#"
        port = 9000
        [[accounts]]
        username = "admin"
        password_hash = "$argon2id$stub"
      "#,
    );
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.accounts.len(), 1);
    assert_eq!(cfg.accounts[0].username, "admin");
  }

  #[test]
  fn hashed_password_verifies() {
    let hash = hash_password("s3cret").unwrap();
    let creds = Credentials::new(vec![Account {
      username:      "admin".into(),
      password_hash: hash,
    }]);
    assert!(creds.verify("admin", "s3cret").is_ok());
    assert!(creds.verify("admin", "other").is_err());
  }

  #[test]
  fn tilde_is_left_alone_elsewhere() {
    let p = Path::new("/var/lib/clinic.db");
    assert_eq!(expand_tilde(p), p);
  }

  #[tokio::test]
  async fn app_accepts_configured_account() {
    let mut cfg = parse("");
    cfg.accounts.push(Account {
      username:      "admin".into(),
      password_hash: hash_password("pw").unwrap(),
    });
    let store = SqliteStore::open_in_memory().await.unwrap();
    let app = app(store, &cfg);

    let req = Request::builder()
      .method("POST")
      .uri("/session")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(r#"{"username":"admin","password":"pw"}"#))
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
  }
}
