//! Core types and the session facade for the clinic records system.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::ClinicStore`]; front-ends drive a
//! [`Controller`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod auth;
pub mod controller;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod note;
pub mod patient;
pub mod session;
pub mod store;

pub use controller::Controller;
pub use error::{Error, Result};
