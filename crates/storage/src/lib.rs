//! Persistence for study records, the lesson catalog and UI preferences.
//!
//! Two backends implement the same repository traits: a local JSON
//! key-value store ([`kv`]) and `SQLite` ([`sqlite`]).

#![forbid(unsafe_code)]

pub mod kv;
pub mod repository;
pub mod seed;
pub mod sqlite;

pub use repository::{Storage, StorageError};
