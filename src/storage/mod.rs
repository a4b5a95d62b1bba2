// src/storage/mod.rs

//! Persistence layer.
//!
//! Programs are idempotently upserted by key; their blocks, courses, and
//! constraints are fully replaced on every run. Each program's replace is
//! wrapped in its own transaction, committed per program, so a crash
//! mid-batch leaves earlier programs fully synced and later ones untouched.

mod sqlite;

pub use sqlite::{SqliteStore, StoreStats};
