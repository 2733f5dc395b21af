//! Transaction Metadata Integration Tests
//!
//! Tests for the transaction context lifecycle, offset persistence and
//! recovery, and the counting invariants.
//!
//! ```bash
//! cargo test --test txmeta
//! cargo test --test txmeta -- --nocapture  # with logs
//! ```

#[path = "../common/mod.rs"]
mod common;

mod config_file;
mod lifecycle;
