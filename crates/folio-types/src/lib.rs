//! Foundation types for the folio terminal.
//!
//! Shared by every folio crate: the crate-wide error type and the terminal
//! configuration loaded from TOML.

pub mod config;
pub mod error;
