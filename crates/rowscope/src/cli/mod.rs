//! CLI command implementations
//!
//! Each command reads a JSON snapshot and prints either a table or, with
//! `--json`, a JSON document on stdout.

pub mod config;
pub mod describe;
pub mod error;
pub mod fields;
pub mod insert;
pub mod output;
pub mod rows;
pub mod snapshot;
pub mod tables;
