//! Integration tests for Fluxify
//!
//! Tests are organized by component:
//! - tmdb_test: TMDB client against a mock server
//! - stores_test: catalog, detail, favorites, search and synthesis stores
//! - cli_test: argument parsing, JSON output and command exit codes
//! - ui_test: full-frame rendering on a TestBackend

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
