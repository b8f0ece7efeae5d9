//! Common utilities for the Thicket parser crates.
//!
//! This crate provides shared infrastructure used by the tree and parser crates:
//! - **Warning System** - colored, deduplicated terminal output for recovered markup errors

pub mod warning;
