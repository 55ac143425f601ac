//! Config module tests
//!
//! - Menu map loading and lookup construction
//! - Atomic output writing and backups

#[cfg(test)]
mod writer_tests;
