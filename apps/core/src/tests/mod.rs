//! Test Module
//!
//! Crate-level test suite for the response brain.
//!
//! ## Test Categories
//! - `brain_tests`: message analysis through the public API
//! - `mode_tests`: length/style selection properties
//! - `pattern_tests`: channel classification and profile behavior
//! - `executor_tests`: delivery state machine, watchdog, fallback, exclusivity
//! - `integration_tests`: full pipeline flows

pub mod executor_tests;
pub mod pattern_tests;
