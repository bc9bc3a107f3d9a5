//! Conformance harness for inetutil.
//!
//! This crate provides:
//! - Fixtures: JSON conversion cases with expected text, bytes or error kind
//! - Runner: executes fixtures against a parsing strategy, cross-checking
//!   successful parses against `std::net`
//! - Reports: markdown + JSON conformance summaries
//! - Structured logs: JSONL per-case records with an artifact index

#![forbid(unsafe_code)]

pub mod config;
pub mod diff;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use config::StrategySelection;
pub use error::HarnessError;
pub use fixtures::{FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};
