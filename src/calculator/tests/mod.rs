//! Test module organization for the calculator
//!
//! Tests are grouped by concern; formatting has its own inline tests.

pub mod report_tests;
