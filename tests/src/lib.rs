//! Known-answer suites and shared test helpers for the blockmode library
pub mod suites;
