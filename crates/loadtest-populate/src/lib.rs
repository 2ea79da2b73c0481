//! Common types and utilities for the sources populator.
//!
//! This crate provides the generation parameters shared by the CLI and the
//! populate engine, so both agree on names, environment variables and
//! defaults.

pub mod args;

pub use args::{PopulateArgs, DEFAULT_CONCURRENT_REQUESTS, MAX_CONCURRENT_REQUESTS};
