//! Shared utilities and pure functions for cyclewatch
//!
//! This crate provides helpers used across the workspace: tracing setup and
//! side-effect free text shaping for the terminal.

pub mod logging;
pub mod text;

pub use text::*;
