//! Core domain types, errors, and constants for the `cyclewatch` application.
//!
//! This crate holds the pieces every other crate in the workspace agrees on:
//!
//! - **`errors`**: the primary `Error` enum and `Result` alias.
//! - **`commands`**: parsing of the raw command line into an ordered,
//!   immutable `CommandSet`.
//! - **`config`**: the immutable `Config` built once at startup.
//! - **`constants`**: defaults and environment variable names.

pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;

pub use self::{
    commands::{Command, CommandSet},
    config::{interval_duration, parse_interval, Config, RuntimeSettings, MAX_WAIT, MIN_WAIT},
    constants::*,
    errors::{Error, Result},
};
