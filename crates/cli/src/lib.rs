//! CLI tool for exercising consistent hash rings.
//!
//! Provides commands for:
//! - Walking through the classic four-server demo
//! - Resolving keys to servers
//! - Measuring key distribution and ownership share
//! - Inspecting replica placement and slot collisions

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
