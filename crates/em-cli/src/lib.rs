//! Episode miner CLI library.
//!
//! This crate provides the CLI interface for the episode miner.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, InputArgs};
pub use config::Config;
