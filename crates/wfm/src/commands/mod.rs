//! Command implementations for the wfm CLI.
//!
//! Each submodule implements the logic for a command group.

pub mod config;
pub mod health;
pub mod plan;
