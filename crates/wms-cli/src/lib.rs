//! Warehouse routing CLI library.
//!
//! This crate provides the output formatting and terminal styling used by the
//! `wms-cli` subcommands.

pub mod output;
pub mod terminal;
