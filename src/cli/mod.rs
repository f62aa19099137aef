//! CLI infrastructure for the ttt binary
//!
//! Commands for playing against the computer, serving the HTTP API and
//! exercising the move search.

pub mod commands;
pub mod config;
pub mod output;
