//! Seangkatan CLI - command-line interface for the Seangkatan database.
//!
//! This crate provides the `seangkatan` binary, which creates, seeds,
//! resets, inspects and backs up the school database.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
