//! # yamada
//!
//! Command-line layer over `yamada-core`: argument parsing, configuration
//! files and diagram file formats. The binary in `main.rs` only sets up
//! logging and calls [`cli::execute`].

pub mod cli;
pub mod config;
