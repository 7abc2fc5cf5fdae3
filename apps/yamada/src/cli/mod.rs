//! # Yamada CLI Module
//!
//! ## Available Commands
//!
//! - `poly` - Normalized (or raw) Yamada polynomial of a diagram
//! - `simplify` - Reidemeister simplification with move counts
//! - `info` - Counts, faces, planarity and move candidates
//! - `enumerate` - Classify the crossing assignments of plantri shadows
//! - `distance` - Crossing-change distance to a target diagram

mod commands;

use crate::config::{Config, StrategyName};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;
use yamada_core::{Result, YamadaError};

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Yamada polynomial toolkit for spatial graph diagrams.
#[derive(Parser, Debug)]
#[command(name = "yamada")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// TOML file with simplify/enumerate defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the Yamada polynomial of a diagram
    Poly {
        /// Diagram file
        file: PathBuf,

        /// Input format (default: by extension, `.pd` or JSON)
        #[arg(short, long, value_enum)]
        format: Option<InputFormat>,

        /// Print the raw state sum instead of the normal form
        #[arg(long)]
        raw: bool,
    },

    /// Simplify a diagram with Reidemeister moves
    Simplify {
        /// Diagram file
        file: PathBuf,

        #[arg(short, long, value_enum)]
        format: Option<InputFormat>,

        /// Exploratory R3 attempts
        #[arg(short = 'n', long)]
        tries: Option<usize>,

        /// R3 selection strategy
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyName>,

        /// Seed for the random strategy
        #[arg(long)]
        seed: Option<u64>,

        /// Write the simplified diagram record here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show diagram structure and move candidates
    Info {
        /// Diagram file
        file: PathBuf,

        #[arg(short, long, value_enum)]
        format: Option<InputFormat>,
    },

    /// Classify crossing assignments of planar_code shadows
    Enumerate {
        /// plantri planar_code stream
        file: PathBuf,

        /// Diagram whose underlying graph every candidate must match
        #[arg(short, long)]
        graph: PathBuf,

        #[arg(long, value_enum)]
        graph_format: Option<InputFormat>,

        /// Required crossing count
        #[arg(short = 'x', long)]
        crossings: usize,

        /// Also drop candidates with an R6 configuration
        #[arg(long)]
        reject_r6: bool,

        /// Try all 2^n assignments instead of fixing the first crossing
        #[arg(long)]
        all_assignments: bool,
    },

    /// Fewest crossing changes reaching a target polynomial
    Distance {
        /// Diagram file
        file: PathBuf,

        #[arg(short, long, value_enum)]
        format: Option<InputFormat>,

        /// Diagram whose polynomial is the target
        #[arg(short, long)]
        target: PathBuf,

        /// Largest subset of crossings to try
        #[arg(short = 'k', long)]
        max_flips: Option<usize>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

fn emit<R: Serialize + Display>(report: &R, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(report)
            .map_err(|e| YamadaError::InvalidInput(format!("Cannot encode output: {e}")))?;
        println!("{text}");
    } else {
        println!("{report}");
    }
    Ok(())
}

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let json = cli.json;

    match cli.command {
        Commands::Poly { file, format, raw } => emit(&cmd_poly(&file, format, raw)?, json),
        Commands::Simplify {
            file,
            format,
            tries,
            strategy,
            seed,
            output,
        } => emit(
            &cmd_simplify(
                &config,
                &file,
                format,
                tries,
                strategy,
                seed,
                output.as_deref(),
            )?,
            json,
        ),
        Commands::Info { file, format } => emit(&cmd_info(&file, format)?, json),
        Commands::Enumerate {
            file,
            graph,
            graph_format,
            crossings,
            reject_r6,
            all_assignments,
        } => {
            let args = EnumerateArgs {
                planar_code: file,
                graph,
                graph_format,
                crossings,
                reject_r6: reject_r6.then_some(true),
                mirror_symmetric: all_assignments.then_some(false),
            };
            emit(&cmd_enumerate(&config, &args)?, json)
        }
        Commands::Distance {
            file,
            format,
            target,
            max_flips,
        } => emit(&cmd_distance(&file, format, &target, max_flips)?, json),
    }
}
