//! CLI argument definitions.

use crate::cli::validators::{parse_factor, parse_positive};
use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Detect drinks from recorded image-classifier scores.
#[derive(Debug, Parser)]
#[command(name = "chillbot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Frames files to classify, one score vector per line.
    pub inputs: Vec<PathBuf>,

    /// Common options for classification.
    #[command(flatten)]
    pub classify: ClassifyArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Answer whether a drink is available, from the stored result.
    Query {
        /// Drink name, e.g. "Coca Cola", "Diet Coke", "Perrier".
        drink: String,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments shared by classification and subcommands.
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "CHILLBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Labels file, one label per line (overrides config).
    #[arg(short, long, env = "CHILLBOT_LABELS")]
    pub labels: Option<PathBuf>,

    /// Per-frame output format (text, json).
    #[arg(short, long, env = "CHILLBOT_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Result store file; every frame's result is written to it.
    #[arg(short, long, global = true, env = "CHILLBOT_STORE")]
    pub store: Option<PathBuf>,

    /// Key the result is stored under.
    #[arg(long, global = true, env = "CHILLBOT_STORE_KEY")]
    pub store_key: Option<String>,

    /// Number of cascaded smoothing stages.
    #[arg(long, value_parser = parse_positive)]
    pub stages: Option<usize>,

    /// Smoothing factor (between 0 and 1, exclusive).
    #[arg(long, value_parser = parse_factor)]
    pub factor: Option<f32>,

    /// Number of top labels handed to the decision rules.
    #[arg(short = 'k', long, value_parser = parse_positive)]
    pub top_k: Option<usize>,

    /// Stop on the first malformed frame instead of skipping it.
    #[arg(long)]
    pub fail_fast: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
