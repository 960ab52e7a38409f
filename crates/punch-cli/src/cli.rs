//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::edit::EditArgs;
use crate::commands::report::ReportArgs;
use crate::commands::start::StartArgs;
use crate::commands::stop::StopArgs;

/// Personal time tracker.
///
/// Records tagged intervals of work and reports totals, averages and spread
/// by day, week, month or date range.
#[derive(Debug, Parser)]
#[command(name = "punch", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start tracking a new interval.
    Start(StartArgs),

    /// Stop the active interval.
    Stop(StopArgs),

    /// Start a new interval with the tag and notes of the last stopped one.
    Resume,

    /// Discard the active interval.
    Cancel,

    /// Show the active interval.
    Status,

    /// Report tracked time for a period.
    Report(ReportArgs),

    /// Change the tag or notes of an interval.
    Edit(EditArgs),

    /// Delete an interval.
    Delete {
        /// ID of the interval to delete.
        id: i64,
    },
}
