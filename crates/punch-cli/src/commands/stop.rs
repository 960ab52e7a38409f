//! Stop command for closing the active interval.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use clap::Args;
use punch_core::format::format_hms;

use super::util::open_database;
use crate::Config;

#[derive(Debug, Args)]
pub struct StopArgs {
    /// Replace the interval's notes.
    #[arg(short, long)]
    pub notes: Option<String>,
}

pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    args: &StopArgs,
    config: &Config,
    now: &DateTime<Tz>,
) -> Result<()> {
    let db = open_database(config)?;
    let active = db.active_interval()?.context("no active interval")?;

    let stopped = db.stop_interval(active.id, now.timestamp(), args.notes.as_deref())?;
    let elapsed = stopped.duration().unwrap_or_default();
    tracing::info!(id = stopped.id, elapsed, "tracking stopped");
    writeln!(
        writer,
        "Stopped '{}' after {} (interval {})",
        stopped.tag,
        format_hms(elapsed),
        stopped.id
    )?;
    Ok(())
}
