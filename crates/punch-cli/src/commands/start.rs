//! Start command for beginning a new interval.

use std::fmt::Display;
use std::io::Write;

use anyhow::{Result, bail};
use chrono::{DateTime, TimeZone};
use clap::Args;
use punch_core::format::format_timestamp;
use punch_core::validate_tag;

use super::util::open_database;
use crate::Config;

#[derive(Debug, Args)]
pub struct StartArgs {
    /// Activity tag for the interval.
    pub tag: String,

    /// Free-text notes.
    #[arg(short, long)]
    pub notes: Option<String>,
}

pub fn run<W, Tz>(writer: &mut W, args: &StartArgs, config: &Config, now: &DateTime<Tz>) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let tag = validate_tag(&args.tag)?;

    let db = open_database(config)?;
    if let Some(active) = db.active_interval()? {
        bail!(
            "already tracking '{}' (interval {}); stop or cancel it first",
            active.tag,
            active.id
        );
    }

    let id = db.start_interval(tag, args.notes.as_deref(), now.timestamp())?;
    tracing::info!(id, tag, "tracking started");
    writeln!(
        writer,
        "Started '{tag}' at {} (interval {id})",
        format_timestamp(now.timestamp(), &now.timezone())
    )?;
    Ok(())
}
