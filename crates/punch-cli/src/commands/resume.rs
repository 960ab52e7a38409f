//! Resume command: start again where the last interval left off.

use std::fmt::Display;
use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, TimeZone};
use punch_core::format::format_timestamp;

use super::util::open_database;
use crate::Config;

pub fn run<W, Tz>(writer: &mut W, config: &Config, now: &DateTime<Tz>) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let db = open_database(config)?;
    if let Some(active) = db.active_interval()? {
        bail!("already tracking '{}' (interval {})", active.tag, active.id);
    }

    let last = db
        .last_closed_interval()?
        .context("nothing to resume: no stopped interval found")?;
    let id = db.start_interval(&last.tag, last.notes.as_deref(), now.timestamp())?;
    tracing::info!(id, resumed_from = last.id, "tracking resumed");
    writeln!(
        writer,
        "Resumed '{}' at {} (interval {id})",
        last.tag,
        format_timestamp(now.timestamp(), &now.timezone())
    )?;
    Ok(())
}
