//! Status command for showing the active interval.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone};
use punch_core::format::{format_hms, format_timestamp};

use super::util::open_database;
use crate::Config;

pub fn run<W, Tz>(writer: &mut W, config: &Config, now: &DateTime<Tz>) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let db = open_database(config)?;

    writeln!(writer, "Time tracker status")?;
    writeln!(writer, "Database: {}", config.database_path.display())?;

    let Some(active) = db.active_interval()? else {
        writeln!(writer, "No active interval.")?;
        return Ok(());
    };

    let elapsed = now.timestamp() - active.start;
    writeln!(
        writer,
        "Tracking '{}' since {} ({})",
        active.tag,
        format_timestamp(active.start, &now.timezone()),
        format_hms(elapsed)
    )?;
    if let Some(notes) = &active.notes {
        writeln!(writer, "Notes: {notes}")?;
    }

    Ok(())
}
