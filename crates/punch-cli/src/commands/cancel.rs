//! Cancel command for discarding the active interval.

use std::io::Write;

use anyhow::{Context, Result};

use super::util::open_database;
use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let db = open_database(config)?;
    let active = db.active_interval()?.context("no active interval")?;

    db.soft_delete(active.id)?;
    tracing::info!(id = active.id, "tracking cancelled");
    writeln!(writer, "Cancelled '{}' (interval {})", active.tag, active.id)?;
    Ok(())
}
