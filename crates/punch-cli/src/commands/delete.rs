//! Delete command for soft-deleting an interval.

use std::io::Write;

use anyhow::{Result, bail};

use super::util::open_database;
use crate::Config;

pub fn run<W: Write>(writer: &mut W, id: i64, config: &Config) -> Result<()> {
    let db = open_database(config)?;
    if !db.soft_delete(id)? {
        bail!("interval not found: {id}");
    }
    tracing::info!(id, "interval deleted");
    writeln!(writer, "Deleted interval {id}")?;
    Ok(())
}
