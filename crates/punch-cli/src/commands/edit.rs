//! Edit command for changing an interval's tag or notes.

use std::io::Write;

use anyhow::{Result, bail};
use clap::Args;
use punch_core::validate_tag;

use super::util::open_database;
use crate::Config;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// ID of the interval to edit.
    pub id: i64,

    /// New activity tag.
    #[arg(short, long)]
    pub tag: Option<String>,

    /// New notes.
    #[arg(short, long)]
    pub notes: Option<String>,
}

pub fn run<W: Write>(writer: &mut W, args: &EditArgs, config: &Config) -> Result<()> {
    if args.tag.is_none() && args.notes.is_none() {
        bail!("nothing to change: pass --tag and/or --notes");
    }
    let tag = args.tag.as_deref().map(validate_tag).transpose()?;

    let db = open_database(config)?;
    let updated = db.update_interval(args.id, tag, args.notes.as_deref())?;
    tracing::info!(id = updated.id, "interval edited");

    write!(writer, "Updated interval {}: '{}'", updated.id, updated.tag)?;
    if let Some(notes) = &updated.notes {
        write!(writer, " ({notes})")?;
    }
    writeln!(writer)?;
    Ok(())
}
