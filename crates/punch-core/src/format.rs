//! Rendering of intervals and statistics for the terminal and for export.

use std::fmt::{self, Display, Write};

use chrono::TimeZone;

use crate::{Interval, Statistics};

/// Header row of the flat export format.
pub const EXPORT_HEADER: [&str; 5] = ["ID", "Start", "End", "Tag", "Notes"];

/// Shown instead of a table when nothing matched.
pub const NO_DATA_NOTICE: &str = "No tracked time found for the specified filter";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats seconds as `HH:MM:SS`. Hours are not capped at 24.
/// Negative values are shown as zero.
pub fn format_hms(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Formats seconds as minutes with one decimal place, e.g. `60.0min`.
pub fn format_minutes(seconds: f64) -> String {
    format!("{:.1}min", seconds / 60.0)
}

/// Renders an epoch timestamp as `YYYY-MM-DD HH:MM:SS` in `tz`.
pub fn format_timestamp<Tz>(epoch: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    tz.timestamp_opt(epoch, 0).single().map_or_else(
        || epoch.to_string(),
        |dt| dt.format(TIMESTAMP_FORMAT).to_string(),
    )
}

/// Renders intervals followed by a summary section.
///
/// Returns [`NO_DATA_NOTICE`] alone when `intervals` is empty.
pub fn to_table<Tz>(intervals: &[Interval], stats: &Statistics, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut output = String::new();
    write_table(&mut output, intervals, stats, tz).expect("writing to a String cannot fail");
    output
}

fn write_table<Tz>(
    output: &mut String,
    intervals: &[Interval],
    stats: &Statistics,
    tz: &Tz,
) -> fmt::Result
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if intervals.is_empty() {
        writeln!(output, "{NO_DATA_NOTICE}")?;
        return Ok(());
    }

    let id_width = intervals
        .iter()
        .map(|i| i.id.to_string().len())
        .chain(std::iter::once(2))
        .max()
        .unwrap_or(2);
    let tag_width = intervals
        .iter()
        .map(|i| i.tag.chars().count())
        .chain(std::iter::once(3))
        .max()
        .unwrap_or(3);

    let header = format!(
        "{:<id_width$}  {:<19}  {:<19}  {:<tag_width$}  NOTES",
        "ID", "START", "END", "TAG"
    );
    writeln!(output, "{header}")?;
    for interval in intervals {
        let end = interval
            .end
            .map_or_else(|| "active".to_string(), |end| format_timestamp(end, tz));
        let line = format!(
            "{:<id_width$}  {:<19}  {:<19}  {:<tag_width$}  {}",
            interval.id,
            format_timestamp(interval.start, tz),
            end,
            interval.tag,
            interval.notes.as_deref().unwrap_or_default(),
        );
        writeln!(output, "{}", line.trim_end())?;
    }

    let totals = stats.totals();
    let label_width = stats
        .tags
        .iter()
        .map(|t| t.tag.chars().count())
        .max()
        .unwrap_or(0);

    writeln!(output)?;
    writeln!(output, "SUMMARY")?;
    writeln!(output, "───────")?;
    writeln!(
        output,
        "Total: {}  AVG: {}",
        format_hms(totals.total),
        format_minutes(totals.avg)
    )?;
    let averages = stats.average_by_tag();
    for (tag, total) in stats.sorted_duration_by_tag() {
        let average = averages.get(tag).copied().unwrap_or_default();
        writeln!(
            output,
            "{tag:<label_width$}  {}  AVG: {}",
            format_hms(total),
            format_minutes(average)
        )?;
    }

    Ok(())
}

/// Flattens intervals into export rows, header first.
///
/// Row order follows the input. Open intervals have an empty end field and
/// missing notes are empty strings.
pub fn to_rows<Tz>(intervals: &[Interval], tz: &Tz) -> Vec<Vec<String>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut rows = Vec::with_capacity(intervals.len() + 1);
    rows.push(EXPORT_HEADER.iter().map(|h| (*h).to_string()).collect());
    for interval in intervals {
        rows.push(vec![
            interval.id.to_string(),
            format_timestamp(interval.start, tz),
            interval
                .end
                .map(|end| format_timestamp(end, tz))
                .unwrap_or_default(),
            interval.tag.clone(),
            interval.notes.clone().unwrap_or_default(),
        ]);
    }
    rows
}
