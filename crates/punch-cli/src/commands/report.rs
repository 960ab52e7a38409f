//! Report command for generating time reports.
//!
//! This module implements `punch report [FILTER]` with an optional tag
//! restriction, human-readable or JSON output, and CSV export.

use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use clap::Args;
use punch_core::report::build;
use punch_core::{
    Filter, Interval, ReportQuery, Statistics, Totals, generate_export_rows, generate_summary,
};
use serde::Serialize;

use super::util::open_database;
use crate::Config;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Period to report: today, yesterday, week, month, all, YYYY-MM-DD or
    /// YYYY-MM-DD..YYYY-MM-DD. Defaults to the configured filter.
    pub filter: Option<String>,

    /// Only include intervals with exactly this tag.
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Also write the matching intervals to this CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Output statistics as JSON.
    #[arg(long)]
    pub json: bool,
}

impl ReportArgs {
    fn query(&self, config: &Config) -> ReportQuery {
        let filter = self
            .filter
            .clone()
            .unwrap_or_else(|| config.default_filter.clone());
        ReportQuery::new(filter, self.tag.clone())
    }
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub generated_at: String,
    pub timezone: String,
    pub filter: String,
    pub tag: Option<String>,
    pub intervals: Vec<Interval>,
    pub totals: Totals,
    pub statistics: Statistics,
}

/// Formats the filtered intervals and their statistics as JSON.
pub fn format_report_json<Tz: TimeZone>(
    intervals: &[Interval],
    query: &ReportQuery,
    now: &DateTime<Tz>,
) -> Result<String> {
    let filter = Filter::resolve(&query.filter, query.tag.as_deref(), now);
    let filtered = build(intervals, &filter);
    let statistics = Statistics::compute(&filtered);

    let report = JsonReport {
        generated_at: now.with_timezone(&Utc).to_rfc3339(),
        timezone: iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string()),
        filter: query.filter.clone(),
        tag: query.tag.clone(),
        intervals: filtered,
        totals: statistics.totals(),
        statistics,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== CSV Export ==========

fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Joins export rows into CSV text, one line per row.
pub fn to_csv(rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    for row in rows {
        let fields: Vec<String> = row.iter().map(|f| csv_escape(f)).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

fn write_csv(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    std::fs::write(path, to_csv(rows))
        .with_context(|| format!("failed to write CSV to {}", path.display()))
}

// ========== Public Interface ==========

/// Runs the report command.
pub fn run<W, Tz>(writer: &mut W, args: &ReportArgs, config: &Config, now: &DateTime<Tz>) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let query = args.query(config);
    let db = open_database(config)?;
    let intervals = db.list_intervals()?;
    tracing::debug!(filter = %query.filter, tag = ?query.tag, records = intervals.len(), "generating report");

    if args.json {
        writeln!(writer, "{}", format_report_json(&intervals, &query, now)?)?;
    } else {
        write!(writer, "{}", generate_summary(&intervals, &query, now))?;
    }

    if let Some(path) = &args.csv {
        let rows = generate_export_rows(&intervals, &query, now);
        write_csv(path, &rows)?;
        tracing::info!(path = %path.display(), rows = rows.len() - 1, "exported CSV");
        writeln!(
            writer,
            "Exported {} intervals to {}",
            rows.len() - 1,
            path.display()
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use punch_db::Database;

    use crate::commands::util::test_support::config_for;

    fn at(d: u32, h: u32, m: u32) -> i64 {
        Utc.with_ymd_and_hms(2025, 1, d, h, m, 0).unwrap().timestamp()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 29, 18, 0, 0).unwrap()
    }

    fn args(filter: Option<&str>) -> ReportArgs {
        ReportArgs {
            filter: filter.map(str::to_string),
            tag: None,
            csv: None,
            json: false,
        }
    }

    /// Seeds yesterday's work, today's work and meeting, plus a cancelled interval.
    fn seed(db: &Database) {
        let id = db.start_interval("work", None, at(28, 9, 0)).unwrap();
        db.stop_interval(id, at(28, 11, 0), None).unwrap();
        let id = db.start_interval("work", Some("api"), at(29, 9, 0)).unwrap();
        db.stop_interval(id, at(29, 10, 0), None).unwrap();
        let id = db.start_interval("meeting", Some("planning, Q1"), at(29, 11, 0)).unwrap();
        db.stop_interval(id, at(29, 12, 0), None).unwrap();
        let id = db.start_interval("work", None, at(29, 13, 0)).unwrap();
        db.soft_delete(id).unwrap();
    }

    #[test]
    fn report_today_uses_default_filter() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_for(temp.path());
        seed(&Database::open(&config.database_path).unwrap());

        let mut output = Vec::new();
        run(&mut output, &args(None), &config, &now()).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        ID  START                END                  TAG      NOTES
        3   2025-01-29 11:00:00  2025-01-29 12:00:00  meeting  planning, Q1
        2   2025-01-29 09:00:00  2025-01-29 10:00:00  work     api

        SUMMARY
        ───────
        Total: 02:00:00  AVG: 60.0min
        meeting  01:00:00  AVG: 60.0min
        work     01:00:00  AVG: 60.0min
        ");
    }

    #[test]
    fn report_filters_by_tag() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_for(temp.path());
        seed(&Database::open(&config.database_path).unwrap());

        let mut report_args = args(Some("week"));
        report_args.tag = Some("work".to_string());
        let mut output = Vec::new();
        run(&mut output, &report_args, &config, &now()).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(!output.contains("meeting"));
        assert!(output.contains("Total: 03:00:00  AVG: 90.0min"));
        let api = output.find("api").unwrap();
        let yesterday = output.find("2025-01-28 09:00:00").unwrap();
        assert!(api < yesterday, "most recent interval should come first");
    }

    #[test]
    fn report_unknown_filter_prints_notice() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_for(temp.path());
        seed(&Database::open(&config.database_path).unwrap());

        let mut output = Vec::new();
        run(&mut output, &args(Some("invalid_filter")), &config, &now()).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output, "No tracked time found for the specified filter\n");
    }

    #[test]
    fn report_writes_csv() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_for(temp.path());
        seed(&Database::open(&config.database_path).unwrap());

        let csv_path = temp.path().join("today.csv");
        let mut report_args = args(Some("today"));
        report_args.csv = Some(csv_path.clone());
        let mut output = Vec::new();
        run(&mut output, &report_args, &config, &now()).unwrap();

        let csv = std::fs::read_to_string(&csv_path).unwrap();
        assert_snapshot!(csv, @r#"
        ID,Start,End,Tag,Notes
        3,2025-01-29 11:00:00,2025-01-29 12:00:00,meeting,"planning, Q1"
        2,2025-01-29 09:00:00,2025-01-29 10:00:00,work,api
        "#);

        let output = String::from_utf8(output).unwrap();
        assert!(output.ends_with(&format!("Exported 2 intervals to {}\n", csv_path.display())));
    }

    #[test]
    fn report_writes_header_only_csv_when_empty() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_for(temp.path());

        let csv_path = temp.path().join("empty.csv");
        let mut report_args = args(Some("today"));
        report_args.csv = Some(csv_path.clone());
        let mut output = Vec::new();
        run(&mut output, &report_args, &config, &now()).unwrap();

        assert_eq!(
            std::fs::read_to_string(&csv_path).unwrap(),
            "ID,Start,End,Tag,Notes\n"
        );
        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("No tracked time found for the specified filter\n"));
    }

    #[test]
    fn report_json_output() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_for(temp.path());
        seed(&Database::open(&config.database_path).unwrap());

        let mut report_args = args(Some("today"));
        report_args.json = true;
        let mut output = Vec::new();
        run(&mut output, &report_args, &config, &now()).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["filter"], "today");
        assert_eq!(json["generated_at"], "2025-01-29T18:00:00+00:00");
        assert_eq!(json["totals"]["total"], 7200);
        assert_eq!(json["totals"]["avg"], 3600.0);
        assert_eq!(json["intervals"].as_array().unwrap().len(), 2);
        // tags keep first-seen order over the most-recent-first list
        assert_eq!(json["statistics"]["tags"][0]["tag"], "meeting");
        assert_eq!(json["statistics"]["tags"][1]["tag"], "work");
    }

    #[test]
    fn csv_escape_quotes_special_fields() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
    }
}
