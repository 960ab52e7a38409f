//! Report building: filter, order, aggregate and render.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

use crate::format::{to_rows, to_table};
use crate::{Filter, Interval, Statistics};

/// Per-call report options, resolved before the report is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    /// Filter expression such as `today` or `2025-01-01..2025-01-31`.
    pub filter: String,
    /// Exact tag to restrict the report to.
    pub tag: Option<String>,
}

impl ReportQuery {
    pub fn new(filter: impl Into<String>, tag: Option<String>) -> Self {
        Self {
            filter: filter.into(),
            tag,
        }
    }

    fn resolve<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Filter {
        Filter::resolve(&self.filter, self.tag.as_deref(), now)
    }
}

/// Returns the intervals matching `filter`, most recent start first.
///
/// The input is left untouched; equal starts keep their input order.
pub fn build(intervals: &[Interval], filter: &Filter) -> Vec<Interval> {
    let mut matched: Vec<Interval> = intervals
        .iter()
        .filter(|interval| filter.matches(interval))
        .cloned()
        .collect();
    matched.sort_by_key(|interval| std::cmp::Reverse(interval.start));

    tracing::debug!(
        candidates = intervals.len(),
        matched = matched.len(),
        kind = ?filter.kind(),
        "built report"
    );
    matched
}

/// Builds the terminal report for `query`.
pub fn generate_summary<Tz>(intervals: &[Interval], query: &ReportQuery, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let filtered = build(intervals, &query.resolve(now));
    let stats = Statistics::compute(&filtered);
    to_table(&filtered, &stats, &now.timezone())
}

/// Builds the export rows for `query`, header first.
pub fn generate_export_rows<Tz>(
    intervals: &[Interval],
    query: &ReportQuery,
    now: &DateTime<Tz>,
) -> Vec<Vec<String>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let filtered = build(intervals, &query.resolve(now));
    to_rows(&filtered, &now.timezone())
}
