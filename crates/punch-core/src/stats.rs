//! Aggregate statistics over a filtered set of intervals.
//!
//! Only closed intervals count: an open interval is still shown in reports
//! but contributes nothing to any duration figure. Tags keep the order in
//! which they were first seen, which is also the tie-break order when tags
//! are ranked by duration.

use std::collections::HashMap;

use serde::Serialize;

use crate::Interval;

/// Totals and spread for one tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagStats {
    pub tag: String,
    /// Summed duration in seconds.
    pub total: i64,
    /// Number of closed intervals counted.
    pub count: usize,
    /// Mean duration in seconds.
    pub average: f64,
    /// Population standard deviation of durations, in seconds.
    pub std_dev: f64,
    pub min: i64,
    pub max: i64,
}

/// Min, max and mean of the per-interval durations of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TagSpread {
    pub min: i64,
    pub max: i64,
    pub mean: f64,
}

/// Overall total and average duration, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub total: i64,
    pub avg: f64,
}

/// Statistics derived from a list of intervals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_duration: i64,
    /// Number of closed intervals that were counted.
    pub counted: usize,
    /// Per-tag figures in first-seen order.
    pub tags: Vec<TagStats>,
}

impl Statistics {
    /// Computes statistics for `intervals`.
    ///
    /// The input is expected to be filtered already; open intervals are skipped.
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(intervals: &[Interval]) -> Self {
        let mut order: Vec<&str> = Vec::new();
        let mut durations: HashMap<&str, Vec<i64>> = HashMap::new();

        for interval in intervals {
            let Some(duration) = interval.duration() else {
                continue;
            };
            durations
                .entry(interval.tag.as_str())
                .or_insert_with(|| {
                    order.push(interval.tag.as_str());
                    Vec::new()
                })
                .push(duration);
        }

        let tags: Vec<TagStats> = order
            .into_iter()
            .filter_map(|tag| durations.get(tag).map(|values| tag_stats(tag, values)))
            .collect();

        let total_duration = tags.iter().map(|t| t.total).sum();
        let counted = tags.iter().map(|t| t.count).sum();

        tracing::debug!(
            intervals = intervals.len(),
            counted,
            tags = tags.len(),
            "computed statistics"
        );

        Self {
            total_duration,
            counted,
            tags,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counted == 0
    }

    /// Summed duration per tag.
    pub fn duration_by_tag(&self) -> HashMap<&str, i64> {
        self.tags.iter().map(|t| (t.tag.as_str(), t.total)).collect()
    }

    /// Mean duration per tag.
    pub fn average_by_tag(&self) -> HashMap<&str, f64> {
        self.tags.iter().map(|t| (t.tag.as_str(), t.average)).collect()
    }

    /// Population standard deviation per tag.
    pub fn standard_deviation_by_tag(&self) -> HashMap<&str, f64> {
        self.tags.iter().map(|t| (t.tag.as_str(), t.std_dev)).collect()
    }

    /// Min, max and mean per tag.
    pub fn additional_stats_by_tag(&self) -> HashMap<&str, TagSpread> {
        self.tags
            .iter()
            .map(|t| {
                let spread = TagSpread {
                    min: t.min,
                    max: t.max,
                    mean: t.average,
                };
                (t.tag.as_str(), spread)
            })
            .collect()
    }

    /// `(tag, total)` pairs by descending total; equal totals keep first-seen order.
    pub fn sorted_duration_by_tag(&self) -> Vec<(&str, i64)> {
        let mut sorted: Vec<(&str, i64)> =
            self.tags.iter().map(|t| (t.tag.as_str(), t.total)).collect();
        // sort_by_key is stable
        sorted.sort_by_key(|&(_, total)| std::cmp::Reverse(total));
        sorted
    }

    /// Overall total and the average across every counted interval.
    #[allow(clippy::cast_precision_loss)]
    pub fn totals(&self) -> Totals {
        let avg = if self.counted == 0 {
            0.0
        } else {
            self.total_duration as f64 / self.counted as f64
        };
        Totals {
            total: self.total_duration,
            avg,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn tag_stats(tag: &str, durations: &[i64]) -> TagStats {
    let total: i64 = durations.iter().sum();
    let count = durations.len();
    let average = total as f64 / count as f64;
    let variance = durations
        .iter()
        .map(|&d| (d as f64 - average).powi(2))
        .sum::<f64>()
        / count as f64;

    TagStats {
        tag: tag.to_string(),
        total,
        count,
        average,
        std_dev: variance.sqrt(),
        min: durations.iter().copied().min().unwrap_or_default(),
        max: durations.iter().copied().max().unwrap_or_default(),
    }
}
