//! Filter resolution.
//!
//! Turns a filter expression (`today`, `yesterday`, `week`, `month`, `all`,
//! `YYYY-MM-DD` or `YYYY-MM-DD..YYYY-MM-DD`) plus an optional tag into a
//! concrete time window and a predicate over [`Interval`]s.
//!
//! Resolution never fails. Expressions that are not understood, including
//! well-shaped but impossible dates, resolve to a filter that matches nothing.
//! Everything is computed relative to an injected `now`, whose timezone also
//! decides where day boundaries fall.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, TimeZone};
use regex::Regex;

use crate::Interval;

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})\.\.(\d{4}-\d{2}-\d{2})$").unwrap()
});

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// The parsed shape of a filter expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Today,
    Yesterday,
    Week,
    Month,
    /// A single calendar day.
    Date(NaiveDate),
    /// An inclusive range of calendar days.
    Range(NaiveDate, NaiveDate),
    All,
    Unrecognized,
}

impl FilterKind {
    /// Parses a filter expression. Unknown input becomes [`FilterKind::Unrecognized`].
    pub fn parse(expr: &str) -> Self {
        let expr = expr.trim();
        match expr {
            "today" => Self::Today,
            "yesterday" => Self::Yesterday,
            "week" => Self::Week,
            "month" => Self::Month,
            "all" => Self::All,
            _ => {
                if let Some(caps) = RANGE_RE.captures(expr) {
                    return match (parse_date(&caps[1]), parse_date(&caps[2])) {
                        (Some(first), Some(last)) => Self::Range(first, last),
                        _ => Self::Unrecognized,
                    };
                }
                if DATE_RE.is_match(expr) {
                    return parse_date(expr).map_or(Self::Unrecognized, Self::Date);
                }
                Self::Unrecognized
            }
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// A half-open `[start, end)` window in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// No time restriction.
    All,
    Between { start: i64, end: i64 },
    /// Matches no timestamp at all.
    Nothing,
}

impl Window {
    pub const fn contains(&self, timestamp: i64) -> bool {
        match *self {
            Self::All => true,
            Self::Between { start, end } => timestamp >= start && timestamp < end,
            Self::Nothing => false,
        }
    }
}

/// A resolved filter: a time window plus an optional exact tag match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    kind: FilterKind,
    window: Window,
    tag: Option<String>,
}

impl Filter {
    /// Resolves a filter expression against `now`.
    pub fn resolve<Tz: TimeZone>(expr: &str, tag: Option<&str>, now: &DateTime<Tz>) -> Self {
        Self::from_kind(FilterKind::parse(expr), tag, now)
    }

    /// Resolves an already-parsed filter kind against `now`.
    pub fn from_kind<Tz: TimeZone>(kind: FilterKind, tag: Option<&str>, now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();

        let window = match kind {
            FilterKind::Today => day_window(&tz, today, today),
            FilterKind::Yesterday => today
                .pred_opt()
                .map_or(Window::Nothing, |yesterday| day_window(&tz, yesterday, yesterday)),
            FilterKind::Week => {
                let days_since_monday = today.weekday().num_days_from_monday();
                let monday = today - Duration::days(i64::from(days_since_monday));
                window_until_now(&tz, monday, now)
            }
            FilterKind::Month => today
                .with_day(1)
                .map_or(Window::Nothing, |first| window_until_now(&tz, first, now)),
            FilterKind::Date(date) => day_window(&tz, date, date),
            FilterKind::Range(first, last) => day_window(&tz, first, last),
            FilterKind::All => Window::All,
            FilterKind::Unrecognized => Window::Nothing,
        };

        Self {
            kind,
            window,
            tag: tag.map(str::to_string),
        }
    }

    pub const fn kind(&self) -> FilterKind {
        self.kind
    }

    pub const fn window(&self) -> Window {
        self.window
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns `true` if the interval belongs in a report for this filter.
    ///
    /// Soft-deleted intervals never match. Window membership is decided by
    /// the interval's start.
    pub fn matches(&self, interval: &Interval) -> bool {
        !interval.deleted
            && self.window.contains(interval.start)
            && self.tag.as_deref().is_none_or(|tag| tag == interval.tag)
    }
}

/// Epoch seconds of local midnight on `date` in `tz`.
/// Ambiguous midnights pick the earlier instant; a DST gap at midnight uses 01:00.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<i64> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.timestamp()),
        LocalResult::None => {
            let one_am = date.and_hms_opt(1, 0, 0)?;
            tz.from_local_datetime(&one_am)
                .earliest()
                .map(|dt| dt.timestamp())
        }
    }
}

/// Whole days from `first` through `last`, inclusive.
fn day_window<Tz: TimeZone>(tz: &Tz, first: NaiveDate, last: NaiveDate) -> Window {
    let Some(after_last) = last.succ_opt() else {
        return Window::Nothing;
    };
    match (local_midnight(tz, first), local_midnight(tz, after_last)) {
        (Some(start), Some(end)) => Window::Between { start, end },
        _ => Window::Nothing,
    }
}

/// From midnight on `first` up to and including `now`.
fn window_until_now<Tz: TimeZone>(tz: &Tz, first: NaiveDate, now: &DateTime<Tz>) -> Window {
    local_midnight(tz, first).map_or(Window::Nothing, |start| Window::Between {
        start,
        end: now.timestamp() + 1,
    })
}
