//! Core domain logic for the punch time tracker.
//!
//! This crate contains the reporting engine:
//! - Filter resolution: turning `today`, `week`, date ranges and tags into predicates
//! - Report building: selecting and ordering intervals for display and export
//! - Statistics: totals, per-tag averages, standard deviation and spread
//! - Formatting: terminal tables and flat export rows
//!
//! Nothing here touches storage or the system clock; callers pass in the
//! records and the current time.

pub mod filter;
pub mod format;
mod interval;
pub mod report;
mod stats;

pub use filter::{Filter, FilterKind, Window};
pub use interval::{Interval, ValidationError, validate_bounds, validate_tag};
pub use report::{ReportQuery, generate_export_rows, generate_summary};
pub use stats::{Statistics, TagSpread, TagStats, Totals};
