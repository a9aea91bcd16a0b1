//! Normalized time-entry record.
//!
//! This module defines [`TimeEntryRecord`], one typed clock punch or segment
//! produced by the normalizer from a raw input row.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The anomaly flag a time-tracking export uses for a skipped break.
pub const MISSED_BREAK_FLAG: &str = "MISSED BREAK";

/// One clock punch or segment with parsed timestamps and coerced numerics.
///
/// Timestamps are `None` when the source value could not be parsed. Hour
/// and minute values default to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntryRecord {
    /// The employee identifier.
    pub employee_id: String,
    /// The calendar date the source system filed this record under.
    pub date: NaiveDate,
    /// Clock-in timestamp.
    pub clock_in: Option<NaiveDateTime>,
    /// Clock-out timestamp.
    pub clock_out: Option<NaiveDateTime>,
    /// Recorded break start, on the record's own date.
    pub break_start: Option<NaiveDateTime>,
    /// Recorded break length in minutes.
    pub break_duration_minutes: Decimal,
    /// Regular hours supplied by the source system.
    pub regular_hours: Decimal,
    /// Overtime hours supplied by the source system.
    pub overtime_hours: Decimal,
    /// Upper-cased anomaly flags.
    #[serde(default)]
    pub anomalies: BTreeSet<String>,
}

impl TimeEntryRecord {
    /// The calendar day this record belongs to: the clock-in day when known,
    /// otherwise the source date.
    pub fn work_date(&self) -> NaiveDate {
        self.clock_in.map(|t| t.date()).unwrap_or(self.date)
    }

    /// Returns true when the source flagged this record as a missed break.
    pub fn flags_missed_break(&self) -> bool {
        mentions_missed_break(&self.anomalies)
    }
}

/// Anomaly text is free-form, so the token may sit inside a longer flag.
pub(crate) fn mentions_missed_break(anomalies: &BTreeSet<String>) -> bool {
    anomalies.iter().any(|flag| flag.contains(MISSED_BREAK_FLAG))
}
