//! Shift-day model.
//!
//! A [`ShiftDay`] is the reconstructed workday for one employee, built from
//! every punch segment filed on that calendar day.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::time_entry::mentions_missed_break;

/// The aggregated work record for one employee on one calendar day.
///
/// Only groups with at least one parsable clock-in become a `ShiftDay`, so
/// `shift_start` is always defined.
///
/// # Example
///
/// ```
/// use meal_audit::models::ShiftDay;
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let day = ShiftDay {
///     employee_id: "Ana".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
///     shift_start: NaiveDateTime::parse_from_str("2025-07-04 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     total_hours: Decimal::new(8, 0),
///     regular_hours: Decimal::new(8, 0),
///     overtime_hours: Decimal::ZERO,
///     valid_breaks: vec![],
///     anomalies: Default::default(),
///     record_count: 1,
/// };
/// assert!(day.valid_breaks.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDay {
    /// The employee identifier.
    pub employee_id: String,
    /// The calendar day of the shift.
    pub date: NaiveDate,
    /// Earliest clock-in across the day's records.
    pub shift_start: NaiveDateTime,
    /// Regular plus overtime hours.
    pub total_hours: Decimal,
    /// Summed regular hours.
    pub regular_hours: Decimal,
    /// Summed overtime hours.
    pub overtime_hours: Decimal,
    /// Start times of qualifying meal breaks, ascending, none before `shift_start`.
    pub valid_breaks: Vec<NaiveDateTime>,
    /// Union of the records' anomaly flags.
    #[serde(default)]
    pub anomalies: BTreeSet<String>,
    /// Number of punch segments merged into this day.
    pub record_count: usize,
}

impl ShiftDay {
    /// Returns true when any source record flagged a missed break.
    pub fn flags_missed_break(&self) -> bool {
        mentions_missed_break(&self.anomalies)
    }
}
