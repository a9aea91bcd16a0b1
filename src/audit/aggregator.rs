//! Shift aggregation.
//!
//! This module groups normalized records into one [`ShiftDay`] per employee
//! and calendar day. Hour totals are summed from the source system's values
//! rather than re-derived from clock deltas, because a day with several
//! punch segments (double clock-outs) makes deltas unreliable.
//!
//! Break start times are re-anchored on the shift's start date. A break
//! whose clock time falls before the shift start is taken to be on the
//! following day, so a 02:00 AM break in a shift that began at 8:00 PM
//! resolves to the next morning.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::RuleConfig;
use crate::models::{ShiftDay, TimeEntryRecord};

/// The result of grouping records into shift-days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationResult {
    /// Auditable shift-days ordered by employee and date.
    pub shift_days: Vec<ShiftDay>,
    /// (employee, day) groups with no parsable clock-in.
    pub unauditable: Vec<(String, NaiveDate)>,
}

/// Resolves a break's clock time against the shift start.
///
/// The time of day is placed on the shift's start date; if that lands
/// before the shift started, it is moved forward one day.
///
/// # Examples
///
/// ```
/// use meal_audit::audit::resolve_break_time;
/// use chrono::{NaiveDateTime, NaiveTime};
///
/// let start = NaiveDateTime::parse_from_str("2025-07-04 20:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let resolved = resolve_break_time(start, NaiveTime::from_hms_opt(2, 0, 0).unwrap());
/// assert_eq!(resolved.to_string(), "2025-07-05 02:00:00");
/// ```
pub fn resolve_break_time(shift_start: NaiveDateTime, break_time: NaiveTime) -> NaiveDateTime {
    let anchored = shift_start.date().and_time(break_time);
    if anchored < shift_start {
        anchored + Duration::days(1)
    } else {
        anchored
    }
}

/// Groups records by (employee, work date) and builds a [`ShiftDay`] for
/// each group with at least one clock-in.
///
/// # Arguments
///
/// * `records` - Normalized records, in any order
/// * `config` - Supplies the minimum break length for a break to count
///
/// # Returns
///
/// Shift-days ordered by employee then date, and the keys of groups that
/// could not be audited because no record had a clock-in.
pub fn aggregate_shift_days(records: &[TimeEntryRecord], config: &RuleConfig) -> AggregationResult {
    let mut groups: BTreeMap<(String, NaiveDate), Vec<&TimeEntryRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.employee_id.clone(), record.work_date()))
            .or_default()
            .push(record);
    }

    let mut result = AggregationResult::default();
    let min_break = config.min_break();

    for ((employee_id, date), group) in groups {
        match build_shift_day(&employee_id, date, &group, min_break) {
            Some(day) => result.shift_days.push(day),
            None => result.unauditable.push((employee_id, date)),
        }
    }

    debug!(
        records = records.len(),
        shift_days = result.shift_days.len(),
        unauditable = result.unauditable.len(),
        "Aggregated shift-days"
    );

    result
}

fn build_shift_day(
    employee_id: &str,
    date: NaiveDate,
    group: &[&TimeEntryRecord],
    min_break: Decimal,
) -> Option<ShiftDay> {
    let shift_start = group.iter().filter_map(|r| r.clock_in).min()?;

    let regular_hours = sum_hours(group.iter().map(|r| r.regular_hours));
    let overtime_hours = sum_hours(group.iter().map(|r| r.overtime_hours));

    let mut valid_breaks: Vec<NaiveDateTime> = group
        .iter()
        .filter(|r| r.break_duration_minutes >= min_break)
        .filter_map(|r| r.break_start)
        .map(|start| resolve_break_time(shift_start, start.time()))
        .collect();
    valid_breaks.sort();

    let anomalies: BTreeSet<String> = group
        .iter()
        .flat_map(|r| r.anomalies.iter().cloned())
        .collect();

    Some(ShiftDay {
        employee_id: employee_id.to_string(),
        date,
        shift_start,
        total_hours: regular_hours.saturating_add(overtime_hours),
        regular_hours,
        overtime_hours,
        valid_breaks,
        anomalies,
        record_count: group.len(),
    })
}

fn sum_hours(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}
