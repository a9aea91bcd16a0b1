//! Record normalization.
//!
//! This module turns raw input rows into typed [`TimeEntryRecord`]s. Parsing
//! is forgiving at the row level: unparsable timestamps become `None` and
//! unparsable numbers become zero. Only a missing column in the whole input
//! is fatal.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::{BreakDurationUnit, InputSchema};
use crate::error::{AuditError, AuditResult};
use crate::models::{RawRow, RawTable, TimeEntryRecord};

/// Date pattern of the `Date` column (e.g. "Jul 04, 2025").
pub const DATE_FORMAT: &str = "%b %d, %Y";

/// Pattern for a date joined with a 12-hour time of day (e.g. "Jul 04, 2025 08:00 AM").
pub const TIMESTAMP_FORMAT: &str = "%b %d, %Y %I:%M %p";

/// Largest magnitude accepted from an hour or duration cell. Anything
/// beyond it is treated like an unparsable value.
pub const MAX_CELL_MAGNITUDE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// The result of normalizing a whole input table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedInput {
    /// Records with a usable employee and date.
    pub records: Vec<TimeEntryRecord>,
    /// Number of rows dropped for lacking a usable employee or date.
    pub rows_dropped: usize,
}

/// Parses a `Date` cell.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Combines a date cell and a time-of-day cell into a timestamp.
///
/// # Examples
///
/// ```
/// use meal_audit::audit::parse_timestamp;
/// use chrono::NaiveDateTime;
///
/// let ts = parse_timestamp("Jul 04, 2025", "08:00 PM").unwrap();
/// assert_eq!(ts, NaiveDateTime::parse_from_str("2025-07-04 20:00:00", "%Y-%m-%d %H:%M:%S").unwrap());
///
/// assert!(parse_timestamp("Jul 04, 2025", "--").is_none());
/// ```
pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let combined = format!("{} {}", date.trim(), time.trim());
    NaiveDateTime::parse_from_str(&combined, TIMESTAMP_FORMAT).ok()
}

/// Coerces a numeric cell to a Decimal, with zero for missing,
/// unparsable or out-of-range values.
///
/// Values are bounded by [`MAX_CELL_MAGNITUDE`] so sums and unit
/// conversions further down the pipeline cannot overflow.
///
/// # Examples
///
/// ```
/// use meal_audit::audit::coerce_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(coerce_decimal(Some("7.5")), Decimal::new(75, 1));
/// assert_eq!(coerce_decimal(Some("n/a")), Decimal::ZERO);
/// assert_eq!(coerce_decimal(None), Decimal::ZERO);
/// assert_eq!(coerce_decimal(Some("79228162514264337593543950335")), Decimal::ZERO);
/// ```
pub fn coerce_decimal(value: Option<&str>) -> Decimal {
    let Some(value) = value.map(str::trim) else {
        return Decimal::ZERO;
    };

    Decimal::from_str(value)
        .ok()
        .or_else(|| {
            value
                .parse::<f64>()
                .ok()
                .and_then(|f| Decimal::try_from(f).ok())
        })
        .filter(|d| d.abs() <= MAX_CELL_MAGNITUDE)
        .unwrap_or(Decimal::ZERO)
}

/// Converts a `Break Duration` cell to minutes.
///
/// Non-numeric values, including text sentinels such as "MISSED", count as
/// zero minutes and so never qualify as a meal break.
pub fn parse_break_minutes(value: Option<&str>, unit: BreakDurationUnit) -> Decimal {
    unit.to_minutes(coerce_decimal(value))
}

/// Splits a free-text `Anomalies` cell into upper-cased flags.
pub fn parse_anomalies(value: Option<&str>) -> BTreeSet<String> {
    value
        .map(|text| {
            text.split([',', ';', '|'])
                .map(|flag| flag.trim().to_uppercase())
                .filter(|flag| !flag.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Checks that the input carries every column the normalizer depends on.
///
/// Overtime may come from either the overtime column or the total-hours
/// column; at least one must be present.
pub fn validate_columns(table: &RawTable, schema: &InputSchema) -> AuditResult<()> {
    for column in schema.required_columns() {
        if !table.has_column(column) {
            return Err(AuditError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    if !table.has_column(&schema.overtime_hours) && !table.has_column(&schema.total_hours) {
        return Err(AuditError::MissingColumn {
            column: format!("{} or {}", schema.overtime_hours, schema.total_hours),
        });
    }

    Ok(())
}

/// Normalizes one raw row.
///
/// Returns `None` when the row has no employee or no parsable date.
pub fn normalize_row(row: &RawRow, schema: &InputSchema) -> Option<TimeEntryRecord> {
    let employee_id = row.get(&schema.employee)?;
    let date_str = row.get(&schema.date)?;
    let date = parse_date(date_str)?;

    let timestamp = |column: &str| row.get(column).and_then(|t| parse_timestamp(date_str, t));

    let regular_hours = coerce_decimal(row.get(&schema.regular_hours));
    let overtime_hours = match row.get(&schema.overtime_hours) {
        Some(value) => coerce_decimal(Some(value)),
        None => {
            let total = coerce_decimal(row.get(&schema.total_hours));
            total
                .checked_sub(regular_hours)
                .unwrap_or(Decimal::ZERO)
                .max(Decimal::ZERO)
        }
    };

    Some(TimeEntryRecord {
        employee_id: employee_id.to_string(),
        date,
        clock_in: timestamp(&schema.time_in),
        clock_out: timestamp(&schema.time_out),
        break_start: timestamp(&schema.break_start),
        break_duration_minutes: parse_break_minutes(
            row.get(&schema.break_duration),
            schema.break_duration_unit,
        ),
        regular_hours,
        overtime_hours,
        anomalies: parse_anomalies(row.get(&schema.anomalies)),
    })
}

/// Normalizes a whole input table.
///
/// # Returns
///
/// `MissingColumn` if the header lacks a required column; otherwise every
/// row that has a usable employee and date, plus a count of the rest.
pub fn normalize_table(table: &RawTable, schema: &InputSchema) -> AuditResult<NormalizedInput> {
    if let Err(err) = validate_columns(table, schema) {
        warn!(error = %err, "Rejecting input before aggregation");
        return Err(err);
    }

    let mut records = Vec::with_capacity(table.rows.len());
    let mut rows_dropped = 0;

    for row in &table.rows {
        match normalize_row(row, schema) {
            Some(record) => records.push(record),
            None => rows_dropped += 1,
        }
    }

    debug!(
        rows = table.rows.len(),
        records = records.len(),
        rows_dropped,
        "Normalized input rows"
    );

    Ok(NormalizedInput {
        records,
        rows_dropped,
    })
}
