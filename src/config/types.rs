//! Configuration types for meal-break auditing.
//!
//! This module contains the strongly-typed rule parameters and input schema
//! that every audit run receives explicitly, plus the profile structure that
//! is deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AuditError, AuditResult};

/// Default hour by which the first meal break must begin.
pub const DEFAULT_MEAL_DEADLINE_HOURS: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Default shift length at or below which no meal break is required.
pub const DEFAULT_WAIVER_LIMIT_HOURS: Decimal = Decimal::from_parts(6, 0, 0, false, 0);

/// Default minimum duration for a break to count as a meal break.
pub const DEFAULT_MIN_BREAK_MINUTES: u32 = 30;

/// Shift length above which a second meal break is required.
pub const SECOND_MEAL_THRESHOLD_HOURS: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Shift length above which a missing second meal cannot be waived.
pub const SECOND_MEAL_WAIVER_CEILING_HOURS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

const HOURS_RANGE: (Decimal, Decimal) = (
    Decimal::from_parts(4, 0, 0, false, 0),
    Decimal::from_parts(8, 0, 0, false, 0),
);
const MIN_BREAK_RANGE: (u32, u32) = (10, 60);

/// The evaluation parameters for one audit run.
///
/// The two second-meal thresholds are fixed by law and exposed as methods
/// rather than fields.
///
/// # Example
///
/// ```
/// use meal_audit::config::RuleConfig;
/// use rust_decimal::Decimal;
///
/// let rules = RuleConfig::default();
/// assert_eq!(rules.meal_deadline_hours, Decimal::new(5, 0));
/// assert_eq!(rules.waiver_limit_hours, Decimal::new(6, 0));
/// assert_eq!(rules.min_break_minutes, 30);
/// assert!(rules.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Hours after shift start by which the first meal break must begin.
    pub meal_deadline_hours: Decimal,
    /// Shifts at or below this many hours need no meal break.
    pub waiver_limit_hours: Decimal,
    /// Minimum break length, in minutes, for a break to count.
    pub min_break_minutes: u32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            meal_deadline_hours: DEFAULT_MEAL_DEADLINE_HOURS,
            waiver_limit_hours: DEFAULT_WAIVER_LIMIT_HOURS,
            min_break_minutes: DEFAULT_MIN_BREAK_MINUTES,
        }
    }
}

impl RuleConfig {
    /// Hours after shift start by which the second meal break must begin.
    pub fn second_meal_threshold_hours(&self) -> Decimal {
        SECOND_MEAL_THRESHOLD_HOURS
    }

    /// Shift length above which a missing second meal is non-waivable.
    pub fn second_meal_waiver_ceiling_hours(&self) -> Decimal {
        SECOND_MEAL_WAIVER_CEILING_HOURS
    }

    /// The minimum break length as a Decimal, for comparing against durations.
    pub fn min_break(&self) -> Decimal {
        Decimal::from(self.min_break_minutes)
    }

    /// Checks every adjustable parameter against its operator range.
    ///
    /// # Returns
    ///
    /// `InvalidRuleConfig` naming the first field outside its range:
    /// - `meal_deadline_hours`: 4.0 to 8.0
    /// - `waiver_limit_hours`: 4.0 to 8.0
    /// - `min_break_minutes`: 10 to 60
    pub fn validate(&self) -> AuditResult<()> {
        check_hours("meal_deadline_hours", self.meal_deadline_hours)?;
        check_hours("waiver_limit_hours", self.waiver_limit_hours)?;

        let (min, max) = MIN_BREAK_RANGE;
        if !(min..=max).contains(&self.min_break_minutes) {
            return Err(AuditError::InvalidRuleConfig {
                field: "min_break_minutes".to_string(),
                message: format!(
                    "must be between {} and {}, got {}",
                    min, max, self.min_break_minutes
                ),
            });
        }

        Ok(())
    }

    /// Returns a copy with any present overrides applied.
    ///
    /// The result is not validated; callers run [`RuleConfig::validate`] on it.
    pub fn with_overrides(&self, overrides: &RuleOverrides) -> Self {
        Self {
            meal_deadline_hours: overrides
                .meal_deadline_hours
                .unwrap_or(self.meal_deadline_hours),
            waiver_limit_hours: overrides
                .waiver_limit_hours
                .unwrap_or(self.waiver_limit_hours),
            min_break_minutes: overrides
                .min_break_minutes
                .unwrap_or(self.min_break_minutes),
        }
    }
}

fn check_hours(field: &str, value: Decimal) -> AuditResult<()> {
    let (min, max) = HOURS_RANGE;
    if value < min || value > max {
        return Err(AuditError::InvalidRuleConfig {
            field: field.to_string(),
            message: format!(
                "must be between {} and {} hours, got {}",
                min,
                max,
                value.normalize()
            ),
        });
    }
    Ok(())
}

/// Operator adjustments layered on top of a rule profile for a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOverrides {
    /// Replacement first-meal deadline, in hours.
    #[serde(default)]
    pub meal_deadline_hours: Option<Decimal>,
    /// Replacement waiver limit, in hours.
    #[serde(default)]
    pub waiver_limit_hours: Option<Decimal>,
    /// Replacement minimum break length, in minutes.
    #[serde(default)]
    pub min_break_minutes: Option<u32>,
}

/// A named, versioned rule set loaded from `config/profiles/*.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleProfile {
    /// Unique profile name (e.g., "california_standard").
    pub name: String,
    /// The version or effective date of the rule set.
    pub version: String,
    /// What distinguishes this rule set from the others.
    #[serde(default)]
    pub description: String,
    /// The rule parameters.
    pub rules: RuleConfig,
}

/// The unit the `Break Duration` column is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakDurationUnit {
    /// Values are minutes and are used as-is.
    Minutes,
    /// Values are decimal hours and are multiplied by 60.
    #[default]
    Hours,
}

impl BreakDurationUnit {
    /// Converts a duration in this unit to minutes.
    ///
    /// A value too large to convert yields zero minutes.
    pub fn to_minutes(self, value: Decimal) -> Decimal {
        match self {
            BreakDurationUnit::Minutes => value,
            BreakDurationUnit::Hours => value
                .checked_mul(Decimal::from(60))
                .unwrap_or(Decimal::ZERO),
        }
    }
}

/// Column names of the input table and how to read them.
///
/// # Example
///
/// ```
/// use meal_audit::config::{BreakDurationUnit, InputSchema};
///
/// let schema = InputSchema::default();
/// assert_eq!(schema.employee, "Employee");
/// assert_eq!(schema.break_duration_unit, BreakDurationUnit::Hours);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSchema {
    /// Employee identifier column.
    pub employee: String,
    /// Calendar date column (e.g. "Jul 04, 2025").
    pub date: String,
    /// Clock-in time-of-day column.
    pub time_in: String,
    /// Clock-out time-of-day column.
    pub time_out: String,
    /// Break start time-of-day column.
    pub break_start: String,
    /// Break end time-of-day column.
    pub break_end: String,
    /// Break duration column.
    pub break_duration: String,
    /// Regular hours column.
    pub regular_hours: String,
    /// Overtime hours column; preferred when present.
    pub overtime_hours: String,
    /// Total hours column; used to derive overtime when no overtime column exists.
    pub total_hours: String,
    /// Free-text anomaly flags column.
    pub anomalies: String,
    /// Unit of the break duration column.
    pub break_duration_unit: BreakDurationUnit,
}

impl Default for InputSchema {
    fn default() -> Self {
        Self {
            employee: "Employee".to_string(),
            date: "Date".to_string(),
            time_in: "Time In".to_string(),
            time_out: "Time Out".to_string(),
            break_start: "Break Start".to_string(),
            break_end: "Break End".to_string(),
            break_duration: "Break Duration".to_string(),
            regular_hours: "Regular Hours".to_string(),
            overtime_hours: "Estimated Overtime".to_string(),
            total_hours: "Total Hours".to_string(),
            anomalies: "Anomalies".to_string(),
            break_duration_unit: BreakDurationUnit::default(),
        }
    }
}

impl InputSchema {
    /// Columns that must be present in every input.
    pub fn required_columns(&self) -> [&str; 6] {
        [
            self.employee.as_str(),
            self.date.as_str(),
            self.time_in.as_str(),
            self.break_start.as_str(),
            self.break_duration.as_str(),
            self.regular_hours.as_str(),
        ]
    }
}
