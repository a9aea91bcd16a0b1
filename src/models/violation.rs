//! Violation and summary models.
//!
//! This module contains the [`Violation`] audit finding, the
//! [`ViolationKind`] enumeration and the per-employee [`EmployeeSummary`]
//! pivot row.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The category of a meal-break finding.
///
/// `MissedFirstMeal` and `LateFirstMeal` form the first-meal category;
/// `MissingSecondMeal` and `LateSecondMeal` form the second-meal category.
///
/// # Example
///
/// ```
/// use meal_audit::models::ViolationKind;
///
/// assert_eq!(ViolationKind::MissingSecondMeal.label(), "Missing 2nd Meal");
/// assert!(ViolationKind::LateFirstMeal.is_first_meal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// No qualifying break at all on a non-waived shift.
    MissedFirstMeal,
    /// The first qualifying break started after the deadline.
    LateFirstMeal,
    /// Fewer than two qualifying breaks on a shift over ten hours.
    MissingSecondMeal,
    /// The second qualifying break started after hour ten.
    LateSecondMeal,
}

impl ViolationKind {
    /// Every kind, in report column order.
    pub const ALL: [ViolationKind; 4] = [
        ViolationKind::MissedFirstMeal,
        ViolationKind::LateFirstMeal,
        ViolationKind::MissingSecondMeal,
        ViolationKind::LateSecondMeal,
    ];

    /// The column heading used in exported tables.
    pub fn label(self) -> &'static str {
        match self {
            ViolationKind::MissedFirstMeal => "Missed First Meal",
            ViolationKind::LateFirstMeal => "Late First Meal",
            ViolationKind::MissingSecondMeal => "Missing 2nd Meal",
            ViolationKind::LateSecondMeal => "Late 2nd Meal",
        }
    }

    /// Returns true for the first-meal category.
    pub fn is_first_meal(self) -> bool {
        matches!(
            self,
            ViolationKind::MissedFirstMeal | ViolationKind::LateFirstMeal
        )
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One audit finding for one employee on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The employee identifier.
    pub employee_id: String,
    /// The calendar day of the shift.
    pub date: NaiveDate,
    /// What rule was broken.
    pub kind: ViolationKind,
    /// Regular hours worked that day.
    pub regular_hours: Decimal,
    /// Overtime hours worked that day.
    pub overtime_hours: Decimal,
    /// Total hours worked that day.
    pub total_hours: Decimal,
    /// Human-readable explanation.
    pub detail: String,
}

/// Per-employee violation counts.
///
/// `total` always equals the sum of the four per-kind counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// The employee identifier.
    pub employee_id: String,
    /// Count of `MissedFirstMeal` findings.
    pub missed_first_meal: u32,
    /// Count of `LateFirstMeal` findings.
    pub late_first_meal: u32,
    /// Count of `MissingSecondMeal` findings.
    pub missing_second_meal: u32,
    /// Count of `LateSecondMeal` findings.
    pub late_second_meal: u32,
    /// Sum of all counts.
    pub total: u32,
}

impl EmployeeSummary {
    /// Creates an all-zero row for an employee.
    pub fn new(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            ..Self::default()
        }
    }

    /// Records one finding of the given kind.
    pub fn record(&mut self, kind: ViolationKind) {
        match kind {
            ViolationKind::MissedFirstMeal => self.missed_first_meal += 1,
            ViolationKind::LateFirstMeal => self.late_first_meal += 1,
            ViolationKind::MissingSecondMeal => self.missing_second_meal += 1,
            ViolationKind::LateSecondMeal => self.late_second_meal += 1,
        }
        self.total += 1;
    }

    /// Returns the count for one kind.
    pub fn count(&self, kind: ViolationKind) -> u32 {
        match kind {
            ViolationKind::MissedFirstMeal => self.missed_first_meal,
            ViolationKind::LateFirstMeal => self.late_first_meal,
            ViolationKind::MissingSecondMeal => self.missing_second_meal,
            ViolationKind::LateSecondMeal => self.late_second_meal,
        }
    }
}
