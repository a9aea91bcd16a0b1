//! Meal-break rule evaluation.
//!
//! This module applies the rule ladder to one [`ShiftDay`]:
//!
//! 1. Waiver: shifts of `waiver_limit_hours` or less need no break.
//! 2. First meal: a qualifying break must start no later than
//!    `meal_deadline_hours` after shift start.
//! 3. Second meal: shifts over 10 hours need a second qualifying break
//!    starting no later than hour 10.
//!
//! The first- and second-meal checks are independent, so a day can produce
//! one finding from each. Deadlines are inclusive: a break starting exactly
//! at the deadline is on time.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::RuleConfig;
use crate::models::{ShiftDay, Violation, ViolationKind};

const CLOCK_FORMAT: &str = "%-I:%M %p";
const MAX_OFFSET_SECONDS: i64 = 10 * 365 * 24 * 3600;

/// Evaluates one shift-day against the rules.
///
/// Pure and total: the same day and rules always produce the same findings.
///
/// # Arguments
///
/// * `day` - The shift-day to audit
/// * `config` - The rule parameters for this run
///
/// # Returns
///
/// Zero, one or two violations: at most one first-meal finding
/// (`MissedFirstMeal` or `LateFirstMeal`) followed by at most one
/// second-meal finding (`MissingSecondMeal` or `LateSecondMeal`).
///
/// # Examples
///
/// ```
/// use meal_audit::audit::evaluate_shift_day;
/// use meal_audit::config::RuleConfig;
/// use meal_audit::models::{ShiftDay, ViolationKind};
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
///
/// let violations = evaluate_shift_day(&day, &RuleConfig::default());
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations[0].kind, ViolationKind::MissedFirstMeal);
/// ```
pub fn evaluate_shift_day(day: &ShiftDay, config: &RuleConfig) -> Vec<Violation> {
    let mut violations = Vec::new();

    if day.total_hours <= config.waiver_limit_hours {
        return violations;
    }

    if let Some((kind, detail)) = check_first_meal(day, config) {
        violations.push(make_violation(day, kind, detail));
    }

    if let Some((kind, detail)) = check_second_meal(day, config) {
        violations.push(make_violation(day, kind, detail));
    }

    violations
}

fn check_first_meal(day: &ShiftDay, config: &RuleConfig) -> Option<(ViolationKind, String)> {
    let deadline = offset(day.shift_start, config.meal_deadline_hours);

    match day.valid_breaks.first() {
        None => {
            let mut detail = format!(
                "No meal break of at least {} minutes during {} hours worked; first meal was due by {} (hour {})",
                config.min_break_minutes,
                day.total_hours.normalize(),
                deadline.format(CLOCK_FORMAT),
                config.meal_deadline_hours.normalize()
            );
            if day.flags_missed_break() {
                detail.push_str(" [source flagged MISSED BREAK]");
            }
            Some((ViolationKind::MissedFirstMeal, detail))
        }
        Some(first) if *first > deadline => Some((
            ViolationKind::LateFirstMeal,
            format!(
                "First meal break started at {}, after the {} deadline (hour {})",
                first.format(CLOCK_FORMAT),
                deadline.format(CLOCK_FORMAT),
                config.meal_deadline_hours.normalize()
            ),
        )),
        Some(_) => None,
    }
}

fn check_second_meal(day: &ShiftDay, config: &RuleConfig) -> Option<(ViolationKind, String)> {
    let threshold = config.second_meal_threshold_hours();
    if day.total_hours <= threshold {
        return None;
    }

    let deadline = offset(day.shift_start, threshold);

    match day.valid_breaks.get(1) {
        None => {
            let waiver = if day.total_hours <= config.second_meal_waiver_ceiling_hours() {
                "waivable"
            } else {
                "non-waivable"
            };
            Some((
                ViolationKind::MissingSecondMeal,
                format!(
                    "{} qualifying meal break(s) during {} hours worked; second meal was due by {} (hour {}) ({})",
                    day.valid_breaks.len(),
                    day.total_hours.normalize(),
                    deadline.format(CLOCK_FORMAT),
                    threshold.normalize(),
                    waiver
                ),
            ))
        }
        Some(second) if *second > deadline => Some((
            ViolationKind::LateSecondMeal,
            format!(
                "Second meal break started at {}, after the {} deadline (hour {})",
                second.format(CLOCK_FORMAT),
                deadline.format(CLOCK_FORMAT),
                threshold.normalize()
            ),
        )),
        Some(_) => None,
    }
}

fn make_violation(day: &ShiftDay, kind: ViolationKind, detail: String) -> Violation {
    Violation {
        employee_id: day.employee_id.clone(),
        date: day.date,
        kind,
        regular_hours: day.regular_hours,
        overtime_hours: day.overtime_hours,
        total_hours: day.total_hours,
        detail,
    }
}

/// Adds a fractional number of hours to a timestamp, to the second.
fn offset(start: NaiveDateTime, hours: Decimal) -> NaiveDateTime {
    let seconds = hours
        .checked_mul(Decimal::from(3600))
        .and_then(|s| s.round().to_i64())
        .unwrap_or(MAX_OFFSET_SECONDS)
        .clamp(-MAX_OFFSET_SECONDS, MAX_OFFSET_SECONDS);

    start
        .checked_add_signed(Duration::seconds(seconds))
        .unwrap_or(NaiveDateTime::MAX)
}
