//! Per-employee violation summary.

use std::collections::BTreeMap;

use crate::models::{EmployeeSummary, Violation};

/// Reduces a violation list to one [`EmployeeSummary`] per employee.
///
/// Rows are ordered by `total` descending, ties broken by employee id
/// ascending. Employees with no violations do not appear.
///
/// # Examples
///
/// ```
/// use meal_audit::audit::summarize;
///
/// assert!(summarize(&[]).is_empty());
/// ```
pub fn summarize(violations: &[Violation]) -> Vec<EmployeeSummary> {
    let mut by_employee: BTreeMap<&str, EmployeeSummary> = BTreeMap::new();

    for violation in violations {
        by_employee
            .entry(violation.employee_id.as_str())
            .or_insert_with(|| EmployeeSummary::new(violation.employee_id.as_str()))
            .record(violation.kind);
    }

    let mut summary: Vec<EmployeeSummary> = by_employee.into_values().collect();
    summary.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ViolationKind;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn violation(employee: &str, kind: ViolationKind) -> Violation {
        Violation {
            employee_id: employee.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
            kind,
            regular_hours: Decimal::new(8, 0),
            overtime_hours: Decimal::ZERO,
            total_hours: Decimal::new(8, 0),
            detail: String::new(),
        }
    }

    #[test]
    fn test_counts_per_kind_and_total() {
        let violations = vec![
            violation("Ana", ViolationKind::MissedFirstMeal),
            violation("Ana", ViolationKind::MissingSecondMeal),
            violation("Ana", ViolationKind::MissedFirstMeal),
            violation("Luis", ViolationKind::LateFirstMeal),
        ];

        let summary = summarize(&violations);
        assert_eq!(summary.len(), 2);

        assert_eq!(summary[0].employee_id, "Ana");
        assert_eq!(summary[0].missed_first_meal, 2);
        assert_eq!(summary[0].missing_second_meal, 1);
        assert_eq!(summary[0].total, 3);

        assert_eq!(summary[1].employee_id, "Luis");
        assert_eq!(summary[1].late_first_meal, 1);
        assert_eq!(summary[1].total, 1);
    }

    #[test]
    fn test_ties_broken_by_employee_ascending() {
        let violations = vec![
            violation("Zoe", ViolationKind::LateSecondMeal),
            violation("Ana", ViolationKind::LateFirstMeal),
            violation("Mia", ViolationKind::LateFirstMeal),
            violation("Mia", ViolationKind::LateFirstMeal),
        ];

        let order: Vec<String> = summarize(&violations)
            .into_iter()
            .map(|s| s.employee_id)
            .collect();
        assert_eq!(order, vec!["Mia", "Ana", "Zoe"]);
    }

    fn kind_strategy() -> impl Strategy<Value = ViolationKind> {
        prop::sample::select(ViolationKind::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_total_matches_kind_sum_and_raw_count(
            entries in prop::collection::vec((0usize..5, kind_strategy()), 0..60)
        ) {
            let employees = ["Ana", "Luis", "Mia", "Zoe", "Omar"];
            let violations: Vec<Violation> = entries
                .iter()
                .map(|(i, kind)| violation(employees[*i], *kind))
                .collect();

            for row in summarize(&violations) {
                let kind_sum: u32 = ViolationKind::ALL.iter().map(|k| row.count(*k)).sum();
                let raw = violations
                    .iter()
                    .filter(|v| v.employee_id == row.employee_id)
                    .count() as u32;
                prop_assert_eq!(row.total, kind_sum);
                prop_assert_eq!(row.total, raw);
            }
        }
    }
}
