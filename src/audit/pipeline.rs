//! End-to-end audit run.
//!
//! This module chains normalization, aggregation, evaluation and
//! summarization over one input table and packages the outcome as an
//! [`AuditReport`]. A run either returns the full report or an error;
//! nothing partial is ever returned.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{InputSchema, RuleConfig};
use crate::error::AuditResult;
use crate::models::{AuditReport, AuditStats, AuditWarning, RawTable, ShiftDay, Violation};

use super::aggregator::aggregate_shift_days;
use super::evaluator::evaluate_shift_day;
use super::normalizer::normalize_table;
use super::summarizer::summarize;

/// How many shift-days are evaluated between progress callbacks.
pub const PROGRESS_INTERVAL: usize = 100;

/// Progress of the evaluation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditProgress {
    /// Shift-days evaluated so far.
    pub groups_processed: usize,
    /// Shift-days to evaluate in total.
    pub groups_total: usize,
}

/// Runs a full audit over one input table.
///
/// # Arguments
///
/// * `table` - The raw input rows and header
/// * `schema` - Column names and break-duration unit of the input
/// * `rules` - The rule parameters, validated before any work starts
/// * `profile` - The name of the rule profile `rules` came from, for the report
///
/// # Returns
///
/// The complete [`AuditReport`], or an error if the rules are out of range
/// or a required column is missing.
///
/// # Examples
///
/// ```
/// use meal_audit::audit::run_audit;
/// use meal_audit::config::{InputSchema, RuleConfig};
/// use meal_audit::models::{RawRow, RawTable, ViolationKind};
///
/// let row = RawRow::new()
///     .with("Employee", "Ana")
///     .with("Date", "Jul 04, 2025")
///     .with("Time In", "08:00 AM")
///     .with("Break Start", "")
///     .with("Break Duration", "")
///     .with("Regular Hours", "8")
///     .with("Estimated Overtime", "0");
/// let table = RawTable::from_rows(vec![row]);
///
/// let report = run_audit(&table, &InputSchema::default(), &RuleConfig::default(), "california_standard")?;
/// assert_eq!(report.violations.len(), 1);
/// assert_eq!(report.violations[0].kind, ViolationKind::MissedFirstMeal);
/// # Ok::<(), meal_audit::error::AuditError>(())
/// ```
pub fn run_audit(
    table: &RawTable,
    schema: &InputSchema,
    rules: &RuleConfig,
    profile: &str,
) -> AuditResult<AuditReport> {
    run_audit_with_progress(table, schema, rules, profile, &mut |_: AuditProgress| {})
}

/// Runs a full audit, reporting evaluation progress.
///
/// `progress` is called every [`PROGRESS_INTERVAL`] shift-days and once when
/// evaluation finishes. It only observes; it cannot change the results.
pub fn run_audit_with_progress(
    table: &RawTable,
    schema: &InputSchema,
    rules: &RuleConfig,
    profile: &str,
    progress: &mut dyn FnMut(AuditProgress),
) -> AuditResult<AuditReport> {
    let start_time = Instant::now();

    rules.validate()?;
    let normalized = normalize_table(table, schema)?;
    let aggregated = aggregate_shift_days(&normalized.records, rules);

    let groups_total = aggregated.shift_days.len();
    let mut violations: Vec<Violation> = Vec::new();
    let mut shift_days_with_violations = 0;
    let mut flag_mismatches = 0;

    for (index, day) in aggregated.shift_days.iter().enumerate() {
        let found = evaluate_shift_day(day, rules);
        if !found.is_empty() {
            shift_days_with_violations += 1;
        }
        if source_flag_unconfirmed(day, &found) {
            flag_mismatches += 1;
        }
        violations.extend(found);

        let groups_processed = index + 1;
        if groups_processed % PROGRESS_INTERVAL == 0 && groups_processed < groups_total {
            progress(AuditProgress {
                groups_processed,
                groups_total,
            });
        }
    }
    progress(AuditProgress {
        groups_processed: groups_total,
        groups_total,
    });

    violations.sort_by(|a, b| {
        a.employee_id
            .cmp(&b.employee_id)
            .then(a.date.cmp(&b.date))
            .then(a.kind.cmp(&b.kind))
    });
    let summary = summarize(&violations);

    let stats = AuditStats {
        rows_received: table.rows.len(),
        rows_dropped: normalized.rows_dropped,
        records_normalized: normalized.records.len(),
        shift_days_evaluated: groups_total,
        unauditable_groups: aggregated.unauditable.len(),
        shift_days_with_violations,
        total_violations: violations.len(),
    };

    let warnings = collect_warnings(&stats, flag_mismatches);
    if !warnings.is_empty() {
        warn!(
            rows_dropped = stats.rows_dropped,
            unauditable_groups = stats.unauditable_groups,
            flag_mismatches,
            "Audit completed with data-quality warnings"
        );
    }

    let duration_us = start_time.elapsed().as_micros() as u64;
    debug!(
        shift_days = stats.shift_days_evaluated,
        violations = stats.total_violations,
        duration_us,
        "Audit run finished"
    );

    Ok(AuditReport {
        run_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        profile: profile.to_string(),
        rules: *rules,
        stats,
        violations,
        summary,
        warnings,
        duration_us,
    })
}

/// The source marked a missed break but the evaluator found no first-meal problem.
fn source_flag_unconfirmed(day: &ShiftDay, found: &[Violation]) -> bool {
    day.flags_missed_break() && !found.iter().any(|v| v.kind.is_first_meal())
}

fn collect_warnings(stats: &AuditStats, flag_mismatches: usize) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    if stats.rows_dropped > 0 {
        warnings.push(AuditWarning::new(
            "ROWS_DROPPED",
            format!(
                "{} row(s) had no usable employee or date and were skipped",
                stats.rows_dropped
            ),
            "low",
        ));
    }

    if stats.unauditable_groups > 0 {
        warnings.push(AuditWarning::new(
            "UNAUDITABLE_SHIFT_DAYS",
            format!(
                "{} employee-day group(s) had no parsable clock-in and could not be audited",
                stats.unauditable_groups
            ),
            "medium",
        ));
    }

    if flag_mismatches > 0 {
        warnings.push(AuditWarning::new(
            "SOURCE_FLAG_MISMATCH",
            format!(
                "{} shift-day(s) flagged MISSED BREAK by the source had no first-meal violation",
                flag_mismatches
            ),
            "low",
        ));
    }

    warnings
}
