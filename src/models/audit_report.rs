//! Audit report models.
//!
//! This module contains the [`AuditReport`] type and its associated structures
//! that capture all outputs from one audit run: the violation list, the
//! per-employee summary, run statistics and warnings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::RuleConfig;

use super::{EmployeeSummary, Violation};

/// Counters describing how the input flowed through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStats {
    /// Rows handed to the normalizer.
    pub rows_received: usize,
    /// Rows dropped for lacking a usable employee or date.
    pub rows_dropped: usize,
    /// Records that reached the aggregator.
    pub records_normalized: usize,
    /// Shift-days presented to the evaluator.
    pub shift_days_evaluated: usize,
    /// (employee, day) groups discarded for lacking any clock-in.
    pub unauditable_groups: usize,
    /// Shift-days with at least one violation.
    pub shift_days_with_violations: usize,
    /// Total violation count.
    pub total_violations: usize,
}

/// A warning generated during an audit run.
///
/// Warnings indicate data-quality issues that don't abort the run
/// but may require attention.
///
/// # Example
///
/// ```
/// use meal_audit::models::AuditWarning;
///
/// let warning = AuditWarning {
///     code: "ROWS_DROPPED".to_string(),
///     message: "2 rows had no employee or date and were skipped".to_string(),
///     severity: "low".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete result of an audit run.
///
/// Everything except `run_id`, `timestamp` and `duration_us` is a
/// deterministic function of the input rows and the rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the run.
    pub engine_version: String,
    /// The rule profile the run started from.
    pub profile: String,
    /// The effective rules after overrides.
    pub rules: RuleConfig,
    /// Pipeline counters.
    pub stats: AuditStats,
    /// Findings ordered by employee, date and kind.
    pub violations: Vec<Violation>,
    /// Per-employee counts ordered by total descending.
    pub summary: Vec<EmployeeSummary>,
    /// Data-quality warnings.
    pub warnings: Vec<AuditWarning>,
    /// The run duration in microseconds.
    pub duration_us: u64,
}
