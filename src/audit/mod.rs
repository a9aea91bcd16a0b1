//! Audit logic for the meal-break engine.
//!
//! This module contains the four stages of an audit run, in order: record
//! normalization of raw rows into typed records, aggregation of records into
//! one shift-day per employee and day, rule evaluation of each shift-day, and
//! summarization of findings per employee. The [`run_audit`] pipeline chains
//! all four.

mod aggregator;
mod evaluator;
mod normalizer;
mod pipeline;
mod summarizer;

pub use aggregator::{AggregationResult, aggregate_shift_days, resolve_break_time};
pub use evaluator::evaluate_shift_day;
pub use normalizer::{
    DATE_FORMAT, MAX_CELL_MAGNITUDE, NormalizedInput, TIMESTAMP_FORMAT, coerce_decimal, normalize_row,
    normalize_table, parse_anomalies, parse_break_minutes, parse_date, parse_timestamp,
    validate_columns,
};
pub use pipeline::{AuditProgress, PROGRESS_INTERVAL, run_audit, run_audit_with_progress};
pub use summarizer::summarize;
