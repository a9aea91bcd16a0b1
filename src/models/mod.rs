//! Core data models for the meal-break audit engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit_report;
mod raw_row;
mod shift_day;
mod time_entry;
mod violation;

pub use audit_report::{AuditReport, AuditStats, AuditWarning};
pub use raw_row::{RawRow, RawTable};
pub use shift_day::ShiftDay;
pub use time_entry::{MISSED_BREAK_FLAG, TimeEntryRecord};
pub use violation::{EmployeeSummary, Violation, ViolationKind};
