//! Delimited-text output.
//!
//! Both tables are rendered as UTF-8 CSV with a header row. Dates use the
//! same `Jul 04, 2025` pattern as the input; hour values are written without
//! trailing zeros.

use csv::Writer;

use crate::audit::DATE_FORMAT;
use crate::error::{AuditError, AuditResult};
use crate::models::{EmployeeSummary, Violation, ViolationKind};

/// Header of the violation table.
pub const VIOLATION_HEADERS: [&str; 7] = [
    "Employee",
    "Date",
    "Regular Hours",
    "Overtime Hours",
    "Total Hours",
    "Violation Kind",
    "Detail",
];

/// Renders the violation table.
///
/// # Example
///
/// ```
/// use meal_audit::table::write_violations;
///
/// let csv = write_violations(&[])?;
/// assert_eq!(csv, "Employee,Date,Regular Hours,Overtime Hours,Total Hours,Violation Kind,Detail\n");
/// # Ok::<(), meal_audit::error::AuditError>(())
/// ```
pub fn write_violations(violations: &[Violation]) -> AuditResult<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(VIOLATION_HEADERS).map_err(export_error)?;

    for v in violations {
        writer
            .write_record([
                v.employee_id.clone(),
                v.date.format(DATE_FORMAT).to_string(),
                v.regular_hours.normalize().to_string(),
                v.overtime_hours.normalize().to_string(),
                v.total_hours.normalize().to_string(),
                v.kind.label().to_string(),
                v.detail.clone(),
            ])
            .map_err(export_error)?;
    }

    finish(writer)
}

/// Renders the per-employee summary table: one column per violation kind
/// plus a total.
pub fn write_summary(summary: &[EmployeeSummary]) -> AuditResult<String> {
    let mut writer = Writer::from_writer(Vec::new());

    let mut header = vec!["Employee"];
    header.extend(ViolationKind::ALL.iter().map(|k| k.label()));
    header.push("Total");
    writer.write_record(&header).map_err(export_error)?;

    for row in summary {
        let mut record = vec![row.employee_id.clone()];
        record.extend(ViolationKind::ALL.iter().map(|k| row.count(*k).to_string()));
        record.push(row.total.to_string());
        writer.write_record(&record).map_err(export_error)?;
    }

    finish(writer)
}

fn finish(writer: Writer<Vec<u8>>) -> AuditResult<String> {
    let bytes = writer.into_inner().map_err(|e| AuditError::ExportError {
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| AuditError::ExportError {
        message: e.to_string(),
    })
}

fn export_error(error: csv::Error) -> AuditError {
    AuditError::ExportError {
        message: error.to_string(),
    }
}
