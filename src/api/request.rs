//! Request types for the meal-break audit API.
//!
//! This module defines the JSON body of `POST /audit` and the query string
//! of `POST /audit/csv`.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{BreakDurationUnit, InputSchema, RuleOverrides};
use crate::models::{RawRow, RawTable};

/// Request body for the `/audit` endpoint.
///
/// Rows are column-name to cell maps, exactly as a spreadsheet or CSV
/// reader would produce them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRequest {
    /// Input rows keyed by column name.
    pub rows: Vec<BTreeMap<String, Value>>,
    /// Name of the rule profile to audit against; the default profile when absent.
    #[serde(default)]
    pub profile: Option<String>,
    /// Per-run adjustments applied on top of the profile.
    #[serde(default)]
    pub rules: RuleOverrides,
    /// Column layout of the rows; the standard export layout when absent.
    #[serde(default)]
    pub schema: Option<InputSchema>,
}

impl AuditRequest {
    /// Builds the raw table the pipeline consumes.
    ///
    /// Strings are taken as-is, numbers and booleans by their JSON text and
    /// nulls as blank cells, so a column that is null everywhere still
    /// counts as present.
    pub fn to_table(&self) -> RawTable {
        let rows = self
            .rows
            .iter()
            .map(|cells| {
                cells
                    .iter()
                    .map(|(column, value)| (column.as_str(), cell_text(value)))
                    .collect::<RawRow>()
            })
            .collect();
        RawTable::from_rows(rows)
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Which representation `/audit/csv` returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// The full JSON audit report.
    #[default]
    Json,
    /// The violation table as CSV.
    Violations,
    /// The per-employee summary table as CSV.
    Summary,
}

/// Query parameters of the `/audit/csv` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvAuditQuery {
    /// Name of the rule profile to audit against.
    pub profile: Option<String>,
    /// Override of the first-meal deadline, in hours.
    pub meal_deadline_hours: Option<Decimal>,
    /// Override of the waiver limit, in hours.
    pub waiver_limit_hours: Option<Decimal>,
    /// Override of the minimum break length, in minutes.
    pub min_break_minutes: Option<u32>,
    /// Unit of the `Break Duration` column.
    pub break_unit: Option<BreakDurationUnit>,
    /// Response representation.
    pub output: OutputFormat,
}

impl CsvAuditQuery {
    /// The rule overrides carried by the query.
    pub fn overrides(&self) -> RuleOverrides {
        RuleOverrides {
            meal_deadline_hours: self.meal_deadline_hours,
            waiver_limit_hours: self.waiver_limit_hours,
            min_break_minutes: self.min_break_minutes,
        }
    }

    /// The input schema: standard column names with the requested break unit.
    pub fn schema(&self) -> InputSchema {
        InputSchema {
            break_duration_unit: self.break_unit.unwrap_or_default(),
            ..InputSchema::default()
        }
    }
}
