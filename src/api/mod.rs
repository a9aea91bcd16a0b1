//! HTTP API module for the meal-break audit engine.
//!
//! This module provides the REST endpoints a dashboard uses to run audits:
//!
//! - `POST /audit` takes rows as JSON and returns the [`AuditReport`](crate::models::AuditReport)
//! - `POST /audit/csv` takes a CSV export and returns the report or a CSV table
//! - `GET /profiles` lists the loaded rule profiles

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AuditRequest, CsvAuditQuery, OutputFormat};
pub use response::{ApiError, ApiErrorResponse, ProfileList};
pub use state::AppState;
