//! California Meal-Break Audit Engine
//!
//! This crate audits employee time-clock records against California meal-break
//! rules. Raw rows are normalized into typed records, grouped into one
//! shift-day per employee and calendar day, evaluated for missed or late first
//! and second meal breaks, and summarized per employee.

#![warn(missing_docs)]

pub mod api;
pub mod audit;
pub mod config;
pub mod error;
pub mod models;
pub mod table;
