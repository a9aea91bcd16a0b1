//! End-to-end tests for the meal-break audit engine.
//!
//! This test suite drives the HTTP router and covers:
//! - The waiver short-circuit and its boundary
//! - Missed and late first meals
//! - Missing and late second meals, waivable and non-waivable
//! - Overnight shifts with post-midnight breaks
//! - Double clock-outs merged into one shift-day
//! - Rule profiles and per-run overrides
//! - CSV upload and CSV download
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use meal_audit::api::{AppState, create_router};
use meal_audit::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

const CSV_HEADER: &str = "Employee,Date,Time In,Time Out,Break Start,Break End,Break Duration,Regular Hours,Estimated Overtime,Anomalies";

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/profiles").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

async fn post_audit(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/audit")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_csv(router: Router, query: &str, csv: String) -> (StatusCode, String, String) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/audit/csv{}", query))
                .header("Content-Type", "text/csv")
                .body(Body::from(csv))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, content_type, String::from_utf8(body_bytes.to_vec()).unwrap())
}

/// One time-clock row in the standard export layout. Break duration is in hours.
fn entry(
    employee: &str,
    time_in: &str,
    break_start: &str,
    break_hours: &str,
    regular: &str,
    overtime: &str,
) -> Value {
    json!({
        "Employee": employee,
        "Date": "Jul 04, 2025",
        "Time In": time_in,
        "Time Out": null,
        "Break Start": break_start,
        "Break End": null,
        "Break Duration": break_hours,
        "Regular Hours": regular,
        "Estimated Overtime": overtime,
        "Anomalies": ""
    })
}

fn create_request(rows: Vec<Value>) -> Value {
    json!({ "rows": rows })
}

fn violation_kinds(result: &Value) -> Vec<String> {
    result["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["kind"].as_str().unwrap().to_string())
        .collect()
}

fn csv_body(lines: &[&str]) -> String {
    let mut body = String::from(CSV_HEADER);
    for line in lines {
        body.push('\n');
        body.push_str(line);
    }
    body.push('\n');
    body
}

// =============================================================================
// Waiver
// =============================================================================

#[tokio::test]
async fn test_short_shift_without_break_is_waived() {
    let request = create_request(vec![entry("Mia", "09:00 AM", "", "", "5", "0")]);
    let (status, result) = post_audit(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(violation_kinds(&result).is_empty());
    assert_eq!(result["stats"]["shift_days_evaluated"], 1);
}

#[tokio::test]
async fn test_exactly_six_hours_is_waived() {
    let request = create_request(vec![entry("Mia", "09:00 AM", "", "", "6.0", "0")]);
    let (_, result) = post_audit(create_router_for_test(), request).await;

    assert!(violation_kinds(&result).is_empty());
}

// =============================================================================
// First Meal
// =============================================================================

/// Scenario A: 8 hours, no break
#[tokio::test]
async fn test_scenario_a_missed_first_meal() {
    let request = create_request(vec![entry("Ana", "08:00 AM", "", "", "8", "0")]);
    let (status, result) = post_audit(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(violation_kinds(&result), vec!["missed_first_meal"]);

    let violation = &result["violations"][0];
    assert_eq!(violation["employee_id"], "Ana");
    assert_eq!(violation["date"], "2025-07-04");
    assert!(violation["detail"].as_str().unwrap().contains("1:00 PM"));
}

#[tokio::test]
async fn test_late_first_meal_reports_clock_times() {
    let request = create_request(vec![entry("Ana", "08:00 AM", "01:30 PM", "0.5", "8", "0")]);
    let (_, result) = post_audit(create_router_for_test(), request).await;

    assert_eq!(violation_kinds(&result), vec!["late_first_meal"]);
    assert_eq!(
        result["violations"][0]["detail"],
        "First meal break started at 1:30 PM, after the 1:00 PM deadline (hour 5)"
    );
}

#[tokio::test]
async fn test_break_exactly_at_deadline_is_on_time() {
    let request = create_request(vec![entry("Ana", "07:00 AM", "12:00 PM", "0.5", "8", "0")]);
    let (_, result) = post_audit(create_router_for_test(), request).await;

    assert!(violation_kinds(&result).is_empty());
}

#[tokio::test]
async fn test_short_break_does_not_count() {
    let request = create_request(vec![entry("Ana", "08:00 AM", "11:00 AM", "0.25", "8", "0")]);
    let (_, result) = post_audit(create_router_for_test(), request).await;

    assert_eq!(violation_kinds(&result), vec!["missed_first_meal"]);
}

#[tokio::test]
async fn test_missed_sentinel_in_break_duration_counts_as_no_break() {
    let request = create_request(vec![entry("Ana", "08:00 AM", "11:00 AM", "MISSED", "8", "0")]);
    let (_, result) = post_audit(create_router_for_test(), request).await;

    assert_eq!(violation_kinds(&result), vec!["missed_first_meal"]);
}

// =============================================================================
// Second Meal
// =============================================================================

/// Scenario B: 11 hours over two punches, breaks at hour 4 and hour 9
#[tokio::test]
async fn test_scenario_b_two_timely_breaks() {
    let request = create_request(vec![
        entry("Luis", "07:00 AM", "11:00 AM", "0.5", "6", "0"),
        entry("Luis", "11:30 AM", "04:00 PM", "0.5", "2", "3"),
    ]);
    let (_, result) = post_audit(create_router_for_test(), request).await;

    assert!(violation_kinds(&result).is_empty());
    assert_eq!(result["stats"]["records_normalized"], 2);
    assert_eq!(result["stats"]["shift_days_evaluated"], 1);
}

/// Scenario C: 11 hours, one break at hour 3
#[tokio::test]
async fn test_scenario_c_missing_second_meal_waivable() {
    let request = create_request(vec![entry("Luis", "07:00 AM", "10:00 AM", "0.5", "8", "3")]);
    let (_, result) = post_audit(create_router_for_test(), request).await;

    assert_eq!(violation_kinds(&result), vec!["missing_second_meal"]);
    let detail = result["violations"][0]["detail"].as_str().unwrap();
    assert!(detail.ends_with("(waivable)"), "got: {}", detail);
}

/// Scenario D: 13 hours, one break at hour 3
#[tokio::test]
async fn test_scenario_d_missing_second_meal_non_waivable() {
    let request = create_request(vec![entry("Luis", "07:00 AM", "10:00 AM", "0.5", "8", "5")]);
    let (_, result) = post_audit(create_router_for_test(), request).await;

    assert_eq!(violation_kinds(&result), vec!["missing_second_meal"]);
    let detail = result["violations"][0]["detail"].as_str().unwrap();
    assert!(detail.ends_with("(non-waivable)"), "got: {}", detail);
}

#[tokio::test]
async fn test_late_second_meal() {
    let request = create_request(vec![
        entry("Luis", "07:00 AM", "11:00 AM", "0.5", "6", "0"),
        entry("Luis", "11:30 AM", "05:30 PM", "0.5", "2", "3"),
    ]);
    let (_, result) = post_audit(create_router_for_test(), request).await;

    assert_eq!(violation_kinds(&result), vec!["late_second_meal"]);
}

#[tokio::test]
async fn test_both_categories_fire_independently() {
    let request = create_request(vec![entry("Luis", "07:00 AM", "", "", "8", "3")]);
    let (_, result) = post_audit(create_router_for_test(), request).await;

    assert_eq!(
        violation_kinds(&result),
        vec!["missed_first_meal", "missing_second_meal"]
    );
    assert_eq!(result["summary"][0]["total"], 2);
}

// =============================================================================
// Overnight Shifts
// =============================================================================

#[tokio::test]
async fn test_overnight_break_after_midnight_on_time() {
    let csv = csv_body(&[
        "Omar,\"Jul 04, 2025\",08:00 PM,12:00 AM,,,,4,0,",
        "Omar,\"Jul 04, 2025\",,04:30 AM,12:30 AM,01:00 AM,0.5,4,0,",
    ]);
    let (status, _, body) = post_csv(create_router_for_test(), "", csv).await;
    let result: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(violation_kinds(&result).is_empty());
}

#[tokio::test]
async fn test_overnight_break_after_midnight_late() {
    let csv = csv_body(&[
        "Omar,\"Jul 04, 2025\",08:00 PM,12:00 AM,,,,4,0,",
        "Omar,\"Jul 04, 2025\",,04:30 AM,02:00 AM,02:30 AM,0.5,4,0,",
    ]);
    let (_, _, body) = post_csv(create_router_for_test(), "", csv).await;
    let result: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(violation_kinds(&result), vec!["late_first_meal"]);
    assert_eq!(
        result["violations"][0]["detail"],
        "First meal break started at 2:00 AM, after the 1:00 AM deadline (hour 5)"
    );
}

// =============================================================================
// Profiles and Overrides
// =============================================================================

#[tokio::test]
async fn test_profiles_endpoint_lists_shipped_profiles() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/profiles")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let list: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(list["default_profile"], "california_standard");
    let names: Vec<&str> = list["profiles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["california_standard", "five_hour_trigger", "sixth_hour_deadline"]
    );
}

#[tokio::test]
async fn test_five_hour_trigger_profile_has_no_six_hour_waiver() {
    let rows = vec![entry("Mia", "09:00 AM", "", "", "5.5", "0")];

    let (_, standard) = post_audit(create_router_for_test(), create_request(rows.clone())).await;
    assert!(violation_kinds(&standard).is_empty());

    let mut request = create_request(rows);
    request["profile"] = json!("five_hour_trigger");
    let (status, strict) = post_audit(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(strict["profile"], "five_hour_trigger");
    assert_eq!(violation_kinds(&strict), vec!["missed_first_meal"]);
}

#[tokio::test]
async fn test_sixth_hour_deadline_profile_accepts_later_break() {
    let rows = vec![entry("Ana", "08:00 AM", "01:30 PM", "0.5", "8", "0")];

    let mut request = create_request(rows);
    request["profile"] = json!("sixth_hour_deadline");
    let (_, result) = post_audit(create_router_for_test(), request).await;

    assert!(violation_kinds(&result).is_empty());
}

#[tokio::test]
async fn test_min_break_override_via_query() {
    let csv = csv_body(&["Ana,\"Jul 04, 2025\",08:00 AM,04:30 PM,11:00 AM,11:20 AM,0.34,8,0,"]);

    let (_, _, standard) = post_csv(create_router_for_test(), "", csv.clone()).await;
    let standard: Value = serde_json::from_str(&standard).unwrap();
    assert_eq!(violation_kinds(&standard), vec!["missed_first_meal"]);

    let (_, _, relaxed) =
        post_csv(create_router_for_test(), "?min_break_minutes=20", csv).await;
    let relaxed: Value = serde_json::from_str(&relaxed).unwrap();
    assert!(violation_kinds(&relaxed).is_empty());
}

#[tokio::test]
async fn test_break_duration_in_minutes_via_query() {
    let csv = csv_body(&["Ana,\"Jul 04, 2025\",08:00 AM,04:30 PM,12:00 PM,12:30 PM,30,8,0,"]);

    let (_, _, body) = post_csv(create_router_for_test(), "?break_unit=minutes", csv).await;
    let result: Value = serde_json::from_str(&body).unwrap();

    assert!(violation_kinds(&result).is_empty());
}

// =============================================================================
// CSV Output
// =============================================================================

#[tokio::test]
async fn test_csv_violations_download() {
    let csv = csv_body(&["Ana,\"Jul 04, 2025\",08:00 AM,04:00 PM,,,,8,0,MISSED BREAK"]);

    let (status, content_type, body) =
        post_csv(create_router_for_test(), "?output=violations", csv).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "text/csv; charset=utf-8");

    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(
        lines[0],
        "Employee,Date,Regular Hours,Overtime Hours,Total Hours,Violation Kind,Detail"
    );
    assert!(lines[1].starts_with("Ana,\"Jul 04, 2025\",8,0,8,Missed First Meal,"));
    assert!(lines[1].contains("[source flagged MISSED BREAK]"));
}

#[tokio::test]
async fn test_csv_summary_download() {
    let csv = csv_body(&[
        "Luis,\"Jul 04, 2025\",08:00 AM,04:00 PM,,,,8,0,",
        "Ana,\"Jul 04, 2025\",07:00 AM,08:00 PM,,,,8,5,",
    ]);

    let (status, content_type, body) =
        post_csv(create_router_for_test(), "?output=summary", csv).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "text/csv; charset=utf-8");
    assert_eq!(
        body,
        "Employee,Missed First Meal,Late First Meal,Missing 2nd Meal,Late 2nd Meal,Total\n\
         Ana,1,0,1,0,2\n\
         Luis,1,0,0,0,1\n"
    );
}

// =============================================================================
// Data Quality
// =============================================================================

#[tokio::test]
async fn test_rows_without_employee_are_dropped_with_warning() {
    let request = create_request(vec![
        entry("", "08:00 AM", "", "", "8", "0"),
        entry("Ana", "08:00 AM", "", "", "8", "0"),
    ]);
    let (status, result) = post_audit(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["stats"]["rows_received"], 2);
    assert_eq!(result["stats"]["rows_dropped"], 1);
    assert_eq!(result["warnings"][0]["code"], "ROWS_DROPPED");
    assert_eq!(violation_kinds(&result), vec!["missed_first_meal"]);
}

#[tokio::test]
async fn test_unparsable_clock_in_makes_day_unauditable() {
    let request = create_request(vec![entry("Ana", "around eight", "", "", "8", "0")]);
    let (status, result) = post_audit(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(violation_kinds(&result).is_empty());
    assert_eq!(result["stats"]["unauditable_groups"], 1);
    assert_eq!(result["warnings"][0]["code"], "UNAUDITABLE_SHIFT_DAYS");
}

#[tokio::test]
async fn test_oversized_numeric_cells_return_report() {
    let huge = "79228162514264337593543950335";
    let request = create_request(vec![
        entry("Ana", "08:00 AM", "12:00 PM", huge, "8", "0"),
        entry("Luis", "08:00 AM", "", "", huge, "0"),
        entry("Luis", "01:00 PM", "", "", huge, "0"),
    ]);
    let (status, result) = post_audit(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(violation_kinds(&result), vec!["missed_first_meal"]);
    assert_eq!(result["violations"][0]["employee_id"], "Ana");
}

#[tokio::test]
async fn test_overtime_derived_from_total_hours_column() {
    let csv = "Employee,Date,Time In,Break Start,Break Duration,Regular Hours,Total Hours\n\
               Luis,\"Jul 04, 2025\",07:00 AM,10:00 AM,0.5,8,11\n"
        .to_string();

    let (status, _, body) = post_csv(create_router_for_test(), "", csv).await;
    let result: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(violation_kinds(&result), vec!["missing_second_meal"]);
    assert_eq!(result["violations"][0]["overtime_hours"], "3");
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_missing_column_returns_400() {
    let request = create_request(vec![json!({
        "Employee": "Ana",
        "Date": "Jul 04, 2025",
        "Time In": "08:00 AM"
    })]);
    let (status, error) = post_audit(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MISSING_COLUMN");
    assert!(error["message"].as_str().unwrap().contains("Break Start"));
}

#[tokio::test]
async fn test_out_of_range_override_returns_400() {
    let mut request = create_request(vec![entry("Ana", "08:00 AM", "", "", "8", "0")]);
    request["rules"] = json!({ "meal_deadline_hours": 9 });
    let (status, error) = post_audit(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_RULE_CONFIG");
    assert_eq!(error["details"], "meal_deadline_hours");
}

#[tokio::test]
async fn test_unknown_profile_returns_404() {
    let csv = csv_body(&["Ana,\"Jul 04, 2025\",08:00 AM,04:00 PM,,,,8,0,"]);
    let (status, _, body) = post_csv(create_router_for_test(), "?profile=nevada", csv).await;
    let error: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "PROFILE_NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/audit")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"rows\": [}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_invalid_query_value_returns_400() {
    let csv = csv_body(&["Ana,\"Jul 04, 2025\",08:00 AM,04:00 PM,,,,8,0,"]);
    let (status, _, body) = post_csv(create_router_for_test(), "?output=pdf", csv).await;
    let error: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_INPUT");
}
