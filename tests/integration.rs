//! Integration tests for the payroll export API.
//!
//! This test suite drives the router end to end:
//! - Pay period lookup (current and recent)
//! - Weekly hours preview
//! - Payroll CSV export with tips, overtime and PTO
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_export::api::{AppState, create_router};
use payroll_export::config::ConfigLoader;
use payroll_export::export::PayrollExporter;
use payroll_export::tips::InMemoryTipSource;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let loader = ConfigLoader::load("./config/payroll.yaml").expect("Failed to load config");
    let tips = InMemoryTipSource::load(loader.tip_seed_path().expect("seed file configured"))
        .expect("Failed to load tip seed file");
    let exporter = PayrollExporter::new(loader.config().clone(), tips);
    create_router(AppState::new(exporter))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, header::HeaderMap, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(body_bytes.to_vec()).unwrap())
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(router, request).await;
    (status, serde_json::from_str(&body).unwrap())
}

async fn post(router: Router, uri: &str, body: String) -> (StatusCode, header::HeaderMap, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(router, request).await
}

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().unwrap()).unwrap()
}

fn entry(id: &str, employee_id: &str, day: u32, start_hour: u32, end_hour: u32) -> Value {
    json!({
        "id": id,
        "employee_id": employee_id,
        "clock_in": format!("2025-01-{:02}T{:02}:00:00Z", day, start_hour),
        "clock_out": format!("2025-01-{:02}T{:02}:00:00Z", day, end_hour),
        "breaks": []
    })
}

/// Nine-hour shifts Monday to Friday starting on `monday` (45 hours).
fn forty_five_hour_week(employee_id: &str, monday: u32) -> Vec<Value> {
    (monday..monday + 5)
        .map(|day| entry(&format!("{}_{}", employee_id, day), employee_id, day, 8, 17))
        .collect()
}

fn export_request(entries: Vec<Value>) -> Value {
    json!({
        "tenant_id": "cafe-001",
        "start": "2025-01-06",
        "end": "2025-01-19",
        "entries": entries,
        "employees": [
            { "id": "emp_001", "display_name": "Ana Lopez" },
            { "id": "emp_002", "display_name": "Ben Ito" },
            { "id": "emp_003", "display_name": "Cara Diaz" }
        ],
        "approvals": [
            {
                "employee_id": "emp_001",
                "period_start": "2025-01-06",
                "period_end": "2025-01-19",
                "status": "approved",
                "pto_hours": "8"
            },
            {
                "employee_id": "emp_003",
                "period_start": "2025-01-06",
                "period_end": "2025-01-19",
                "status": "approved",
                "pto_hours": "16"
            }
        ]
    })
}

fn full_period_entries() -> Vec<Value> {
    let mut entries = forty_five_hour_week("emp_001", 6);
    entries.extend(forty_five_hour_week("emp_001", 13));
    // Ben: 30 hours in week one
    entries.extend((6..11).map(|day| entry(&format!("ben_{}", day), "emp_002", day, 10, 16)));
    // Not on the roster
    entries.push(entry("ghost_1", "emp_999", 14, 9, 13));
    // Still clocked in
    entries.push(json!({
        "id": "active_1",
        "employee_id": "emp_002",
        "clock_in": "2025-01-17T09:00:00Z",
        "clock_out": null
    }));
    entries
}

// =============================================================================
// Payroll export
// =============================================================================

#[tokio::test]
async fn test_export_returns_csv_download() {
    let body = export_request(full_period_entries()).to_string();
    let (status, headers, csv) = post(create_router_for_test(), "/payroll/export", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_TYPE].to_str().unwrap(),
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        headers[header::CONTENT_DISPOSITION].to_str().unwrap(),
        "attachment; filename=\"gusto_payroll_2025-01-06_2025-01-19.csv\""
    );

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "\"Employee\",\"Regular Hours\",\"Overtime Hours\",\"Cash Tips\",\"PTO Hours\"",
            "\"Ana Lopez\",80.00,10.00,49.25,8.00",
            "\"Ben Ito\",30.00,0.00,147.75,0.00",
            "\"Unknown\",4.00,0.00,0.00,0.00",
        ]
    );
}

#[tokio::test]
async fn test_export_excludes_employees_with_only_pto() {
    let body = export_request(full_period_entries()).to_string();
    let (_, _, csv) = post(create_router_for_test(), "/payroll/export", body).await;

    assert!(!csv.contains("Cara Diaz"));
}

#[tokio::test]
async fn test_export_rows_split_into_five_fields() {
    let body = export_request(full_period_entries()).to_string();
    let (_, _, csv) = post(create_router_for_test(), "/payroll/export", body).await;

    let second_line = csv.lines().nth(1).unwrap();
    assert_eq!(second_line.split(',').count(), 5);
}

#[tokio::test]
async fn test_export_with_no_hours_is_unprocessable() {
    let body = export_request(vec![]).to_string();
    let (status, _, body) = post(create_router_for_test(), "/payroll/export", body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["code"], "NO_EMPLOYEE_HOURS");
    assert!(error["message"]
        .as_str()
        .unwrap()
        .contains("No employee hours found"));
}

#[tokio::test]
async fn test_export_with_reversed_period() {
    let mut request = export_request(full_period_entries());
    request["start"] = json!("2025-01-20");

    let (status, _, body) =
        post(create_router_for_test(), "/payroll/export", request.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["code"], "INVALID_PERIOD");
}

#[tokio::test]
async fn test_export_with_malformed_date() {
    let mut request = export_request(full_period_entries());
    request["end"] = json!("2025-01-32");

    let (status, _, body) =
        post(create_router_for_test(), "/payroll/export", request.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["code"], "INVALID_DATE");
}

#[tokio::test]
async fn test_export_with_malformed_json() {
    let (status, _, body) = post(
        create_router_for_test(),
        "/payroll/export",
        "{ not json".to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_export_missing_tenant_id() {
    let body = json!({ "start": "2025-01-06", "end": "2025-01-19" }).to_string();
    let (status, _, body) = post(create_router_for_test(), "/payroll/export", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("tenant_id"));
}

#[tokio::test]
async fn test_export_for_tenant_without_tips() {
    let mut request = export_request(full_period_entries());
    request["tenant_id"] = json!("pizzeria-002");

    let (status, _, csv) =
        post(create_router_for_test(), "/payroll/export", request.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(csv.contains("\"Ben Ito\",30.00,0.00,0.00,0.00"));
}

// =============================================================================
// Hours preview
// =============================================================================

#[tokio::test]
async fn test_hours_preview_splits_overtime_per_week() {
    let body = export_request(full_period_entries()).to_string();
    let (status, _, body) = post(create_router_for_test(), "/payroll/hours", body).await;

    assert_eq!(status, StatusCode::OK);
    let summary: Value = serde_json::from_str(&body).unwrap();
    let ana = summary
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["employee_id"] == "emp_001")
        .unwrap();

    assert_eq!(ana["employee_name"], "Ana Lopez");
    assert_eq!(ana["weeks"].as_array().unwrap().len(), 2);
    assert_eq!(ana["weeks"][0]["week_key"], "2025-01-06");
    assert_eq!(decimal(&ana["weeks"][0]["overtime_hours"]), Decimal::from(5));
    assert_eq!(decimal(&ana["weeks"][1]["overtime_hours"]), Decimal::from(5));
    assert_eq!(decimal(&ana["regular_hours"]), Decimal::from(80));
}

// =============================================================================
// Pay periods
// =============================================================================

#[tokio::test]
async fn test_current_period_uses_configured_cycle() {
    let (status, body) =
        get_json(create_router_for_test(), "/pay-periods/current?date=2025-01-22").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["start"], "2025-01-20");
    assert_eq!(body["end"], "2025-02-02");
    assert_eq!(body["label"], "Jan 20 - Feb 2, 2025");
    assert_eq!(body["period_type"], "biweekly");
    assert_eq!(body["weeks"].as_array().unwrap().len(), 2);
    assert_eq!(body["weeks"][1]["week_key"], "2025-01-27");
}

#[tokio::test]
async fn test_current_period_before_anchor() {
    let (status, body) =
        get_json(create_router_for_test(), "/pay-periods/current?date=2025-01-05").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["start"], "2024-12-23");
    assert_eq!(body["end"], "2025-01-05");
    assert_eq!(body["label"], "Dec 23, 2024 - Jan 5, 2025");
}

#[tokio::test]
async fn test_current_period_type_override() {
    let (status, body) = get_json(
        create_router_for_test(),
        "/pay-periods/current?date=2024-02-20&period_type=semi_monthly",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["start"], "2024-02-16");
    assert_eq!(body["end"], "2024-02-29");
    assert_eq!(body["period_type"], "semi_monthly");
}

#[tokio::test]
async fn test_current_period_without_date_defaults_to_today() {
    let (status, body) = get_json(create_router_for_test(), "/pay-periods/current").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["start"].is_string());
    assert!(body["end"].is_string());
}

#[tokio::test]
async fn test_current_period_with_bad_date() {
    let (status, body) =
        get_json(create_router_for_test(), "/pay-periods/current?date=yesterday").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_recent_periods_newest_first() {
    let (status, body) = get_json(
        create_router_for_test(),
        "/pay-periods/recent?date=2025-01-22&count=3",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let periods = body.as_array().unwrap();
    assert_eq!(periods.len(), 3);
    assert_eq!(periods[0]["start"], "2025-01-20");
    assert_eq!(periods[1]["start"], "2025-01-06");
    assert_eq!(periods[2]["start"], "2024-12-23");
    assert_eq!(periods[1]["end"], "2025-01-19");
}

#[tokio::test]
async fn test_recent_periods_rejects_zero_count() {
    let (status, body) = get_json(
        create_router_for_test(),
        "/pay-periods/recent?date=2025-01-22&count=0",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_current_period_with_far_future_date() {
    let (status, body) = get_json(
        create_router_for_test(),
        "/pay-periods/current?date=%2B262142-12-20&period_type=monthly",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_recent_periods_with_out_of_range_date() {
    let (status, body) = get_json(
        create_router_for_test(),
        "/pay-periods/recent?date=-262142-01-03&count=1",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
