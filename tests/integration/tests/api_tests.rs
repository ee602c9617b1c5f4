//! API Integration Tests
//!
//! Every test builds its own app over a fresh in-memory store with the clock
//! frozen at 2024-06-15 12:00 UTC, so no external services are required.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use axum::http::StatusCode;
use integration_tests::{
    assert_error, assert_json, create_prospect, create_stock_item, date, id_of, log_activity,
    log_validated, progression, TestApp,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};

fn app() -> TestApp {
    TestApp::at(date(2024, 6, 15)).expect("Failed to build app")
}

fn money(value: &Value) -> Decimal {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| panic!("not a decimal string: {value}"))
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let response = app.get("/health").await.unwrap();
    let body = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready_without_database() {
    let app = app();
    let response = app.get("/health/ready").await.unwrap();
    let body = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "not_configured");
}

// ============================================================================
// Progression Scenarios
// ============================================================================

#[tokio::test]
async fn test_new_prospect_has_no_progress() {
    let app = app();
    let id = create_prospect(&app, "Zero", date(2024, 6, 1)).await.unwrap();

    let stats = progression(&app, &id).await.unwrap();
    assert_eq!(stats["total_points"], 0);
    assert_eq!(stats["half_patch"]["eligible"], false);
    assert_eq!(stats["full_patch"]["eligible"], false);
    assert_eq!(stats["rules"]["half_min_months"], 4);
}

#[tokio::test]
async fn test_prospect_eligible_after_four_months_and_hundred_points() {
    let app = app();
    let id = create_prospect(&app, "Alfa", date(2024, 2, 15)).await.unwrap();

    for month in 3..=6 {
        log_validated(&app, &id, "road_trip", date(2024, month, 1))
            .await
            .unwrap();
    }

    let stats = progression(&app, &id).await.unwrap();
    assert_eq!(stats["total_points"], 100);
    assert_eq!(stats["months_as_prospect"], 4);
    assert_eq!(stats["half_patch"]["points_met"], true);
    assert_eq!(stats["half_patch"]["time_met"], true);
    assert_eq!(stats["half_patch"]["eligible"], true);
    assert_eq!(stats["half_patch"]["points_progress"], 100.0);
}

#[tokio::test]
async fn test_points_without_tenure_are_not_enough() {
    let app = app();
    let id = create_prospect(&app, "Bravo", date(2024, 4, 15)).await.unwrap();

    for day in [20, 25] {
        log_validated(&app, &id, "road_trip", date(2024, 4, day)).await.unwrap();
    }
    for day in [1, 8, 15, 22] {
        log_validated(&app, &id, "road_trip", date(2024, 5, day)).await.unwrap();
    }
    for day in [1, 8] {
        log_validated(&app, &id, "road_trip", date(2024, 6, day)).await.unwrap();
    }

    let stats = progression(&app, &id).await.unwrap();
    assert_eq!(stats["total_points"], 200);
    assert_eq!(stats["months_as_prospect"], 2);
    assert_eq!(stats["half_patch"]["points_met"], true);
    assert_eq!(stats["half_patch"]["time_met"], false);
    assert_eq!(stats["half_patch"]["eligible"], false);
    assert_eq!(stats["half_patch"]["time_progress"], 50.0);
}

#[tokio::test]
async fn test_pending_activities_do_not_count() {
    let app = app();
    let id = create_prospect(&app, "Charlie", date(2024, 1, 15)).await.unwrap();

    log_validated(&app, &id, "event_support", date(2024, 2, 10)).await.unwrap();
    let (status, _) = log_activity(&app, &id, "road_trip", date(2024, 3, 10)).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let stats = progression(&app, &id).await.unwrap();
    assert_eq!(stats["total_points"], 20);
}

#[tokio::test]
async fn test_half_member_with_recorded_date() {
    let app = app();
    let response = app
        .post(
            "/api/v1/members",
            json!({
                "name": "Delta",
                "case_type": "Half",
                "half_date": "2024-03-01",
                "joined_at": "2023-10-01"
            }),
        )
        .await
        .unwrap();
    let member = assert_json(response, StatusCode::CREATED).unwrap();
    let id = id_of(&member).unwrap();

    let stats = progression(&app, &id).await.unwrap();
    assert_eq!(stats["case_type"], "Half");
    assert_eq!(stats["half_patch_date"], "2024-03-01");
    assert_eq!(stats["half_patch_date_source"], "recorded");
    assert_eq!(stats["months_as_half"], 3);
}

async fn create_half(app: &TestApp, name: &str, joined_at: &str) -> String {
    let response = app
        .post(
            "/api/v1/members",
            json!({ "name": name, "case_type": "Half", "joined_at": joined_at }),
        )
        .await
        .unwrap();
    let member = assert_json(response, StatusCode::CREATED).unwrap();
    assert!(member["half_date"].is_null());
    id_of(&member).unwrap()
}

#[tokio::test]
async fn test_half_member_without_date_falls_back_to_tenure() {
    let app = app();
    let id = create_half(&app, "Echo", "2023-01-01").await;

    let stats = progression(&app, &id).await.unwrap();
    assert_eq!(stats["half_patch_date"], "2023-05-01");
    assert_eq!(stats["half_patch_date_source"], "estimated");
    assert_eq!(stats["months_as_half"], 13);
}

#[tokio::test]
async fn test_half_member_without_date_is_reconstructed_from_history() {
    let app = app();
    let id = create_half(&app, "Echo", "2024-01-10").await;

    // 100 points by February, but the fourth month only completes in May
    for day in 1..=4 {
        log_validated(&app, &id, "road_trip", date(2024, 2, day)).await.unwrap();
    }
    log_validated(&app, &id, "group_ride", date(2024, 5, 20)).await.unwrap();

    let stats = progression(&app, &id).await.unwrap();
    assert_eq!(stats["half_patch_date"], "2024-05-20");
    assert_eq!(stats["half_patch_date_source"], "reconstructed");
    assert_eq!(stats["months_as_half"], 0);
}

#[tokio::test]
async fn test_future_half_date_rejected_on_create() {
    let app = app();
    let response = app
        .post(
            "/api/v1/members",
            json!({ "name": "Golf", "case_type": "Half", "half_date": "2024-07-01" }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_promote_to_half_records_today() {
    let app = app();
    let id = create_prospect(&app, "Foxtrot", date(2024, 1, 1)).await.unwrap();

    let response = app
        .post(
            &format!("/api/v1/members/{id}/promote"),
            json!({ "case_type": "Half" }),
        )
        .await
        .unwrap();
    let member = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(member["case_type"], "Half");
    assert_eq!(member["half_date"], "2024-06-15");
}

// ============================================================================
// Activity Tests
// ============================================================================

#[tokio::test]
async fn test_activity_catalogue() {
    let app = app();
    let response = app.get("/api/v1/activities/kinds").await.unwrap();
    let kinds = assert_json(response, StatusCode::OK).unwrap();
    let kinds = kinds.as_array().unwrap();
    assert_eq!(kinds.len(), 7);
    assert!(kinds
        .iter()
        .any(|k| k["activity_type"] == "meeting_attendance" && k["once_per_month"] == true));
}

#[tokio::test]
async fn test_monthly_limit() {
    let app = app();
    let id = create_prospect(&app, "Golf", date(2024, 1, 1)).await.unwrap();

    let (status, _) = log_activity(&app, &id, "meeting_attendance", date(2024, 6, 3))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    // Same calendar month
    let (status, body) = log_activity(&app, &id, "meeting_attendance", date(2024, 6, 10))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "MONTHLY_LIMIT_REACHED");

    // Next month is fine
    let (status, _) = log_activity(&app, &id, "meeting_attendance", date(2024, 5, 20))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_rejected_activity_does_not_block_month() {
    let app = app();
    let id = create_prospect(&app, "Hotel", date(2024, 1, 1)).await.unwrap();

    let (_, body) = log_activity(&app, &id, "meeting_attendance", date(2024, 4, 5))
        .await
        .unwrap();
    let activity_id = id_of(&body).unwrap();

    let response = app
        .post(
            &format!("/api/v1/activities/{activity_id}/reject"),
            json!({ "reviewer": "Sargento" }),
        )
        .await
        .unwrap();
    let rejected = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(rejected["status"], "rejected");

    let (status, _) = log_activity(&app, &id, "meeting_attendance", date(2024, 4, 6))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    // A reviewed activity cannot be reviewed again
    let response = app
        .post(
            &format!("/api/v1/activities/{activity_id}/validate"),
            json!({ "reviewer": "Sargento" }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).unwrap();
    assert_eq!(code, "ACTIVITY_ALREADY_REVIEWED");
}

#[tokio::test]
async fn test_review_queue_and_delete() {
    let app = app();
    let id = create_prospect(&app, "India", date(2024, 1, 1)).await.unwrap();
    let (_, body) = log_activity(&app, &id, "group_ride", date(2024, 6, 1)).await.unwrap();
    let activity_id = id_of(&body).unwrap();

    let response = app.get("/api/v1/activities/pending").await.unwrap();
    let pending = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let response = app
        .delete(&format!("/api/v1/activities/{activity_id}"))
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .get(&format!("/api/v1/members/{id}/activities"))
        .await
        .unwrap();
    let activities = assert_json(response, StatusCode::OK).unwrap();
    assert!(activities.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_future_activity_rejected() {
    let app = app();
    let id = create_prospect(&app, "Juliett", date(2024, 1, 1)).await.unwrap();
    let (status, body) = log_activity(&app, &id, "group_ride", date(2024, 6, 16))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

// ============================================================================
// Member Tests
// ============================================================================

#[tokio::test]
async fn test_member_listing_and_deactivation() {
    let app = app();
    let first = create_prospect(&app, "Kilo", date(2024, 1, 1)).await.unwrap();
    create_prospect(&app, "Lima", date(2024, 2, 1)).await.unwrap();

    let response = app.get("/api/v1/members?limit=1").await.unwrap();
    let page = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(page["data"].as_array().unwrap().len(), 1);
    assert_eq!(page["pagination"]["has_more"], true);

    let response = app.delete(&format!("/api/v1/members/{first}")).await.unwrap();
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.get("/api/v1/members").await.unwrap();
    let page = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(page["data"].as_array().unwrap().len(), 1);

    let response = app
        .get("/api/v1/members?include_inactive=true")
        .await
        .unwrap();
    let page = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(page["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_member() {
    let app = app();
    let id = create_prospect(&app, "Mike", date(2024, 1, 1)).await.unwrap();

    let response = app
        .patch(
            &format!("/api/v1/members/{id}"),
            json!({ "nickname": "Mikão", "email": "mike@example.com" }),
        )
        .await
        .unwrap();
    let member = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(member["name"], "Mike");
    assert_eq!(member["nickname"], "Mikão");
}

// ============================================================================
// Stock Tests
// ============================================================================

#[tokio::test]
async fn test_stock_exit_beyond_level_fails() {
    let app = app();
    let item_id = create_stock_item(&app, "Cerveja", "7.50", 5).await.unwrap();

    let response = app
        .post(
            &format!("/api/v1/stock/{item_id}/movements"),
            json!({ "kind": "exit", "quantity": 10 }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).unwrap();
    assert_eq!(code, "INSUFFICIENT_STOCK");

    let response = app.get(&format!("/api/v1/stock/{item_id}")).await.unwrap();
    let item = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(item["quantity"], 5);
    assert_eq!(item["movements"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_stock_movements_and_low_list() {
    let app = app();
    let item_id = create_stock_item(&app, "Água", "3.00", 10).await.unwrap();

    let response = app
        .post(
            &format!("/api/v1/stock/{item_id}/movements"),
            json!({ "kind": "exit", "quantity": 8, "note": "evento" }),
        )
        .await
        .unwrap();
    let item = assert_json(response, StatusCode::CREATED).unwrap();
    assert_eq!(item["quantity"], 2);
    assert_eq!(item["low"], true);

    let response = app.get("/api/v1/stock/low").await.unwrap();
    let low = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(low.as_array().unwrap().len(), 1);

    let response = app
        .post(
            &format!("/api/v1/stock/{item_id}/movements"),
            json!({ "kind": "adjustment", "quantity": 12 }),
        )
        .await
        .unwrap();
    let item = assert_json(response, StatusCode::CREATED).unwrap();
    assert_eq!(item["quantity"], 12);
    assert_eq!(item["low"], false);
}

// ============================================================================
// Comanda Tests
// ============================================================================

#[tokio::test]
async fn test_comanda_total_and_paid_tab_is_closed() {
    let app = app();
    let beer = create_stock_item(&app, "Cerveja", "7.50", 10).await.unwrap();

    let response = app
        .post("/api/v1/comandas", json!({ "customer_name": "Visitante" }))
        .await
        .unwrap();
    let comanda_id = id_of(&assert_json(response, StatusCode::CREATED).unwrap()).unwrap();
    let items_path = format!("/api/v1/comandas/{comanda_id}/items");

    let response = app
        .post(&items_path, json!({ "stock_item_id": beer, "quantity": 3 }))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).unwrap();

    let response = app
        .post(
            &items_path,
            json!({ "description": "Porção de fritas", "quantity": 2, "unit_price": "18.90" }),
        )
        .await
        .unwrap();
    let comanda = assert_json(response, StatusCode::CREATED).unwrap();
    assert_eq!(money(&comanda["total"]), Decimal::new(6030, 2));

    let response = app
        .post(
            &format!("/api/v1/comandas/{comanda_id}/pay"),
            json!({ "payment_method": "pix" }),
        )
        .await
        .unwrap();
    let paid = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(paid["status"], "paid");
    assert_eq!(paid["payment_method"], "pix");

    let response = app
        .post(&items_path, json!({ "stock_item_id": beer, "quantity": 1 }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).unwrap();
    assert_eq!(code, "COMANDA_NOT_OPEN");

    let response = app.get(&format!("/api/v1/stock/{beer}")).await.unwrap();
    let item = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(item["quantity"], 7);
}

#[tokio::test]
async fn test_cancel_comanda_restocks() {
    let app = app();
    let beer = create_stock_item(&app, "Cerveja", "7.50", 10).await.unwrap();

    let response = app
        .post("/api/v1/comandas", json!({ "customer_name": "Visitante" }))
        .await
        .unwrap();
    let comanda_id = id_of(&assert_json(response, StatusCode::CREATED).unwrap()).unwrap();

    let response = app
        .post(
            &format!("/api/v1/comandas/{comanda_id}/items"),
            json!({ "stock_item_id": beer, "quantity": 4 }),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).unwrap();

    let response = app
        .post(&format!("/api/v1/comandas/{comanda_id}/cancel"), json!({}))
        .await
        .unwrap();
    let cancelled = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(cancelled["status"], "cancelled");

    let response = app.get(&format!("/api/v1/stock/{beer}")).await.unwrap();
    let item = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(item["quantity"], 10);

    let response = app.get("/api/v1/comandas?status=cancelled").await.unwrap();
    let list = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);
}

// ============================================================================
// Dues Tests
// ============================================================================

#[tokio::test]
async fn test_dues_split_sums_exactly() {
    let app = app();
    let mut member_ids = Vec::new();
    for name in ["November", "Oscar", "Papa"] {
        member_ids.push(create_prospect(&app, name, date(2024, 1, 1)).await.unwrap());
    }

    let response = app
        .post(
            "/api/v1/invoices",
            json!({
                "description": "Mensalidade junho",
                "total_amount": "100.00",
                "due_date": "2024-06-30",
                "member_ids": member_ids
            }),
        )
        .await
        .unwrap();
    let invoice = assert_json(response, StatusCode::CREATED).unwrap();
    let shares = invoice["shares"].as_array().unwrap();
    assert_eq!(shares.len(), 3);

    let sum: Decimal = shares.iter().map(|s| money(&s["amount"])).sum();
    assert_eq!(sum, Decimal::new(10000, 2));
    assert_eq!(money(&shares[0]["amount"]), Decimal::new(3334, 2));
    assert_eq!(money(&shares[2]["amount"]), Decimal::new(3333, 2));

    let invoice_id = id_of(&invoice).unwrap();
    let pay_path = format!("/api/v1/invoices/{invoice_id}/shares/{}/pay", member_ids[0]);
    let response = app.post(&pay_path, json!({})).await.unwrap();
    let invoice = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(money(&invoice["outstanding"]), Decimal::new(6666, 2));

    let response = app.post(&pay_path, json!({})).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).unwrap();
    assert_eq!(code, "DUES_SHARE_ALREADY_PAID");

    let response = app
        .get(&format!("/api/v1/members/{}/dues", member_ids[0]))
        .await
        .unwrap();
    let dues = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(dues[0]["paid"], true);
}

// ============================================================================
// Dashboard Tests
// ============================================================================

#[tokio::test]
async fn test_dashboard_lists_eligible_prospects() {
    let app = app();
    let id = create_prospect(&app, "Quebec", date(2024, 2, 15)).await.unwrap();
    for month in 3..=6 {
        log_validated(&app, &id, "road_trip", date(2024, month, 1)).await.unwrap();
    }
    create_prospect(&app, "Romeo", date(2024, 6, 1)).await.unwrap();

    let response = app.get("/api/v1/dashboard").await.unwrap();
    let dashboard = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(dashboard["members"]["prospect"], 2);
    assert_eq!(dashboard["revenue_days"], 30);

    let eligible = dashboard["half_patch_eligible"].as_array().unwrap();
    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0]["member_id"], id.as_str());
}

#[tokio::test]
async fn test_dashboard_rejects_bad_window() {
    let app = app();
    let response = app.get("/api/v1/dashboard?revenue_days=0").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

// ============================================================================
// Error Body Tests
// ============================================================================

#[tokio::test]
async fn test_validation_error_body() {
    let app = app();
    let response = app.post("/api/v1/members", json!({ "name": "" })).await.unwrap();
    let body = assert_json(response, StatusCode::BAD_REQUEST).unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"].is_string());
    assert!(body["error"]["details"]["name"].is_array());
}

#[tokio::test]
async fn test_malformed_date_rejected() {
    let app = app();
    let response = app
        .post(
            "/api/v1/members",
            json!({ "name": "Sierra", "joined_at": "15/02/2024" }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNPROCESSABLE_ENTITY).unwrap();
    assert_eq!(code, "INVALID_BODY");
}

#[tokio::test]
async fn test_invalid_and_unknown_ids() {
    let app = app();
    let response = app.get("/api/v1/members/not-a-uuid").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");

    let response = app
        .get(&format!("/api/v1/members/{}", uuid::Uuid::new_v4()))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).unwrap();
    assert_eq!(code, "UNKNOWN_MEMBER");
}
