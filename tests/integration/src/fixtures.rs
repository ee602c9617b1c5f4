//! Test fixtures and data generators

use anyhow::{Context, Result};
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::helpers::{assert_json, TestApp};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Id field of a JSON object
pub fn id_of(body: &Value) -> Result<String> {
    body["id"]
        .as_str()
        .map(String::from)
        .context("response has no id")
}

/// Register a prospect with a backfilled join date
pub async fn create_prospect(app: &TestApp, name: &str, joined_at: NaiveDate) -> Result<String> {
    let response = app
        .post("/api/v1/members", json!({ "name": name, "joined_at": joined_at }))
        .await?;
    id_of(&assert_json(response, StatusCode::CREATED)?)
}

/// Log an activity and return the raw status and body
pub async fn log_activity(
    app: &TestApp,
    member_id: &str,
    kind: &str,
    on: NaiveDate,
) -> Result<(StatusCode, Value)> {
    let response = app
        .post(
            &format!("/api/v1/members/{member_id}/activities"),
            json!({ "activity_type": kind, "activity_date": on }),
        )
        .await?;
    Ok((response.status, response.body))
}

/// Log and immediately validate an activity
pub async fn log_validated(app: &TestApp, member_id: &str, kind: &str, on: NaiveDate) -> Result<()> {
    let (status, body) = log_activity(app, member_id, kind, on).await?;
    if status != StatusCode::CREATED {
        anyhow::bail!("logging {kind} on {on} failed with {status}: {body}");
    }
    let activity_id = id_of(&body)?;
    let response = app
        .post(
            &format!("/api/v1/activities/{activity_id}/validate"),
            json!({ "reviewer": "Sargento" }),
        )
        .await?;
    assert_json(response, StatusCode::OK)?;
    Ok(())
}

/// Create a stock item with an opening level
pub async fn create_stock_item(app: &TestApp, name: &str, price: &str, quantity: i32) -> Result<String> {
    let response = app
        .post(
            "/api/v1/stock",
            json!({
                "name": name,
                "category": "bebidas",
                "unit": "un",
                "unit_price": price,
                "min_quantity": 2,
                "initial_quantity": quantity
            }),
        )
        .await?;
    id_of(&assert_json(response, StatusCode::CREATED)?)
}

/// Progression body for a member
pub async fn progression(app: &TestApp, member_id: &str) -> Result<Value> {
    let response = app
        .get(&format!("/api/v1/members/{member_id}/progression"))
        .await?;
    assert_json(response, StatusCode::OK)
}
