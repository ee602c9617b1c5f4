//! Test helpers for integration tests
//!
//! Builds the application over an `InMemoryStore` and sends requests through
//! `tower::ServiceExt::oneshot`, so no database or socket is needed.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use club_api::{create_app, AppState};
use club_common::AppConfig;
use club_core::FixedClock;
use club_service::memory::InMemoryStore;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Months to the Half patch used by every test app
pub const TEST_HALF_MIN_MONTHS: u32 = 4;

/// Captured response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Application under test
pub struct TestApp {
    pub router: Router,
    pub store: InMemoryStore,
}

impl TestApp {
    /// App whose clock is frozen at noon UTC on `today`
    pub fn at(today: NaiveDate) -> Result<Self> {
        let config = test_config()?;
        let store = InMemoryStore::new();

        let now = today
            .and_hms_opt(12, 0, 0)
            .expect("noon is a valid time")
            .and_utc();
        let service_context = store
            .builder()
            .clock(Arc::new(FixedClock(now)))
            .rules(config.progression.rules()?)
            .revenue_days(config.dashboard.revenue_days)
            .build()?;

        let router = create_app(AppState::new(service_context, config));
        Ok(Self { router, store })
    }

    /// Send a request and collect the JSON body (`Null` when empty)
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<TestResponse> {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok(TestResponse { status, body })
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<TestResponse> {
        self.request(Method::GET, path, None).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: Value) -> Result<TestResponse> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch(&self, path: &str, body: Value) -> Result<TestResponse> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<TestResponse> {
        self.request(Method::DELETE, path, None).await
    }
}

/// Configuration for tests; the database URL is never dialled
pub fn test_config() -> Result<AppConfig> {
    let vars: HashMap<&str, String> = HashMap::from([
        ("API_PORT", "0".to_string()),
        ("DATABASE_URL", "postgres://unused@localhost/club".to_string()),
        ("HALF_PATCH_MIN_MONTHS", TEST_HALF_MIN_MONTHS.to_string()),
        ("RATE_LIMIT_BURST", "1000".to_string()),
    ]);

    let config = AppConfig::from_lookup(|key| vars.get(key).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    Ok(config)
}

/// Assert response status and return the JSON body
pub fn assert_json(response: TestResponse, expected_status: StatusCode) -> Result<Value> {
    if response.status != expected_status {
        bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            response.status,
            response.body
        );
    }
    Ok(response.body)
}

/// Assert an error response and return its `error.code`
pub fn assert_error(response: TestResponse, expected_status: StatusCode) -> Result<String> {
    let body = assert_json(response, expected_status)?;
    match body["error"]["code"].as_str() {
        Some(code) => Ok(code.to_string()),
        None => bail!("Response is not an error body: {body}"),
    }
}
