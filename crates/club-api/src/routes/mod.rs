//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{activities, comandas, dashboard, health, invoices, members, stock};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(member_routes())
        .merge(activity_routes())
        .merge(stock_routes())
        .merge(comanda_routes())
        .merge(invoice_routes())
        .route("/dashboard", get(dashboard::get_dashboard))
}

/// Member routes
fn member_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/members",
            post(members::create_member).get(members::list_members),
        )
        .route(
            "/members/:id",
            get(members::get_member)
                .patch(members::update_member)
                .delete(members::deactivate_member),
        )
        .route("/members/:id/promote", post(members::promote_member))
        .route("/members/:id/progression", get(members::get_progression))
        .route(
            "/members/:id/activities",
            get(activities::list_member_activities).post(activities::log_activity),
        )
        .route("/members/:id/dues", get(members::get_member_dues))
}

/// Activity review routes
fn activity_routes() -> Router<AppState> {
    Router::new()
        .route("/activities/kinds", get(activities::list_kinds))
        .route("/activities/pending", get(activities::list_pending))
        .route("/activities/:id", delete(activities::delete_activity))
        .route("/activities/:id/validate", post(activities::validate_activity))
        .route("/activities/:id/reject", post(activities::reject_activity))
}

/// Inventory routes
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/stock", get(stock::list_items).post(stock::create_item))
        .route("/stock/low", get(stock::list_low))
        .route("/stock/:id", get(stock::get_item).patch(stock::update_item))
        .route("/stock/:id/movements", post(stock::record_movement))
}

/// Bar tab routes
fn comanda_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/comandas",
            get(comandas::list_comandas).post(comandas::open_comanda),
        )
        .route("/comandas/:id", get(comandas::get_comanda))
        .route("/comandas/:id/items", post(comandas::add_item))
        .route(
            "/comandas/:id/items/:item_id",
            delete(comandas::remove_item),
        )
        .route("/comandas/:id/pay", post(comandas::pay_comanda))
        .route("/comandas/:id/cancel", post(comandas::cancel_comanda))
}

/// Dues routes
fn invoice_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/invoices",
            get(invoices::list_invoices).post(invoices::create_invoice),
        )
        .route(
            "/invoices/:id/shares/:member_id/pay",
            post(invoices::pay_share),
        )
}
