//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use club_common::{AppConfig, AppError, AppResult, ProgressionConfig};
use club_db::{
    create_pool, run_migrations, PgActivityRepository, PgComandaRepository, PgInvoiceRepository,
    PgMemberRepository, PgStockRepository,
};
use club_service::ServiceContextBuilder;
use tokio::net::{lookup_host, TcpListener};
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes are merged after the middleware so they bypass rate limiting.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    router.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> AppResult<AppState> {
    let rules = config
        .progression
        .rules()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let half_min_months = config.progression.half_min_months;
    if ProgressionConfig::DISPUTED_HALF_MIN_MONTHS.contains(&half_min_months) {
        warn!(
            half_min_months,
            alternatives = ?ProgressionConfig::DISPUTED_HALF_MIN_MONTHS,
            "Half patch minimum tenure is disputed between 4 and 6 months; \
             confirm HALF_PATCH_MIN_MONTHS with the club before relying on eligibility"
        );
    } else {
        warn!(
            half_min_months,
            "HALF_PATCH_MIN_MONTHS matches neither 4 nor 6 months used by the club so far"
        );
    }

    let db_config = club_db::DatabaseConfig {
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..club_db::DatabaseConfig::new(config.database.url.as_str())
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let member_repo = Arc::new(PgMemberRepository::new(pool.clone()));
    let activity_repo = Arc::new(PgActivityRepository::new(pool.clone()));
    let stock_repo = Arc::new(PgStockRepository::new(pool.clone()));
    let comanda_repo = Arc::new(PgComandaRepository::new(pool.clone()));
    let invoice_repo = Arc::new(PgInvoiceRepository::new(pool.clone()));

    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .member_repo(member_repo)
        .activity_repo(activity_repo)
        .stock_repo(stock_repo)
        .comanda_repo(comanda_repo)
        .invoice_repo(invoice_repo)
        .rules(rules)
        .revenue_days(config.dashboard.revenue_days)
        .build()?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> AppResult<()> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let address = config.api.address();
    let addr = lookup_host(address.as_str())
        .await
        .ok()
        .and_then(|mut addrs| addrs.next())
        .ok_or_else(|| AppError::Config(format!("Cannot resolve listen address {address}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
