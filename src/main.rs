use axum::{extract::DefaultBodyLimit, http::HeaderValue, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use sentinel_api::config;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let app_config = config::config();
    tracing::info!("Starting Sentinel API in {:?} mode", app_config.environment);

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("SENTINEL_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Sentinel API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(demo_routes())
        .merge(webhook_routes())
        .merge(admin_routes())
        // Protected API (bearer token required)
        .merge(api_routes())
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(
            config::config().api.max_request_size_bytes,
        ))
}

fn demo_routes() -> Router {
    use sentinel_api::handlers::public::demo;

    Router::new().route("/demo/threat-feed", get(demo::threat_feed_get))
}

fn webhook_routes() -> Router {
    use axum::routing::post;
    use sentinel_api::handlers::public::billing;

    Router::new().route("/webhooks/billing", post(billing::billing_post))
}

fn admin_routes() -> Router {
    use axum::routing::post;
    use sentinel_api::handlers::public::admin;

    Router::new().route("/admin/setup", post(admin::setup_post))
}

fn api_routes() -> Router {
    use axum::routing::post;
    use sentinel_api::handlers::protected::{
        alerts, integrations, preferences, profile, summary, targets,
    };
    use sentinel_api::middleware::auth::jwt_auth_middleware;

    Router::new()
        .route("/api/alerts", get(alerts::alerts_get))
        .route("/api/alerts/dismiss", post(alerts::alerts_dismiss))
        .route(
            "/api/targets",
            get(targets::targets_get).post(targets::targets_post),
        )
        .route("/api/targets/pause", post(targets::targets_pause))
        .route(
            "/api/profile",
            get(profile::profile_get).put(profile::profile_put),
        )
        .route(
            "/api/preferences",
            get(preferences::preferences_get).put(preferences::preferences_put),
        )
        .route(
            "/api/integrations/webhook",
            get(integrations::webhook_get).put(integrations::webhook_put),
        )
        .route("/api/ai/summary", post(summary::summary_post))
        .route_layer(axum::middleware::from_fn(jwt_auth_middleware))
}

/// CORS policy: explicit origin list from config, permissive when the list
/// is empty (development).
fn cors_layer() -> CorsLayer {
    let origins = &config::config().security.cors_origins;
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Sentinel API",
            "version": version,
            "description": "Crypto security monitoring backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "demo": "/demo/threat-feed (public)",
                "billing": "/webhooks/billing (public - signature verified)",
                "admin": "/admin/setup (public - credential gated)",
                "alerts": "/api/alerts, /api/alerts/dismiss (protected)",
                "targets": "/api/targets, /api/targets/pause (protected)",
                "profile": "/api/profile (protected)",
                "preferences": "/api/preferences (protected)",
                "integrations": "/api/integrations/webhook (protected)",
                "ai": "/api/ai/summary (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match sentinel_api::database::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
