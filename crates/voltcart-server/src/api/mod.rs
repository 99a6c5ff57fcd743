mod admin;
mod auth;
mod catalog;
mod orders;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use voltcart_notify::GatewayClient;

use crate::middleware::{request_id, require_bearer_auth, AuthState};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth: AuthState,
    pub gateway: Option<Arc<GatewayClient>>,
}

/// JSON error body shared by every endpoint: `{"error": <message>}`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    error: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            error: message.into(),
        }
    }

    /// Missing or malformed request input.
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// A failed store operation, surfaced to the caller with its message.
    pub(crate) fn store(error: &voltcart_db::DbError) -> Self {
        tracing::error!(error = %error, "database query failed");
        Self::new(StatusCode::BAD_REQUEST, error.to_string())
    }

    /// A failure the caller cannot do anything about.
    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState) -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(orders::list_orders))
        .route("/api/order/{id}", get(orders::get_order))
        .layer(axum::middleware::from_fn_with_state(
            auth,
            require_bearer_auth,
        ))
}

pub fn build_app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route("/api/login", post(auth::login))
        .route("/api/order", post(orders::create_order))
        .route("/api/products-retail", get(catalog::list_retail_products))
        .route(
            "/api/products-wholesale",
            get(catalog::list_wholesale_products),
        )
        .route("/api/categories", get(catalog::list_categories))
        .route("/api/product/{id}", get(catalog::get_product))
        .route("/api/best-products", get(catalog::best_products))
        .route("/api/search", get(catalog::search_products))
        .route("/add-category", post(admin::add_category))
        .route("/upload-csv", post(admin::upload_csv));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(state.auth.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match voltcart_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}
