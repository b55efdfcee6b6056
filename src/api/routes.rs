//! # HTTP Routes
//!
//! Thin axum handlers over [`CatalogService`]. Handlers only extract the raw request
//! pieces and pick the success status; all decisions are made by the service.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use super::error::{ApiError, ApiResult};
use super::response::{ProductEnvelope, ProductPage, StatsResponse};
use super::service::CatalogService;
use super::stats::RequestStats;
use crate::validation::InvalidId;

/// Shared state for every handler.
pub struct AppState {
    pub service: CatalogService,
    pub stats: RequestStats,
}

impl AppState {
    pub fn new(service: CatalogService) -> Self {
        Self {
            service,
            stats: RequestStats::new(),
        }
    }
}

type SharedState = Arc<AppState>;

/// Build the Axum router
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product)
                .put(replace_product)
                .patch(patch_product)
                .delete(delete_product),
        )
        .route("/stats", get(stats))
        .fallback(unknown_route)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(middleware::from_fn_with_state(state.clone(), track_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Counts and logs every request, matched or not.
async fn track_requests(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    state.stats.record(Utc::now());
    info!(method = %request.method(), uri = %request.uri(), "Request");
    next.run(request).await
}

async fn list_products(
    State(state): State<SharedState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ProductPage>> {
    Ok(Json(state.service.list(&params).await?))
}

async fn get_product(
    State(state): State<SharedState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<ProductEnvelope>> {
    Ok(Json(state.service.get(&id_segment(id)?).await?))
}

async fn create_product(
    State(state): State<SharedState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ProductEnvelope>)> {
    let created = state.service.create(&body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn replace_product(
    State(state): State<SharedState>,
    id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> ApiResult<Json<ProductEnvelope>> {
    Ok(Json(state.service.replace(&id_segment(id)?, &body).await?))
}

async fn patch_product(
    State(state): State<SharedState>,
    id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> ApiResult<Json<ProductEnvelope>> {
    Ok(Json(state.service.patch(&id_segment(id)?, &body).await?))
}

async fn delete_product(
    State(state): State<SharedState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    state.service.delete(&id_segment(id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn stats(State(state): State<SharedState>) -> ApiResult<Json<StatsResponse>> {
    Ok(Json(state.service.stats(&state.stats).await?))
}

async fn unknown_route() -> ApiError {
    ApiError::UnknownRoute
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// A segment axum cannot decode (bad percent-encoding, invalid UTF-8) is a malformed id.
fn id_segment(path: Result<Path<String>, PathRejection>) -> ApiResult<String> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            debug!(error = %rejection, "Undecodable id segment");
            Err(InvalidId.into())
        }
    }
}
