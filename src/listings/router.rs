use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::comparison::ApartmentView;
use super::domain::{ApartmentDraft, ApartmentId, ListingQuery};
use super::repository::{ApartmentRepository, RepositoryError};
use super::service::{assess_listing, ListingService, ListingServiceError};
use crate::scoring::ApartmentAttributes;

/// Ad-hoc scoring request; the advertised rent is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateRequest {
    #[serde(flatten)]
    pub attributes: ApartmentAttributes,
    #[serde(default)]
    pub advertised_rent: Option<f64>,
}

/// Router builder exposing the catalog and the WWS calculator.
pub fn listing_router<R>(service: Arc<ListingService<R>>) -> Router
where
    R: ApartmentRepository + 'static,
{
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route(
            "/api/v1/apartments",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/api/v1/apartments/:id",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route("/api/v1/wws/calculate", post(calculate_handler))
        .with_state(service)
}

pub(crate) async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "UP", "message": "API is healthy" }))
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Query(query): Query<ListingQuery>,
) -> Response
where
    R: ApartmentRepository + 'static,
{
    match service.list(&query) {
        Ok(apartments) => {
            let views: Vec<ApartmentView> =
                apartments.into_iter().map(ApartmentView::from).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Path(id): Path<u64>,
) -> Response
where
    R: ApartmentRepository + 'static,
{
    match service.get(ApartmentId(id)) {
        Ok(apartment) => (StatusCode::OK, Json(ApartmentView::from(apartment))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Json(draft): Json<ApartmentDraft>,
) -> Response
where
    R: ApartmentRepository + 'static,
{
    match service.create(draft) {
        Ok(apartment) => {
            (StatusCode::CREATED, Json(ApartmentView::from(apartment))).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Path(id): Path<u64>,
    Json(draft): Json<ApartmentDraft>,
) -> Response
where
    R: ApartmentRepository + 'static,
{
    match service.update(ApartmentId(id), draft) {
        Ok(apartment) => (StatusCode::OK, Json(ApartmentView::from(apartment))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Path(id): Path<u64>,
) -> Response
where
    R: ApartmentRepository + 'static,
{
    match service.delete(ApartmentId(id)) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn calculate_handler(Json(request): Json<CalculateRequest>) -> Response {
    let result = assess_listing(&request.attributes, request.advertised_rent);
    (StatusCode::OK, Json(result)).into_response()
}

fn error_response(err: ListingServiceError) -> Response {
    match err {
        ListingServiceError::Repository(RepositoryError::NotFound(_)) => {
            let payload = json!({ "message": "Apartment not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        ListingServiceError::Validation(validation) => {
            let payload = json!({
                "error": validation.to_string(),
                "violations": validation.violations,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        other => {
            error!(error = %other, "listing request failed");
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
