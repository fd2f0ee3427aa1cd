use super::auth::AdminGuard;
use super::error::{ApiError, Envelope};
use super::AppState;
use crate::admin::PaymentConfirmation;
use crate::domain::{
    Order, OrderOrigin, OrderStatus, OrderSubmission, Review, ReviewCreate, Service, ServiceCreate,
    ServicePatch,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;
type Created<T> = Result<(StatusCode, Json<Envelope<T>>), ApiError>;

#[derive(Debug, Serialize)]
pub struct Health {
    pub success: bool,
    pub store_connected: bool,
    pub fallback_ephemeral: bool,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        success: true,
        store_connected: state.store.is_connected(),
        fallback_ephemeral: state.fallback_ephemeral,
    })
}

#[instrument(skip(state))]
pub async fn list_services(State(state): State<AppState>) -> Json<Envelope<Vec<Service>>> {
    let listing = state.catalog.list_services().await;
    let mut body = Envelope::list(listing.items);
    body.is_substitute = Some(listing.is_substitute);
    Json(body)
}

#[instrument(skip(state, payload))]
pub async fn submit_order(
    State(state): State<AppState>,
    payload: Result<Json<OrderSubmission>, JsonRejection>,
) -> Created<Order> {
    let Json(submission) = payload?;
    let order = state.intake.submit_order(submission).await?;
    let message = match order.origin {
        OrderOrigin::Primary => "Order placed successfully",
        OrderOrigin::Local => "Order saved locally and will be processed shortly",
        OrderOrigin::Emergency => "Order received, our team will contact you to confirm",
    };
    Ok((StatusCode::CREATED, Json(Envelope::data(order).with_message(message))))
}

#[instrument(skip(state, _guard))]
pub async fn list_orders(State(state): State<AppState>, _guard: AdminGuard) -> ApiResult<Vec<Order>> {
    let listing = state.intake.list_orders().await;
    let mut body = Envelope::list(listing.orders);
    body.degraded = Some(listing.degraded);
    Ok(Json(body))
}

#[instrument(skip(state))]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> ApiResult<Vec<Review>> {
    let reviews = state.reviews.list_reviews(&service_id).await?;
    Ok(Json(Envelope::list(reviews)))
}

#[instrument(skip(state, payload))]
pub async fn submit_review(
    State(state): State<AppState>,
    payload: Result<Json<ReviewCreate>, JsonRejection>,
) -> Created<Review> {
    let Json(params) = payload?;
    let review = state.reviews.submit_review(params).await?;
    Ok((StatusCode::CREATED, Json(Envelope::data(review).with_message("Review added"))))
}

#[instrument(skip(state, payload))]
pub async fn confirm_payment(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    payload: Option<Json<PaymentConfirmation>>,
) -> ApiResult<Order> {
    let confirmation = payload.map(|Json(body)| body).unwrap_or_default();
    let order = state.admin.confirm_payment(&order_id, confirmation).await?;
    Ok(Json(Envelope::data(order).with_message("Payment confirmed")))
}

#[instrument(skip(state, _guard, payload))]
pub async fn create_service(
    State(state): State<AppState>,
    _guard: AdminGuard,
    payload: Result<Json<ServiceCreate>, JsonRejection>,
) -> Created<Service> {
    let Json(params) = payload?;
    let service = state.admin.create_service(params).await?;
    Ok((StatusCode::CREATED, Json(Envelope::data(service).with_message("Service created"))))
}

#[instrument(skip(state, _guard, payload))]
pub async fn update_service(
    State(state): State<AppState>,
    _guard: AdminGuard,
    Path(id): Path<String>,
    payload: Result<Json<ServicePatch>, JsonRejection>,
) -> ApiResult<Service> {
    let Json(patch) = payload?;
    let service = state.admin.update_service(&id, patch).await?;
    Ok(Json(Envelope::data(service).with_message("Service updated")))
}

#[instrument(skip(state, _guard))]
pub async fn delete_service(
    State(state): State<AppState>,
    _guard: AdminGuard,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.admin.delete_service(&id).await?;
    Ok(Json(Envelope::message("Service deleted")))
}

#[instrument(skip(state, _guard, payload))]
pub async fn update_order_status(
    State(state): State<AppState>,
    _guard: AdminGuard,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> ApiResult<Order> {
    let Json(update) = payload?;
    let order = state.admin.set_order_status(&id, update.status).await?;
    Ok(Json(Envelope::data(order).with_message("Order status updated")))
}

#[instrument(skip(state, _guard))]
pub async fn delete_order(
    State(state): State<AppState>,
    _guard: AdminGuard,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.admin.delete_order(&id).await?;
    Ok(Json(Envelope::message("Order deleted")))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
