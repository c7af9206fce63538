use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{BookingRecord, CreateBookingRequest},
    services,
};
use crate::{
    auth::extractors::AuthUser,
    error::AppResult,
    extract::{ApiJson, ApiPath},
    state::AppState,
};

pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/my-bookings", get(my_bookings))
        .route("/bookings/:id", delete(delete_booking))
}

#[instrument(skip(state, payload))]
pub async fn create_booking(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    ApiJson(payload): ApiJson<CreateBookingRequest>,
) -> AppResult<Json<BookingRecord>> {
    let record = services::create_booking(&state, &email, payload.vehicle_id).await?;
    Ok(Json(record))
}

#[instrument(skip(state))]
pub async fn my_bookings(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> AppResult<Json<Vec<BookingRecord>>> {
    Ok(Json(services::list_my_bookings(&state, &email).await?))
}

#[instrument(skip(state))]
pub async fn delete_booking(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    services::delete_booking(&state, &email, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
