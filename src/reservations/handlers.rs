use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::AuthUser,
    dto::MessageResponse,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath},
    reservations::dto::{ReservationRequest, ReservationView},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/user/reservations", get(list_reservations))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", post(create_reservation))
        .route(
            "/reservations/:id",
            put(update_reservation).delete(delete_reservation),
        )
}

/// Zero affected rows means the reservation is absent or not the caller's.
/// Both cases answer 404 so ownership never leaks.
fn ensure_owned(affected: u64, user_id: i64, reservation_id: i64) -> ApiResult<()> {
    if affected == 0 {
        warn!(user_id, reservation_id, "reservation not found for caller");
        return Err(ApiError::NotFound("Reservation not found".into()));
    }
    Ok(())
}

#[instrument(skip(state))]
pub async fn list_reservations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ReservationView>>> {
    let rows = state.reservations.list_for_user(auth.id).await?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn create_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<ReservationRequest>,
) -> ApiResult<impl IntoResponse> {
    let id = state.reservations.create(auth.id, &body).await?;
    info!(user_id = auth.id, reservation_id = id, "reservation created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/reservations/{}", id))],
        Json(MessageResponse::new("Reservation created")),
    ))
}

#[instrument(skip(state))]
pub async fn update_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<ReservationRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let affected = state.reservations.update(auth.id, id, &body).await?;
    ensure_owned(affected, auth.id, id)?;
    info!(user_id = auth.id, reservation_id = id, "reservation updated");
    Ok(Json(MessageResponse::new("Reservation updated")))
}

#[instrument(skip(state))]
pub async fn delete_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let affected = state.reservations.delete(auth.id, id).await?;
    ensure_owned(affected, auth.id, id)?;
    info!(user_id = auth.id, reservation_id = id, "reservation deleted");
    Ok(Json(MessageResponse::new("Reservation deleted")))
}
