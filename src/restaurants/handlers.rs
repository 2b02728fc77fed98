use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use tracing::{debug, instrument};

use crate::{
    error::ApiResult,
    extract::ApiQuery,
    restaurants::dto::{Restaurant, RestaurantQuery},
    state::AppState,
};

pub fn restaurant_routes() -> Router<AppState> {
    Router::new().route("/restaurants", get(list_restaurants))
}

/// Public listing; no token required.
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<RestaurantQuery>,
) -> ApiResult<Json<Vec<Restaurant>>> {
    let rows = state.restaurants.search(q.name(), q.location()).await?;
    debug!(count = rows.len(), "restaurants listed");
    Ok(Json(rows))
}
