use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::jwt::CurrentUser,
    error::ApiError,
    state::AppState,
    tours::{
        dto::{CreateTourRequest, UpdateTourRequest},
        repo::{NewTour, Tour, TourPatch},
    },
};

pub fn tour_routes() -> Router<AppState> {
    Router::new()
        .route("/tours", get(list_tours).post(create_tour))
        .route(
            "/tours/:id",
            get(get_tour).put(update_tour).delete(delete_tour),
        )
}

fn required(field: Option<String>, message: &'static str) -> Result<String, ApiError> {
    field
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ApiError::Validation(message.to_string()))
}

#[instrument(skip(state, current))]
pub async fn list_tours(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<Tour>>, ApiError> {
    let CurrentUser(user) = current;
    let tours = state.tours.list_by_owner(user.id).await?;
    Ok(Json(tours))
}

#[instrument(skip(state, current, payload))]
pub async fn create_tour(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<CreateTourRequest>,
) -> Result<(StatusCode, Json<Tour>), ApiError> {
    let CurrentUser(user) = current;
    let tour = state
        .tours
        .create(NewTour {
            user_id: user.id,
            name: required(payload.name, "Name is required")?,
            info: required(payload.info, "Info is required")?,
            image: required(payload.image, "Image is required")?,
            price: required(payload.price, "Price is required")?,
        })
        .await?;

    info!(tour_id = %tour.id, user_id = %user.id, "tour created");
    Ok((StatusCode::CREATED, Json(tour)))
}

#[instrument(skip(state, current))]
pub async fn get_tour(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Tour>, ApiError> {
    let CurrentUser(user) = current;
    let tour = state
        .tours
        .get_owned(user.id, id)
        .await?
        .ok_or(ApiError::NotFound("Tour"))?;
    Ok(Json(tour))
}

#[instrument(skip(state, current, payload))]
pub async fn update_tour(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTourRequest>,
) -> Result<Json<Tour>, ApiError> {
    let CurrentUser(user) = current;
    let patch = TourPatch {
        name: payload.name,
        info: payload.info,
        image: payload.image,
        price: payload.price,
    };
    let tour = state
        .tours
        .update_owned(user.id, id, patch)
        .await?
        .ok_or(ApiError::NotFound("Tour"))?;

    info!(tour_id = %tour.id, user_id = %user.id, "tour updated");
    Ok(Json(tour))
}

#[instrument(skip(state, current))]
pub async fn delete_tour(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let CurrentUser(user) = current;
    if !state.tours.delete_owned(user.id, id).await? {
        return Err(ApiError::NotFound("Tour"));
    }

    info!(tour_id = %id, user_id = %user.id, "tour deleted");
    Ok(StatusCode::NO_CONTENT)
}
