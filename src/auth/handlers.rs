use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, SignupRequest},
        jwt::{CurrentUser, JwtKeys},
        password::{hash_password, verify_password},
        policy::validate_signup,
        repo::NewUser,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/users/signup", post(signup))
        .route("/users/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/users/me", get(me))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let valid = validate_signup(payload)?;

    if state.users.find_by_email(&valid.email).await?.is_some() {
        warn!(email = %valid.email, "email already registered");
        return Err(ApiError::EmailTaken);
    }

    let password_hash = hash_password(&valid.password)?;
    let user = state
        .users
        .create(NewUser {
            email: valid.email,
            password_hash,
            name: valid.name,
            phone_number: valid.phone_number,
            gender: valid.gender,
            date_of_birth: valid.date_of_birth,
            membership_status: valid.membership_status,
        })
        .await?;

    let token = JwtKeys::from_ref(&state).issue(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    let Some(user) = state.users.find_by_email(&payload.email).await? else {
        warn!(email = %payload.email, "login with unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = JwtKeys::from_ref(&state).issue(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

#[instrument(skip(current))]
pub async fn me(current: CurrentUser) -> Json<PublicUser> {
    let CurrentUser(user) = current;
    Json(user.into())
}
