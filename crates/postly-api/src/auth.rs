use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::{error, info};

use postly_store::FeedStore;
use postly_types::api::{AuthResponse, Claims, LoginRequest, RegisterRequest};

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: FeedStore,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_name = normalize_user_name(&req.user_name);
    if user_name.is_empty() {
        return Err(ApiError::MissingField("user_name"));
    }
    if req.password.is_empty() {
        return Err(ApiError::MissingField("password"));
    }

    // Password hashing is CPU-bound; keep it off the async workers.
    let st = state.clone();
    let name = user_name.clone();
    tokio::task::spawn_blocking(move || st.store.register(&name, &req.password))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(e.to_string())
        })??;

    let token = create_token(&state, &user_name)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse { user_name, token }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_name = normalize_user_name(&req.user_name);
    let st = state.clone();
    let name = user_name.clone();
    let authenticated =
        tokio::task::spawn_blocking(move || st.store.authenticate(&name, &req.password))
            .await
            .map_err(|e| {
                error!("spawn_blocking join error: {}", e);
                ApiError::Internal(e.to_string())
            })?;

    if !authenticated {
        return Err(ApiError::InvalidCredentials);
    }

    info!("User '{}' logged in", user_name);
    let token = create_token(&state, &user_name)?;

    Ok(Json(AuthResponse { user_name, token }))
}

/// Names are stored without surrounding whitespace.
fn normalize_user_name(raw: &str) -> String {
    raw.trim().to_string()
}

fn create_token(state: &AppStateInner, user_name: &str) -> Result<String, ApiError> {
    let claims = Claims {
        sub: user_name.to_string(),
        exp: (chrono::Utc::now() + state.token_ttl).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.to_string()))
}
