use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use postly_types::api::{Claims, PostResponse};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::posts::post_response;

pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.store.list_users()?))
}

/// Delete the caller's own account. The token stops working afterwards.
pub async fn delete_me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.delete_user(&claims.sub)?;
    Ok(StatusCode::NO_CONTENT)
}

/// A user's posts, newest first.
pub async fn posts_for_user(
    State(state): State<AppState>,
    Path(user_name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let posts: Vec<PostResponse> = state
        .store
        .posts_for_user(&user_name)?
        .iter()
        .map(post_response)
        .collect();
    Ok(Json(posts))
}
