use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};

use postly_store::Timestamp;
use postly_types::api::{Claims, LikeResponse};

use crate::auth::AppState;
use crate::error::ApiError;

pub async fn toggle_like(
    State(state): State<AppState>,
    Path(timestamp): Path<Timestamp>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let (liked, likes) = state.store.toggle_like(&claims.sub, timestamp)?;

    Ok(Json(LikeResponse { liked, likes }))
}
