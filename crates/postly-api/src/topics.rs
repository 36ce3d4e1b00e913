use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};

use postly_types::api::{PostResponse, TrendingQuery};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::posts::post_response;

/// All known topics, sorted.
pub async fn list_topics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let topics: Vec<String> = state.store.all_topics()?.into_iter().collect();
    Ok(Json(topics))
}

pub async fn posts_for_topic(
    State(state): State<AppState>,
    Path(topic): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let posts: Vec<PostResponse> = state
        .store
        .posts_for_topic(&topic)?
        .iter()
        .map(post_response)
        .collect();
    Ok(Json(posts))
}

/// Ranked topics for `[from, to]`; the window defaults to all posts so far.
pub async fn trending(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let to = match query.to {
        Some(to) => to,
        None => state.store.current_timestamp()? as i64,
    };
    let from = query.from.unwrap_or(0);

    Ok(Json(state.store.trending_topics(from, to)?))
}
