use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use postly_store::Post;
use postly_types::api::{Claims, CreatePostRequest, CreatePostResponse, PostResponse};

use crate::auth::AppState;
use crate::error::ApiError;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let timestamp = state.store.add_post(&claims.sub, &req.text)?;
    Ok((StatusCode::CREATED, Json(CreatePostResponse { timestamp })))
}

/// Every post from every user, oldest first.
pub async fn feed(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let mut posts: Vec<PostResponse> = state
        .store
        .all_posts()?
        .iter()
        .flat_map(|user| user.posts.iter().map(post_response))
        .collect();
    posts.sort_by_key(|p| p.timestamp);

    Ok(Json(posts))
}

pub(crate) fn post_response(post: &Post) -> PostResponse {
    PostResponse {
        author: post.author().to_string(),
        content: post.content().to_string(),
        timestamp: post.timestamp(),
        topics: post.topics().to_vec(),
        likes: post.likes(),
        liked_by: post.liked_by().iter().cloned().collect(),
    }
}
