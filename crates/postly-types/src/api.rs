use serde::{Deserialize, Serialize};

// -- JWT Claims --

/// Session token claims. `sub` is the user name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user_name: String,
    pub token: String,
}

// -- Posts --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePostRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePostResponse {
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub author: String,
    pub content: String,
    pub timestamp: u64,
    pub topics: Vec<String>,
    pub likes: u32,
    pub liked_by: Vec<String>,
}

// -- Likes --

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeResponse {
    pub liked: bool,
    pub likes: u32,
}

// -- Topics --

/// Trending window. Missing bounds default to the whole history.
#[derive(Debug, Default, Deserialize)]
pub struct TrendingQuery {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
