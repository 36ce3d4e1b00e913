//! HTTP surface for the feed store: registration and login with bearer
//! tokens, posting, browsing by user or topic, trending topics and likes.

pub mod auth;
pub mod error;
pub mod likes;
pub mod middleware;
pub mod posts;
pub mod topics;
pub mod users;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use auth::{AppState, AppStateInner};

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/users", get(users::list_users))
        .route("/users/me", delete(users::delete_me))
        .route("/users/{user_name}/posts", get(users::posts_for_user))
        .route("/posts", get(posts::feed).post(posts::create_post))
        .route("/posts/{timestamp}/like", post(likes::toggle_like))
        .route("/topics", get(topics::list_topics))
        .route("/topics/{topic}/posts", get(topics::posts_for_topic))
        .route("/trending", get(topics::trending))
        .layer(from_fn_with_state(state.clone(), middleware::require_auth))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
