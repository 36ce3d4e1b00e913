use tracing::debug;

use crate::error::{Result, StoreError};
use crate::models::Timestamp;
use crate::FeedStore;

impl FeedStore {
    // -- Likes --

    /// Like the post at `timestamp` for `user_name`, or unlike it if they
    /// already do. Returns whether the post is liked by them afterwards and
    /// its like count, both read under the same lock as the toggle.
    ///
    /// Only registered users may like posts.
    pub fn toggle_like(&self, user_name: &str, timestamp: Timestamp) -> Result<(bool, u32)> {
        self.with_state_mut(|state| {
            if !state.contains_user(user_name) {
                return Err(StoreError::UserNotFound(user_name.to_string()));
            }
            let post = state
                .post_mut(timestamp)
                .ok_or(StoreError::PostNotFound(timestamp))?;

            let liked = post.toggle_like(user_name);
            let likes = post.likes();
            debug!(
                "'{}' {} post {} ({} like(s))",
                user_name,
                if liked { "liked" } else { "unliked" },
                timestamp,
                likes
            );
            Ok((liked, likes))
        })
    }
}
