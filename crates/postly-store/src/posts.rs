use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::models::{Post, Timestamp, UserPosts};
use crate::FeedStore;

impl FeedStore {
    // -- Posts --

    /// Append a post for `name` and return its timestamp.
    /// Nothing changes, the counter included, unless the post is accepted.
    pub fn add_post(&self, name: &str, text: &str) -> Result<Timestamp> {
        self.with_state_mut(|state| {
            let next = state.timestamp + 1;
            let user = state
                .user_mut(name)
                .ok_or_else(|| StoreError::UserNotFound(name.to_string()))?;

            let post = Post::new(name, text, next)?;
            debug!("Post {} by '{}' with topics {:?}", next, name, post.topics());
            user.posts.push(post);
            state.timestamp = next;
            Ok(next)
        })
    }

    /// `name`'s posts, newest first.
    pub fn posts_for_user(&self, name: &str) -> Result<Vec<Post>> {
        self.with_state(|state| {
            let user = state
                .user(name)
                .ok_or_else(|| StoreError::UserNotFound(name.to_string()))?;
            Ok(user.posts.iter().rev().cloned().collect())
        })
    }

    /// Posts tagged with exactly `topic`, users in registration order and
    /// each user's posts oldest first. Unknown topics yield nothing.
    pub fn posts_for_topic(&self, topic: &str) -> Result<Vec<Post>> {
        self.with_state(|state| {
            Ok(state
                .posts()
                .filter(|(_, post)| post.has_topic(topic))
                .map(|(_, post)| post.clone())
                .collect())
        })
    }

    /// Every topic used by any current post.
    pub fn all_topics(&self) -> Result<BTreeSet<String>> {
        self.with_state(|state| {
            Ok(state
                .posts()
                .flat_map(|(_, post)| post.topics().iter().cloned())
                .collect())
        })
    }

    /// Full snapshot of posts per user, in registration order. No cross-user
    /// ordering is imposed.
    pub fn all_posts(&self) -> Result<Vec<UserPosts>> {
        self.with_state(|state| {
            Ok(state
                .users
                .iter()
                .map(|u| UserPosts {
                    user_name: u.name.clone(),
                    posts: u.posts.clone(),
                })
                .collect())
        })
    }

    /// Timestamp of the last post created, 0 if none yet.
    pub fn current_timestamp(&self) -> Result<Timestamp> {
        self.with_state(|state| Ok(state.timestamp))
    }

    pub fn get_post(&self, timestamp: Timestamp) -> Result<Post> {
        self.with_state(|state| {
            state
                .posts()
                .find(|(_, post)| post.timestamp() == timestamp)
                .map(|(_, post)| post.clone())
                .ok_or(StoreError::PostNotFound(timestamp))
        })
    }

    pub fn post_count(&self) -> Result<usize> {
        self.with_state(|state| Ok(state.users.iter().map(|u| u.posts.len()).sum()))
    }
}
