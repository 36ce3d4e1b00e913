//! In-memory social feed store: users, their posts, hashtag topics, likes
//! and time-windowed trending topics.
//!
//! One [`FeedStore`] owns all state behind a single mutex. Every operation
//! runs as one critical section, so check-then-act sequences (user exists,
//! then append a post) cannot interleave with other callers.

pub mod error;
pub mod models;
pub mod password;
pub mod snapshot;
pub mod topics;

mod likes;
mod posts;
mod trending;
mod users;

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::info;

pub use error::{ErrorKind, Result, StoreError};
pub use models::{MAX_POST_LENGTH, Post, Timestamp, UserPosts};
pub use password::PasswordAlgorithm;
pub use snapshot::{StoreSnapshot, UserSnapshot};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub password_algorithm: PasswordAlgorithm,
}

pub struct FeedStore {
    config: StoreConfig,
    state: Mutex<FeedState>,
}

#[derive(Default)]
struct FeedState {
    /// Registration order is kept so listings and scans are reproducible.
    users: Vec<UserEntry>,
    credentials: HashMap<String, String>,
    /// Timestamp of the most recently created post; 0 before the first.
    timestamp: Timestamp,
}

struct UserEntry {
    name: String,
    posts: Vec<Post>,
}

impl FeedState {
    fn user(&self, name: &str) -> Option<&UserEntry> {
        self.users.iter().find(|u| u.name == name)
    }

    fn user_mut(&mut self, name: &str) -> Option<&mut UserEntry> {
        self.users.iter_mut().find(|u| u.name == name)
    }

    fn contains_user(&self, name: &str) -> bool {
        self.user(name).is_some()
    }

    /// Every post with its author, users in registration order,
    /// each user's posts oldest first.
    fn posts(&self) -> impl Iterator<Item = (&str, &Post)> {
        self.users
            .iter()
            .flat_map(|u| u.posts.iter().map(move |p| (u.name.as_str(), p)))
    }

    fn post_mut(&mut self, timestamp: Timestamp) -> Option<&mut Post> {
        self.users
            .iter_mut()
            .flat_map(|u| u.posts.iter_mut())
            .find(|p| p.timestamp() == timestamp)
    }
}

impl FeedStore {
    pub fn new(config: StoreConfig) -> Self {
        info!(
            "Feed store ready (password hashing: {})",
            config.password_algorithm
        );
        Self {
            config,
            state: Mutex::new(FeedState::default()),
        }
    }

    fn with_state<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&FeedState) -> Result<T>,
    {
        let state = self.state.lock().map_err(|_| StoreError::Poisoned)?;
        f(&state)
    }

    fn with_state_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut FeedState) -> Result<T>,
    {
        let mut state = self.state.lock().map_err(|_| StoreError::Poisoned)?;
        f(&mut state)
    }
}

impl Default for FeedStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}
