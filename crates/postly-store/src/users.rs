use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::password::verify_password;
use crate::{FeedStore, UserEntry};

impl FeedStore {
    // -- Users --

    /// Create `name` with no posts and store a hash of `password`.
    pub fn register(&self, name: &str, password: &str) -> Result<()> {
        // Hashed before taking the lock.
        let credential = self.config.password_algorithm.hash(password)?;

        self.with_state_mut(|state| {
            if state.contains_user(name) {
                return Err(StoreError::AlreadyExists(name.to_string()));
            }
            state.users.push(UserEntry {
                name: name.to_string(),
                posts: Vec::new(),
            });
            state.credentials.insert(name.to_string(), credential);
            Ok(())
        })?;

        info!("Registered user '{}'", name);
        Ok(())
    }

    /// True iff `name` has a credential matching `password`.
    /// Unknown users are simply not authenticated.
    pub fn authenticate(&self, name: &str, password: &str) -> bool {
        let stored = self
            .with_state(|state| Ok(state.credentials.get(name).cloned()))
            .ok()
            .flatten();

        match stored {
            Some(credential) => verify_password(&credential, password),
            None => {
                debug!("Authentication for unknown user '{}'", name);
                false
            }
        }
    }

    /// Remove `name`, its posts, its credential, and its likes on other posts.
    pub fn delete_user(&self, name: &str) -> Result<()> {
        let removed_posts = self.with_state_mut(|state| {
            let idx = state
                .users
                .iter()
                .position(|u| u.name == name)
                .ok_or_else(|| StoreError::UserNotFound(name.to_string()))?;

            let entry = state.users.remove(idx);
            state.credentials.remove(name);
            for post in state.users.iter_mut().flat_map(|u| u.posts.iter_mut()) {
                post.forget_liker(name);
            }
            Ok(entry.posts.len())
        })?;

        info!("Deleted user '{}' and {} post(s)", name, removed_posts);
        Ok(())
    }

    /// Current user names in registration order.
    pub fn list_users(&self) -> Result<Vec<String>> {
        self.with_state(|state| Ok(state.users.iter().map(|u| u.name.clone()).collect()))
    }

    pub fn user_exists(&self, name: &str) -> Result<bool> {
        self.with_state(|state| Ok(state.contains_user(name)))
    }
}
