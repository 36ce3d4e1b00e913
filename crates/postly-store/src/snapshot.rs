//! Whole-store export and import. Reading and writing snapshots somewhere
//! durable is left to the caller.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, StoreError};
use crate::models::{Post, Timestamp};
use crate::{FeedState, FeedStore, UserEntry};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub saved_at: DateTime<Utc>,
    /// Counter value; the next post gets `timestamp + 1`.
    pub timestamp: Timestamp,
    /// Registration order.
    pub users: Vec<UserSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub name: String,
    #[serde(default)]
    pub credential: Option<String>,
    /// Oldest first.
    #[serde(default)]
    pub posts: Vec<Post>,
}

impl FeedStore {
    pub fn snapshot(&self) -> Result<StoreSnapshot> {
        self.with_state(|state| {
            Ok(StoreSnapshot {
                saved_at: Utc::now(),
                timestamp: state.timestamp,
                users: state
                    .users
                    .iter()
                    .map(|u| UserSnapshot {
                        name: u.name.clone(),
                        credential: state.credentials.get(&u.name).cloned(),
                        posts: u.posts.clone(),
                    })
                    .collect(),
            })
        })
    }

    /// Replace the entire state with `snapshot`. The snapshot is checked
    /// first; a rejected snapshot leaves the store as it was.
    pub fn restore(&self, snapshot: StoreSnapshot) -> Result<()> {
        let restored = build_state(snapshot)?;
        let (users, counter) = (restored.users.len(), restored.timestamp);

        self.with_state_mut(|state| {
            *state = restored;
            Ok(())
        })?;

        info!("Restored {} user(s), counter at {}", users, counter);
        Ok(())
    }
}

fn build_state(snapshot: StoreSnapshot) -> Result<FeedState> {
    let invalid = |msg: String| Err(StoreError::InvalidSnapshot(msg));

    let names: HashSet<&str> = snapshot.users.iter().map(|u| u.name.as_str()).collect();
    if names.len() != snapshot.users.len() {
        return invalid("duplicate user names".into());
    }

    let mut seen: HashSet<Timestamp> = HashSet::new();
    for user in &snapshot.users {
        let mut previous = 0;
        for post in &user.posts {
            let ts = post.timestamp();
            if post.author() != user.name {
                return invalid(format!(
                    "post {} is filed under '{}' but authored by '{}'",
                    ts,
                    user.name,
                    post.author()
                ));
            }
            if ts <= previous {
                return invalid(format!("posts of '{}' are not in creation order", user.name));
            }
            if ts > snapshot.timestamp {
                return invalid(format!("post {} is ahead of counter {}", ts, snapshot.timestamp));
            }
            if !seen.insert(ts) {
                return invalid(format!("post timestamp {} is used twice", ts));
            }
            if let Some(liker) = post.liked_by().iter().find(|n| !names.contains(n.as_str())) {
                return invalid(format!("post {} is liked by unknown user '{}'", ts, liker));
            }
            previous = ts;
        }
    }

    let mut credentials = HashMap::new();
    let mut users = Vec::with_capacity(snapshot.users.len());
    for user in snapshot.users {
        if let Some(credential) = user.credential {
            credentials.insert(user.name.clone(), credential);
        }
        users.push(UserEntry {
            name: user.name,
            posts: user.posts,
        });
    }

    Ok(FeedState {
        users,
        credentials,
        timestamp: snapshot.timestamp,
    })
}
