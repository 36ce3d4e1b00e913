//! Feed entities. A post's content, timestamp and topics are fixed at
//! construction; only the like counter and liked-by set change afterwards,
//! and only through [`Post::toggle_like`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::topics::extract_topics;

/// Creation order and post identifier in one. The first post is 1.
pub type Timestamp = u64;

/// Maximum post length, counted in characters.
pub const MAX_POST_LENGTH: usize = 140;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PostRecord")]
pub struct Post {
    author: String,
    content: String,
    timestamp: Timestamp,
    topics: Vec<String>,
    likes: u32,
    liked_by: BTreeSet<String>,
}

impl Post {
    pub(crate) fn new(
        author: impl Into<String>,
        content: impl Into<String>,
        timestamp: Timestamp,
    ) -> Result<Self> {
        let content = content.into();
        validate_content(&content)?;

        let topics = extract_topics(&content);
        Ok(Self {
            author: author.into(),
            content,
            timestamp,
            topics,
            likes: 0,
            liked_by: BTreeSet::new(),
        })
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }

    pub fn likes(&self) -> u32 {
        self.likes
    }

    pub fn liked_by(&self) -> &BTreeSet<String> {
        &self.liked_by
    }

    pub fn is_liked_by(&self, user_name: &str) -> bool {
        self.liked_by.contains(user_name)
    }

    /// Flip `user_name`'s like. Returns true if the post is now liked by them.
    pub(crate) fn toggle_like(&mut self, user_name: &str) -> bool {
        if self.liked_by.remove(user_name) {
            self.likes -= 1;
            false
        } else {
            self.liked_by.insert(user_name.to_string());
            self.likes += 1;
            true
        }
    }

    /// Drop `user_name`'s like if present. Used when an account goes away.
    pub(crate) fn forget_liker(&mut self, user_name: &str) {
        if self.liked_by.remove(user_name) {
            self.likes -= 1;
        }
    }
}

/// Check post text against the length and blankness rules.
/// Length wins when both apply.
pub fn validate_content(content: &str) -> Result<()> {
    let len = content.chars().count();
    if len > MAX_POST_LENGTH {
        return Err(StoreError::TooLong { len, max: MAX_POST_LENGTH });
    }
    if content.trim().is_empty() {
        return Err(StoreError::Empty);
    }
    Ok(())
}

/// Serialized shape of a post. Topics are recomputed from content on load.
#[derive(Deserialize)]
struct PostRecord {
    author: String,
    content: String,
    timestamp: Timestamp,
    #[serde(default)]
    likes: Option<u32>,
    #[serde(default)]
    liked_by: BTreeSet<String>,
}

impl TryFrom<PostRecord> for Post {
    type Error = StoreError;

    fn try_from(record: PostRecord) -> Result<Self> {
        if record.timestamp == 0 {
            return Err(StoreError::InvalidSnapshot(
                "post timestamp must be positive".into(),
            ));
        }
        let mut post = Post::new(record.author, record.content, record.timestamp)?;
        let count = record.liked_by.len() as u32;
        if record.likes.is_some_and(|likes| likes != count) {
            return Err(StoreError::InvalidSnapshot(format!(
                "post {} has {} likes but {} likers",
                record.timestamp,
                record.likes.unwrap_or_default(),
                count
            )));
        }
        post.likes = count;
        post.liked_by = record.liked_by;
        Ok(post)
    }
}

/// One user's posts, oldest first unless stated otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPosts {
    pub user_name: String,
    pub posts: Vec<Post>,
}
