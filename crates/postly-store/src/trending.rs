use std::collections::HashMap;

use crate::error::{Result, StoreError};
use crate::models::{Post, Timestamp};
use crate::FeedStore;

impl FeedStore {
    /// Topics of posts with timestamps in `[from, to]`, most frequent first.
    pub fn trending_topics(&self, from: i64, to: i64) -> Result<Vec<String>> {
        let (from_ts, to_ts) = window(from, to)?;
        self.with_state(|state| Ok(rank_topics(state.posts().map(|(_, p)| p), from_ts, to_ts)))
    }
}

fn window(from: i64, to: i64) -> Result<(Timestamp, Timestamp)> {
    if from < 0 || to < 0 || from > to {
        return Err(StoreError::InvalidRange { from, to });
    }
    Ok((from as Timestamp, to as Timestamp))
}

/// Count every topic occurrence in the window and rank by count.
/// Equal counts keep the order in which the topics were first counted.
fn rank_topics<'a>(
    posts: impl Iterator<Item = &'a Post>,
    from: Timestamp,
    to: Timestamp,
) -> Vec<String> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut histogram: Vec<(&str, usize)> = Vec::new();

    for post in posts.filter(|p| (from..=to).contains(&p.timestamp())) {
        for topic in post.topics() {
            match index.get(topic.as_str()) {
                Some(&i) => histogram[i].1 += 1,
                None => {
                    index.insert(topic.as_str(), histogram.len());
                    histogram.push((topic.as_str(), 1));
                }
            }
        }
    }

    // sort_by is stable
    histogram.sort_by(|a, b| b.1.cmp(&a.1));
    histogram.into_iter().map(|(topic, _)| topic.to_string()).collect()
}
