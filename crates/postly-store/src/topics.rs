use std::sync::LazyLock;

use regex::Regex;

static TOPIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("topic pattern is valid"));

/// Extract every `#word` tag from `text`, in order of appearance.
/// Repeats are kept: `"#x #x"` yields two topics.
pub fn extract_topics(text: &str) -> Vec<String> {
    TOPIC_PATTERN
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}
