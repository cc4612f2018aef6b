use regex::Regex;
use std::sync::LazyLock;

/// `#` followed by letters (accented included), digits or underscores
static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([\p{L}\p{N}_]+)").expect("Invalid hashtag regex"));

/// Lowercased hashtags of a post body in order of first use, without `#`.
///
/// ```
/// use social_feed_service::services::extract_hashtags;
///
/// assert_eq!(
///     extract_hashtags("New PR! #Deadlift #gym #deadlift"),
///     vec!["deadlift", "gym"]
/// );
/// ```
pub fn extract_hashtags(content: &str) -> Vec<String> {
    HASHTAG
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_lowercase())
        .fold(Vec::new(), |mut tags, tag| {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
            tags
        })
}
