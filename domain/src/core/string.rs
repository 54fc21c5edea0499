//! String utilities for the domain layer.

/// Normalize a channel name: trimmed, lower-cased, whitespace runs become `-`.
///
/// `"Release Notes"` becomes `"release-notes"`.
pub fn slugify_channel_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Dicebear avatar URL for a style and seed (seed is percent-encoded).
pub fn dicebear_url(style: &str, seed: &str) -> String {
    format!(
        "https://api.dicebear.com/8.x/{}/svg?seed={}",
        style,
        urlencoding::encode(seed)
    )
}
