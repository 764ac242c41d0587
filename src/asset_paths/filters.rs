use std::sync::OnceLock;

use regex::Regex;

/// Suffixes skipped when no ignore list is configured.
pub const DEFAULT_IGNORED_EXTENSIONS: &[&str] = &[".md"];

fn absolute_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^(?:[a-z]+:)?//").expect("invalid absolute URL regex"))
}

/// Determine whether a reference points outside the document's filesystem.
///
/// Matches an optional scheme followed by `//`, so `https://host`, `HTTP://host` and the
/// protocol-relative `//host/file.png` are all absolute. `mailto:` and `data:` references
/// carry no `//` and are classified as relative.
pub fn is_absolute_url(url: &str) -> bool {
    absolute_url_pattern().is_match(url)
}

/// Returns `true` when `url` ends with at least one of `extensions`.
///
/// The comparison is an exact, case-sensitive suffix match.
pub fn is_ignored<S: AsRef<str>>(url: &str, extensions: &[S]) -> bool {
    extensions.iter().any(|ext| url.ends_with(ext.as_ref()))
}

/// Resolve the ignore list, substituting [`DEFAULT_IGNORED_EXTENSIONS`] for an empty one.
pub fn effective_ignore_extensions(configured: &[String]) -> Vec<String> {
    if configured.is_empty() {
        DEFAULT_IGNORED_EXTENSIONS
            .iter()
            .map(|ext| ext.to_string())
            .collect()
    } else {
        configured.to_vec()
    }
}
