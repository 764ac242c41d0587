use path_clean::clean;

/// Join path segments with `/` and normalise the result.
///
/// Empty segments are dropped, `.` and `..` are collapsed, and repeated separators are
/// folded. Unlike [`std::path::Path::join`], a segment starting with `/` does not discard
/// the segments before it, so `join_segments(&["docs", "/a.png"])` yields `docs/a.png`.
/// The result always uses forward slashes.
pub fn join_segments(segments: &[&str]) -> String {
    let joined = segments
        .iter()
        .filter(|segment| !segment.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        return ".".to_string();
    }

    clean(&joined).to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::join_segments;

    #[test]
    fn joins_directory_and_file() {
        assert_eq!(join_segments(&["/site/content/blog", "cover.png"]), "/site/content/blog/cover.png");
    }

    #[test]
    fn resolves_parent_segments() {
        assert_eq!(join_segments(&["/site/content/blog", "../shared/a.zip"]), "/site/content/shared/a.zip");
        assert_eq!(join_segments(&["docs", "./img/./b.png"]), "docs/img/b.png");
    }

    #[test]
    fn keeps_base_for_rooted_references() {
        assert_eq!(join_segments(&["/", "sample.zip"]), "/sample.zip");
        assert_eq!(join_segments(&["docs", "/sample.zip"]), "docs/sample.zip");
    }

    #[test]
    fn skips_empty_segments() {
        assert_eq!(join_segments(&["", "sample.zip"]), "sample.zip");
        assert_eq!(join_segments(&["", ""]), ".");
    }

    #[test]
    fn preserves_relative_prefixes() {
        assert_eq!(join_segments(&["page/blog/2019/04/10/", "sample.zip"]), "page/blog/2019/04/10/sample.zip");
        assert_eq!(join_segments(&[".", "sample-a1b2c3.jpg"]), "sample-a1b2c3.jpg");
    }
}
