//! The `copyfiles` manifest block: extra files to copy with no visible reference.

use crate::mdast::{Node, kind};

/// Index of the first top-level code block tagged with `lang`.
pub(crate) fn find_manifest(children: &[Node], lang: &str) -> Option<usize> {
    children
        .iter()
        .position(|node| node.is(kind::CODE) && node.lang.as_deref() == Some(lang))
}

/// Trimmed, non-empty lines of a manifest body.
pub(crate) fn manifest_entries(body: &str) -> Vec<&str> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Remove the child at `index` by rebuilding the sequence around it.
pub(crate) fn remove_child(children: &mut Vec<Node>, index: usize) -> Node {
    let mut after = children.split_off(index);
    let removed = after.remove(0);
    children.append(&mut after);
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_only_top_level_manifest() {
        let children = vec![
            Node {
                children: vec![Node::code(Some("copyfiles"), "nested.zip")],
                ..Node::new("blockquote")
            },
            Node::code(Some("rust"), "fn main() {}"),
            Node::code(Some("copyfiles"), "a.zip"),
            Node::code(Some("copyfiles"), "b.zip"),
        ];
        assert_eq!(find_manifest(&children, "copyfiles"), Some(2));
        assert_eq!(find_manifest(&children, "files"), None);
    }

    #[test]
    fn splits_and_trims_lines() {
        assert_eq!(
            manifest_entries("  a.zip \n\n\tdocs/b.pdf\r\n   \n"),
            vec!["a.zip", "docs/b.pdf"]
        );
    }

    #[test]
    fn removal_preserves_sibling_order() {
        let mut children = vec![
            Node::literal(kind::TEXT, "one"),
            Node::code(Some("copyfiles"), "a.zip"),
            Node::literal(kind::TEXT, "two"),
            Node::literal(kind::TEXT, "three"),
        ];
        let removed = remove_child(&mut children, 1);
        assert!(removed.is(kind::CODE));
        let values: Vec<_> = children.iter().filter_map(|n| n.value.as_deref()).collect();
        assert_eq!(values, vec!["one", "two", "three"]);
    }
}
