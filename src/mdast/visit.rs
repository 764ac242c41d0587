use super::Node;

/// Visit `node` and its descendants in pre-order, calling `visitor` on each match.
///
/// Children are visited after the visitor has run on their parent, so a visitor that
/// edits a node's children sees the edited sequence.
pub fn visit_mut<P, F>(node: &mut Node, predicate: &P, visitor: &mut F)
where
    P: Fn(&Node) -> bool,
    F: FnMut(&mut Node),
{
    if predicate(node) {
        visitor(node);
    }
    for child in node.children.iter_mut() {
        visit_mut(child, predicate, visitor);
    }
}

/// Visit every node whose type tag is one of `kinds`.
pub fn visit_types_mut<F>(node: &mut Node, kinds: &[&str], visitor: &mut F)
where
    F: FnMut(&mut Node),
{
    visit_mut(node, &|node: &Node| kinds.iter().any(|kind| *kind == node.kind), visitor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mdast::kind;

    #[test]
    fn visits_matching_nodes_in_document_order() {
        let mut tree = Node::root(vec![
            Node {
                children: vec![Node::image("a.png", ""), Node::link("b.zip", vec![])],
                ..Node::new("paragraph")
            },
            Node::image("c.png", ""),
        ]);

        let mut seen = Vec::new();
        visit_types_mut(&mut tree, &[kind::IMAGE, kind::LINK], &mut |node| {
            seen.push(node.url.clone().unwrap_or_default());
        });

        assert_eq!(seen, vec!["a.png", "b.zip", "c.png"]);
    }

    #[test]
    fn mutations_stay_in_place() {
        let mut tree = Node::root(vec![Node::literal(kind::TEXT, "x"), Node::image("a.png", "alt")]);
        visit_types_mut(&mut tree, &[kind::IMAGE], &mut |node| {
            node.url = Some("/a.png".into());
        });

        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[1].url.as_deref(), Some("/a.png"));
        assert_eq!(tree.children[1].extra.get("alt").and_then(|v| v.as_str()), Some("alt"));
    }
}
