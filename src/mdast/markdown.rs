//! Markdown front end building an mdast-shaped tree from pulldown-cmark events.

use pulldown_cmark::{CodeBlockKind, Event, MetadataBlockKind, Options, Parser, Tag};
use serde_json::Value;

use super::{Node, kind};

/// Parse markdown into a document tree.
///
/// The mapping covers the node types remark produces for CommonMark plus tables,
/// strikethrough, task lists and front matter. Raw HTML, both block and inline, becomes
/// `html` nodes whose value is the untouched source.
pub fn parse_markdown(markdown: &str) -> Node {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

    let mut builder = TreeBuilder::default();
    for event in Parser::new_ext(markdown, options) {
        builder.push_event(event);
    }
    builder.finish()
}

#[derive(Default)]
struct TreeBuilder {
    // `finished` collects the root's children.
    stack: Vec<Node>,
    finished: Vec<Node>,
}

impl TreeBuilder {
    fn push_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.stack.push(node_for_tag(tag)),
            Event::End(_) => self.close(),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.append(Node::literal("inlineCode", code.to_string())),
            Event::Html(html) => self.text(&html),
            Event::InlineHtml(html) => self.append(Node::literal(kind::HTML, html.to_string())),
            Event::SoftBreak => self.text("\n"),
            Event::HardBreak => self.append(Node::new("break")),
            Event::Rule => self.append(Node::new("thematicBreak")),
            Event::TaskListMarker(checked) => {
                if let Some(item) = self.stack.iter_mut().rev().find(|node| node.is("listItem")) {
                    item.extra.insert("checked".into(), Value::Bool(checked));
                }
            }
            Event::FootnoteReference(label) => {
                let mut node = Node::new("footnoteReference");
                node.extra.insert("identifier".into(), Value::String(label.to_string()));
                self.append(node);
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(open) = self.stack.last_mut() {
            if let Some(value) = open.value.as_mut() {
                value.push_str(text);
                return;
            }
        }

        let siblings = self.siblings();
        match siblings.last_mut() {
            Some(last) if last.is(kind::TEXT) => {
                if let Some(value) = last.value.as_mut() {
                    value.push_str(text);
                }
            }
            _ => siblings.push(Node::literal(kind::TEXT, text)),
        }
    }

    fn append(&mut self, node: Node) {
        self.siblings().push(node);
    }

    fn siblings(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(open) => &mut open.children,
            None => &mut self.finished,
        }
    }

    fn close(&mut self) {
        let Some(mut node) = self.stack.pop() else {
            return;
        };

        if node.is(kind::IMAGE) {
            let mut alt = String::new();
            for child in node.children.drain(..) {
                push_plain_text(&child, &mut alt);
            }
            node.extra.insert("alt".into(), Value::String(alt));
        }

        if let Some(value) = node.value.as_mut() {
            if value.ends_with('\n') {
                value.pop();
            }
        }

        self.append(node);
    }

    fn finish(mut self) -> Node {
        while !self.stack.is_empty() {
            self.close();
        }
        Node::root(self.finished)
    }
}

fn node_for_tag(tag: Tag<'_>) -> Node {
    match tag {
        Tag::Paragraph => Node::new("paragraph"),
        Tag::Heading { level, .. } => {
            let mut node = Node::new("heading");
            node.extra.insert("depth".into(), Value::from(level as u8));
            node
        }
        Tag::BlockQuote(_) => Node::new("blockquote"),
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => {
            let mut parts = info.splitn(2, char::is_whitespace);
            let lang = parts.next().filter(|lang| !lang.is_empty());
            let mut node = Node::code(lang, "");
            if let Some(meta) = parts.next().map(str::trim).filter(|meta| !meta.is_empty()) {
                node.extra.insert("meta".into(), Value::String(meta.to_string()));
            }
            node
        }
        Tag::CodeBlock(CodeBlockKind::Indented) => Node::code(None, ""),
        Tag::HtmlBlock => Node::literal(kind::HTML, ""),
        Tag::MetadataBlock(MetadataBlockKind::YamlStyle) => Node::literal("yaml", ""),
        Tag::MetadataBlock(MetadataBlockKind::PlusesStyle) => Node::literal("toml", ""),
        Tag::List(start) => {
            let mut node = Node::new("list");
            node.extra.insert("ordered".into(), Value::Bool(start.is_some()));
            if let Some(start) = start {
                node.extra.insert("start".into(), Value::from(start));
            }
            node
        }
        Tag::Item => Node::new("listItem"),
        Tag::FootnoteDefinition(label) => {
            let mut node = Node::new("footnoteDefinition");
            node.extra.insert("identifier".into(), Value::String(label.to_string()));
            node
        }
        Tag::Table(_) => Node::new("table"),
        Tag::TableHead | Tag::TableRow => Node::new("tableRow"),
        Tag::TableCell => Node::new("tableCell"),
        Tag::Emphasis => Node::new("emphasis"),
        Tag::Strong => Node::new("strong"),
        Tag::Strikethrough => Node::new("delete"),
        Tag::Link { dest_url, title, .. } => with_title(Node::link(dest_url.to_string(), Vec::new()), &title),
        Tag::Image { dest_url, title, .. } => with_title(
            Node {
                url: Some(dest_url.to_string()),
                ..Node::new(kind::IMAGE)
            },
            &title,
        ),
        _ => Node::new("generic"),
    }
}

fn push_plain_text(node: &Node, out: &mut String) {
    if let Some(value) = &node.value {
        out.push_str(value);
    }
    for child in &node.children {
        push_plain_text(child, out);
    }
}

fn with_title(mut node: Node, title: &str) -> Node {
    if !title.is_empty() {
        node.extra.insert("title".into(), Value::String(title.to_string()));
    }
    node
}
