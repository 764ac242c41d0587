//! Asset references inside raw HTML and JSX fragments.

/// Tag/attribute pairs holding asset references, in order of precedence.
const ASSET_ATTRIBUTES: &[(&[&str], &str)] = &[
    (&["img", "video", "audio", "source"], "src"),
    (&["video"], "poster"),
    (&["a"], "href"),
];

/// Start tag emitted by the tokenizer, with lowercased names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OpenTag {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl OpenTag {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of the first attribute rule matching this tag.
    pub fn asset_reference(&self) -> Option<&str> {
        ASSET_ATTRIBUTES.iter().find_map(|(tags, attribute)| {
            if tags.iter().any(|tag| *tag == self.name) {
                self.attribute(attribute)
            } else {
                None
            }
        })
    }
}

/// Tokenize `markup` and return its start tags in document order.
///
/// Fragments `tl` refuses to parse yield no tags.
pub(crate) fn open_tags(markup: &str) -> Vec<OpenTag> {
    let dom = match tl::parse(markup, tl::ParserOptions::default()) {
        Ok(dom) => dom,
        Err(err) => {
            tracing::debug!(error = ?err, "skipping unparseable markup");
            return Vec::new();
        }
    };

    let parser = dom.parser();
    let mut tags = Vec::new();
    for handle in dom.children() {
        collect_open_tags(*handle, parser, &mut tags);
    }
    tags
}

fn collect_open_tags(handle: tl::NodeHandle, parser: &tl::Parser, tags: &mut Vec<OpenTag>) {
    let Some(tl::Node::Tag(tag)) = handle.get(parser) else {
        return;
    };

    let attributes = tag
        .attributes()
        .iter()
        .map(|(key, value)| {
            let key: &str = key.as_ref();
            (key.to_lowercase(), value.map(|v| v.to_string()).unwrap_or_default())
        })
        .collect();
    tags.push(OpenTag {
        name: tag.name().as_utf8_str().to_lowercase(),
        attributes,
    });

    for child in tag.children().top().iter() {
        collect_open_tags(*child, parser, tags);
    }
}
