//! Minimal mdast-shaped document tree.
//!
//! Nodes keep the fields the localizer reads and writes as typed members and carry every
//! other mdast property through `extra`, so a tree read from JSON serializes back with its
//! positions, titles and depths intact.

pub mod markdown;
mod visit;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LocalizeResult;

pub use markdown::parse_markdown;
pub use visit::{visit_mut, visit_types_mut};

/// Node type tags the localizer cares about.
pub mod kind {
    /// Document root.
    pub const ROOT: &str = "root";
    /// Image with a `url`.
    pub const IMAGE: &str = "image";
    /// Link with a `url` and children.
    pub const LINK: &str = "link";
    /// Raw HTML block or inline fragment.
    pub const HTML: &str = "html";
    /// Raw JSX fragment from MDX documents.
    pub const JSX: &str = "jsx";
    /// Fenced or indented code block.
    pub const CODE: &str = "code";
    /// Plain text.
    pub const TEXT: &str = "text";
}

/// One node in a document tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// mdast `type` tag.
    #[serde(rename = "type")]
    pub kind: String,
    /// Target of links and images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Literal content of text, code and raw markup nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Language tag of code blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Ordered child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    /// Remaining mdast properties, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    /// Create an empty node of the given type.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Create a root holding `children`.
    pub fn root(children: Vec<Node>) -> Self {
        Self {
            children,
            ..Self::new(kind::ROOT)
        }
    }

    /// Create a literal node such as `text` or `html`.
    pub fn literal(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(kind)
        }
    }

    /// Create a link with the given children.
    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            url: Some(url.into()),
            children,
            ..Self::new(kind::LINK)
        }
    }

    /// Create an image with alternative text.
    pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Self {
        let mut node = Self {
            url: Some(url.into()),
            ..Self::new(kind::IMAGE)
        };
        node.extra.insert("alt".into(), Value::String(alt.into()));
        node
    }

    /// Create a code block with an optional language tag.
    pub fn code(lang: Option<&str>, value: impl Into<String>) -> Self {
        Self {
            lang: lang.map(str::to_string),
            ..Self::literal(kind::CODE, value)
        }
    }

    /// Returns `true` when the node's type tag equals `kind`.
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Parse a tree from mdast JSON.
    pub fn from_json(json: &str) -> LocalizeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_unknown_properties() {
        let json = r#"{"type":"root","children":[{"type":"heading","children":[{"type":"text","value":"Hi"}],"depth":2}]}"#;
        let tree = Node::from_json(json).unwrap();
        assert_eq!(tree.children[0].extra.get("depth"), Some(&Value::from(2)));
        assert_eq!(serde_json::to_string(&tree).unwrap(), json);
    }

    #[test]
    fn rejects_non_string_urls() {
        let json = r#"{"type":"link","url":42,"children":[]}"#;
        assert!(Node::from_json(json).is_err());
    }
}
