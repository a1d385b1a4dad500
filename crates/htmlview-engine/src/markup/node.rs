use std::collections::BTreeMap;

use serde::Serialize;

use super::classify::{NodeKind, Tag};

/// Name given to text leaves.
pub const TEXT_NODE_NAME: &str = "text";

/// A node of the parsed markup tree, classified as block or inline.
///
/// Element nodes carry `children`; text leaves carry `text` and are named
/// [`TEXT_NODE_NAME`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedNode {
    pub name: String,
    pub kind: NodeKind,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<TaggedNode>,
    pub text: Option<String>,
}

impl TaggedNode {
    /// An element node, classified from its (lower-cased) name.
    pub fn element(name: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        let kind = Tag::parse(&name).kind();
        Self {
            name,
            kind,
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// A text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            name: TEXT_NODE_NAME.to_string(),
            kind: NodeKind::Inline,
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: Some(text.into()),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: TaggedNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = TaggedNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn tag(&self) -> Tag {
        Tag::parse(&self.name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// True when the node carries a non-empty text payload.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Text of this node and all its descendants, in document order.
    pub fn flattened_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}
