use serde::{Serialize, Serializer};

use crate::markup::NodeKey;
use crate::style::StyleRef;

use super::code_block::CodeLine;

/// One element of an output sibling sequence.
///
/// `Empty` is an intentional "render nothing" placeholder: it keeps its
/// position among its siblings but contributes no visual output.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Empty,
    Node(VisualNode),
}

impl Slot {
    pub fn as_node(&self) -> Option<&VisualNode> {
        match self {
            Slot::Empty => None,
            Slot::Node(node) => Some(node),
        }
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Slot::Empty => serializer.serialize_none(),
            Slot::Node(node) => node.serialize(serializer),
        }
    }
}

/// Result of transforming a single node.
///
/// `Skip` means "not applicable" and is dropped from the sibling sequence;
/// `Empty` is preserved as [`Slot::Empty`].
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Skip,
    Empty,
    Node(VisualNode),
}

impl Rendered {
    pub fn into_slot(self) -> Option<Slot> {
        match self {
            Rendered::Skip => None,
            Rendered::Empty => Some(Slot::Empty),
            Rendered::Node(node) => Some(Slot::Node(node)),
        }
    }
}

impl From<VisualNode> for Rendered {
    fn from(node: VisualNode) -> Self {
        Rendered::Node(node)
    }
}

/// A typed visual primitive for the host UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisualNode {
    Text(TextRun),
    Container(Container),
    Link(Link),
    Image(Image),
    CodeBlock(CodeBlock),
}

/// Styled text. Text leaves hold a single literal; inline wrappers nest the
/// visual nodes of their children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub key: Option<NodeKey>,
    pub styles: Vec<StyleRef>,
    pub content: Vec<TextPiece>,
}

impl TextRun {
    /// The literal of a text leaf.
    pub fn literal(&self) -> Option<&str> {
        match self.content.as_slice() {
            [TextPiece::Literal(text)] => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TextPiece {
    Literal(String),
    Slot(Slot),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scroll {
    #[default]
    None,
    Horizontal,
}

/// A block wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    pub key: Option<NodeKey>,
    pub style: Option<StyleRef>,
    pub scroll: Scroll,
    pub children: Vec<Slot>,
}

/// Pressable inline wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub key: NodeKey,
    pub href: Option<String>,
    pub styles: Vec<StyleRef>,
    pub children: Vec<Slot>,
}

impl Link {
    /// Forwards the href, unmodified, to `handler`. Returns false when the
    /// link has no href to forward.
    pub fn press(&self, handler: &dyn Fn(&str)) -> bool {
        match &self.href {
            Some(href) => {
                handler(href);
                true
            }
            None => {
                log::warn!("Pressed link {} has no href", self.key);
                false
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub src: Option<String>,
    pub style: Option<StyleRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeBlock {
    pub style: Option<StyleRef>,
    pub lines: Vec<CodeLine>,
}

/// Depth-first search for the link with `key`.
pub fn find_link<'a>(slots: &'a [Slot], key: &NodeKey) -> Option<&'a Link> {
    slots
        .iter()
        .filter_map(Slot::as_node)
        .find_map(|node| find_link_in(node, key))
}

fn find_link_in<'a>(node: &'a VisualNode, key: &NodeKey) -> Option<&'a Link> {
    match node {
        VisualNode::Link(link) if &link.key == key => Some(link),
        VisualNode::Link(link) => find_link(&link.children, key),
        VisualNode::Container(container) => find_link(&container.children, key),
        VisualNode::Text(run) => run.content.iter().find_map(|piece| match piece {
            TextPiece::Slot(Slot::Node(node)) => find_link_in(node, key),
            _ => None,
        }),
        VisualNode::Image(_) | VisualNode::CodeBlock(_) => None,
    }
}
