use std::fmt;

use serde::{Deserialize, Serialize};

/// Layout classification of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Occupies its own layout region (vertical stacking).
    Block,
    /// Flows within surrounding text.
    Inline,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Block => f.write_str("block"),
            NodeKind::Inline => f.write_str("inline"),
        }
    }
}

/// The supported tag vocabulary.
///
/// Names outside the vocabulary become [`Tag::Other`] and classify as inline,
/// so their content still flows as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    // Block
    Div,
    P,
    Heading(u8),
    Ul,
    Ol,
    Li,
    Blockquote,
    Img,
    Code,
    Pre,
    // Inline
    Text,
    A,
    Strong,
    B,
    Em,
    I,
    U,
    S,
    Br,
    Span,
    Sub,
    Sup,
    Other(String),
}

impl Tag {
    /// Looks up a tag name, ignoring ASCII case.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "div" => Tag::Div,
            "p" => Tag::P,
            "h1" => Tag::Heading(1),
            "h2" => Tag::Heading(2),
            "h3" => Tag::Heading(3),
            "h4" => Tag::Heading(4),
            "h5" => Tag::Heading(5),
            "h6" => Tag::Heading(6),
            "ul" => Tag::Ul,
            "ol" => Tag::Ol,
            "li" => Tag::Li,
            "blockquote" => Tag::Blockquote,
            "img" => Tag::Img,
            "code" => Tag::Code,
            "pre" => Tag::Pre,
            "text" => Tag::Text,
            "a" => Tag::A,
            "strong" => Tag::Strong,
            "b" => Tag::B,
            "em" => Tag::Em,
            "i" => Tag::I,
            "u" => Tag::U,
            "s" => Tag::S,
            "br" => Tag::Br,
            "span" => Tag::Span,
            "sub" => Tag::Sub,
            "sup" => Tag::Sup,
            other => Tag::Other(other.to_string()),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Tag::Div
            | Tag::P
            | Tag::Heading(_)
            | Tag::Ul
            | Tag::Ol
            | Tag::Li
            | Tag::Blockquote
            | Tag::Img
            | Tag::Code
            | Tag::Pre => NodeKind::Block,
            Tag::Text
            | Tag::A
            | Tag::Strong
            | Tag::B
            | Tag::Em
            | Tag::I
            | Tag::U
            | Tag::S
            | Tag::Br
            | Tag::Span
            | Tag::Sub
            | Tag::Sup
            | Tag::Other(_) => NodeKind::Inline,
        }
    }
}

/// Classifies a tag name as block or inline.
pub fn classify(name: &str) -> NodeKind {
    Tag::parse(name).kind()
}
