use std::borrow::Cow;

use html_escape::decode_html_entities;

use super::classify::NodeKind;
use super::node::TaggedNode;
use super::parser::{MarkupParser, ParseCallback, ParseError, ParseResult};

/// [`MarkupParser`] backed by the `tl` HTML parser. Completes synchronously.
#[derive(Debug, Clone, Default)]
pub struct TlMarkupParser {
    keep_whitespace: bool,
}

impl TlMarkupParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep every whitespace-only text node. By default one is dropped when it
    /// sits in block context between block siblings (or at either end), so
    /// indentation between block tags does not become text runs. Whitespace
    /// next to an inline sibling is always kept.
    pub fn with_keep_whitespace(mut self, keep_whitespace: bool) -> Self {
        self.keep_whitespace = keep_whitespace;
        self
    }

    /// Parses `markup` immediately.
    pub fn parse_now(&self, markup: &str) -> ParseResult {
        let dom = tl::parse(markup, tl::ParserOptions::default()).map_err(|e| {
            ParseError::Malformed {
                reason: format!("{e:?}"),
            }
        })?;
        let parser = dom.parser();
        Ok(self.convert_all(dom.children().iter(), parser, NodeKind::Block))
    }

    fn convert_all<'h>(
        &self,
        handles: impl Iterator<Item = &'h tl::NodeHandle>,
        parser: &tl::Parser,
        parent_kind: NodeKind,
    ) -> Vec<TaggedNode> {
        let converted: Vec<(TaggedNode, bool)> = handles
            .filter_map(|handle| self.convert(*handle, parser))
            .collect();
        if self.keep_whitespace || parent_kind == NodeKind::Inline {
            return converted.into_iter().map(|(node, _)| node).collect();
        }

        let block_or_missing =
            |index: Option<usize>| match index.and_then(|i| converted.get(i)) {
                Some((node, _)) => node.kind == NodeKind::Block,
                None => true,
            };
        let keep: Vec<bool> = converted
            .iter()
            .enumerate()
            .map(|(index, (_, blank))| {
                let between_blocks =
                    block_or_missing(index.checked_sub(1)) && block_or_missing(Some(index + 1));
                !blank || !between_blocks
            })
            .collect();

        converted
            .into_iter()
            .zip(keep)
            .filter_map(|((node, _), keep)| keep.then_some(node))
            .collect()
    }

    /// The converted node, flagged when it is whitespace-only text.
    fn convert(
        &self,
        handle: tl::NodeHandle,
        parser: &tl::Parser,
    ) -> Option<(TaggedNode, bool)> {
        match handle.get(parser)? {
            tl::Node::Tag(tag) => {
                let mut node = TaggedNode::element(tag.name().as_utf8_str());

                let attributes = tag.attributes();
                for (name, value) in attributes.iter() {
                    node.attributes
                        .insert(name.to_ascii_lowercase(), decode_attribute(value));
                }
                // tl keeps id and class outside the raw attribute map
                for special in ["id", "class"] {
                    if let Some(Some(value)) = attributes.get(special) {
                        node.attributes
                            .entry(special.to_string())
                            .or_insert_with(|| decode_attribute(Some(value.as_utf8_str())));
                    }
                }

                let children = tag.children();
                node.children = self.convert_all(children.top().iter(), parser, node.kind);
                Some((node, false))
            }
            tl::Node::Raw(bytes) => {
                let raw = bytes.as_utf8_str();
                // Checked before decoding so `&nbsp;` never counts as blank
                let blank = raw.trim().is_empty();
                Some((TaggedNode::text(decode_html_entities(&raw)), blank))
            }
            tl::Node::Comment(_) => None,
        }
    }
}

fn decode_attribute(value: Option<Cow<'_, str>>) -> String {
    value
        .map(|v| decode_html_entities(&v).into_owned())
        .unwrap_or_default()
}

impl MarkupParser for TlMarkupParser {
    fn parse(&self, markup: &str, done: ParseCallback) {
        done(self.parse_now(markup));
    }
}
