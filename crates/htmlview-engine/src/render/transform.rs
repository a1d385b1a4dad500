use crate::markup::{Lineage, NodeKey, NodeKind, Tag, TaggedNode};

use super::code_block::format_code;
use super::options::{CustomRender, RenderOptions};
use super::visual::{
    CodeBlock, Container, Image, Link, Rendered, Scroll, Slot, TextPiece, TextRun, VisualNode,
};

/// Prefix of every list item's text line.
pub const BULLET: &str = "  \u{2022}  ";
/// Appended after the children of a `br`.
pub const LINE_BREAK: &str = "\n";

const CARRIAGE_RETURN: &str = "\r";

/// A node together with the position data derived for it in this pass.
struct Visit<'n> {
    node: &'n TaggedNode,
    key: NodeKey,
    lineage: Lineage,
}

impl<'n> Visit<'n> {
    fn new(node: &'n TaggedNode, index: usize, parent: Option<&Visit<'_>>) -> Self {
        Self {
            node,
            key: NodeKey::new(parent.map(|p| &p.key), index),
            lineage: Lineage::new(parent.map(|p| &p.lineage), &node.name),
        }
    }
}

/// Maps a tagged node tree onto visual nodes.
///
/// Pure with respect to its inputs: the same tree and options always yield
/// the same output. The only side channels are the custom renderer and the
/// optional debug logging.
pub struct Transformer<'o> {
    options: &'o RenderOptions,
}

impl<'o> Transformer<'o> {
    pub fn new(options: &'o RenderOptions) -> Self {
        Self { options }
    }

    /// Transforms the top-level nodes of a document, which sit in block context.
    pub fn transform_document(&self, nodes: &[TaggedNode]) -> Vec<Slot> {
        self.transform_siblings(nodes, None, NodeKind::Block)
    }

    fn transform_siblings(
        &self,
        nodes: &[TaggedNode],
        parent: Option<&Visit<'_>>,
        context: NodeKind,
    ) -> Vec<Slot> {
        nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let visit = Visit::new(node, index, parent);
                self.transform_node(&visit, parent, context).into_slot()
            })
            .collect()
    }

    fn transform_node(
        &self,
        visit: &Visit<'_>,
        parent: Option<&Visit<'_>>,
        context: NodeKind,
    ) -> Rendered {
        let node = visit.node;

        if self.options.debug_tree {
            log::info!(
                "T: {} | A: {:?} | C: {}",
                visit.lineage,
                node.attributes,
                node.children.len()
            );
        }

        if let Some(custom) = &self.options.custom_renderer {
            match custom(node, &visit.key, parent.map(|p| p.node), context) {
                CustomRender::NoOpinion => {}
                CustomRender::Empty => return Rendered::Empty,
                CustomRender::Node(visual) => return Rendered::Node(visual),
            }
        }

        let tag = node.tag();

        if node.kind == NodeKind::Block
            && tag == Tag::Div
            && node.children.is_empty()
            && !node.has_text()
        {
            return Rendered::Skip;
        }

        match (node.kind, context) {
            (NodeKind::Inline, NodeKind::Inline) => self.inline_node(visit, parent, &tag),
            (NodeKind::Block, NodeKind::Block) => self.block_node(visit, &tag),
            // Each pass only descends into nodes of its own kind
            (NodeKind::Inline, NodeKind::Block) | (NodeKind::Block, NodeKind::Inline) => {
                Rendered::Skip
            }
        }
    }

    fn inline_node(&self, visit: &Visit<'_>, parent: Option<&Visit<'_>>, tag: &Tag) -> Rendered {
        let node = visit.node;
        match tag {
            Tag::Text => {
                let text = node.text.as_deref().unwrap_or_default();
                if text.is_empty() || text == CARRIAGE_RETURN {
                    return Rendered::Skip;
                }
                let parent_name = parent.map_or("", |p| p.node.name.as_str());
                VisualNode::Text(TextRun {
                    key: Some(visit.key.clone()),
                    styles: self.options.styles(&["text", parent_name]),
                    content: vec![TextPiece::Literal(text.to_string())],
                })
                .into()
            }
            Tag::A => {
                let href = node.attribute("href").map(str::to_string);
                if href.is_none() {
                    log::warn!("Link {} ({}) has no href", visit.key, visit.lineage);
                }
                VisualNode::Link(Link {
                    key: visit.key.clone(),
                    href,
                    styles: self.options.styles(&["text", node.name.as_str()]),
                    children: self.transform_siblings(&node.children, Some(visit), NodeKind::Inline),
                })
                .into()
            }
            _ => {
                let mut content: Vec<TextPiece> = self
                    .transform_siblings(&node.children, Some(visit), NodeKind::Inline)
                    .into_iter()
                    .map(TextPiece::Slot)
                    .collect();
                if *tag == Tag::Br {
                    content.push(TextPiece::Literal(LINE_BREAK.to_string()));
                }
                // Nothing left after skipped children, e.g. `<em>\r</em>`
                if content.is_empty() {
                    return Rendered::Skip;
                }
                VisualNode::Text(TextRun {
                    key: Some(visit.key.clone()),
                    styles: self.options.styles(&["text", node.name.as_str()]),
                    content,
                })
                .into()
            }
        }
    }

    fn block_node(&self, visit: &Visit<'_>, tag: &Tag) -> Rendered {
        match tag {
            Tag::Img => self.image(visit),
            Tag::Code => self.code(visit),
            _ => self.block_container(visit, tag),
        }
    }

    fn image(&self, visit: &Visit<'_>) -> Rendered {
        let src = visit.node.attribute("src").map(str::to_string);
        if src.is_none() {
            log::warn!("Image {} ({}) has no src", visit.key, visit.lineage);
        }
        VisualNode::Container(Container {
            key: Some(visit.key.clone()),
            style: self.options.style("imgWrapper"),
            scroll: Scroll::None,
            children: vec![Slot::Node(VisualNode::Image(Image {
                src,
                style: self.options.style("img"),
            }))],
        })
        .into()
    }

    fn code(&self, visit: &Visit<'_>) -> Rendered {
        let mut lines = format_code(&visit.node.flattened_text());
        for line in &mut lines {
            line.styles.retain(|class| self.options.style_sheet.contains(class));
        }
        VisualNode::Container(Container {
            key: Some(visit.key.clone()),
            style: self.options.style("codeScrollView"),
            scroll: Scroll::Horizontal,
            children: vec![Slot::Node(VisualNode::CodeBlock(CodeBlock {
                style: self.options.style("codeWrapper"),
                lines,
            }))],
        })
        .into()
    }

    fn block_container(&self, visit: &Visit<'_>, tag: &Tag) -> Rendered {
        let node = visit.node;
        let children_inline = self.transform_siblings(&node.children, Some(visit), NodeKind::Inline);
        let children_block = self.transform_siblings(&node.children, Some(visit), NodeKind::Block);

        let mut children = Vec::with_capacity(children_block.len() + 2);

        if self.options.debug_inline_counts {
            children.push(Slot::Node(self.debug_overlay(
                visit,
                children_inline.len(),
                children_block.len(),
            )));
        }

        // List items keep their bullet line even when they hold nested blocks
        let is_list_item = *tag == Tag::Li;
        if is_list_item || (children_block.is_empty() && !children_inline.is_empty()) {
            let mut content = Vec::with_capacity(children_inline.len() + 1);
            if is_list_item {
                content.push(TextPiece::Literal(BULLET.to_string()));
            }
            content.extend(children_inline.into_iter().map(TextPiece::Slot));
            children.push(Slot::Node(VisualNode::Text(TextRun {
                key: None,
                styles: self.options.styles(&["text"]),
                content,
            })));
        }

        children.extend(children_block);

        VisualNode::Container(Container {
            key: Some(visit.key.clone()),
            style: self.options.style(&format!("{}Wrapper", node.name)),
            scroll: Scroll::None,
            children,
        })
        .into()
    }

    fn debug_overlay(&self, visit: &Visit<'_>, inline: usize, block: usize) -> VisualNode {
        let class = visit
            .node
            .attribute("class")
            .map(|class| format!(" ({class})"))
            .unwrap_or_default();
        VisualNode::Text(TextRun {
            key: None,
            styles: self.options.styles(&["debugOverlay", "text"]),
            content: vec![TextPiece::Literal(format!(
                "{} {}{} {}:{}",
                visit.key, visit.lineage, class, inline, block
            ))],
        })
    }
}
