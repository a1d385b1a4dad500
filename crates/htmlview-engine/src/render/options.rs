use std::fmt;
use std::rc::Rc;

use crate::markup::{NodeKey, NodeKind, TaggedNode};
use crate::style::{StyleRef, StyleSheet};

use super::visual::{Link, VisualNode};

/// Receives the href of a pressed link.
pub type LinkHandler = Rc<dyn Fn(&str)>;

/// Per-node override hook, consulted before any built-in rule.
///
/// Arguments are the node, its position key, its parent (if any) and the
/// ambient render context.
pub type CustomRenderer =
    Rc<dyn Fn(&TaggedNode, &NodeKey, Option<&TaggedNode>, NodeKind) -> CustomRender>;

/// Answer of a [`CustomRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum CustomRender {
    /// Fall through to the built-in rules.
    NoOpinion,
    /// Render nothing, but keep the node's position.
    Empty,
    /// Use this node verbatim.
    Node(VisualNode),
}

/// Everything a render pass needs besides the tree itself. Built once per
/// render root and threaded through every recursive call.
#[derive(Clone)]
pub struct RenderOptions {
    pub link_handler: LinkHandler,
    pub style_sheet: StyleSheet,
    pub custom_renderer: Option<CustomRenderer>,
    /// Log every visited node.
    pub debug_tree: bool,
    /// Prepend a diagnostic line to every block container.
    pub debug_inline_counts: bool,
}

impl RenderOptions {
    pub fn new(link_handler: impl Fn(&str) + 'static) -> Self {
        Self {
            link_handler: Rc::new(link_handler),
            style_sheet: StyleSheet::base(),
            custom_renderer: None,
            debug_tree: false,
            debug_inline_counts: false,
        }
    }

    pub fn with_style_sheet(mut self, style_sheet: StyleSheet) -> Self {
        self.style_sheet = style_sheet;
        self
    }

    pub fn with_custom_renderer(
        mut self,
        renderer: impl Fn(&TaggedNode, &NodeKey, Option<&TaggedNode>, NodeKind) -> CustomRender
        + 'static,
    ) -> Self {
        self.custom_renderer = Some(Rc::new(renderer));
        self
    }

    pub fn with_debug_tree(mut self, enabled: bool) -> Self {
        self.debug_tree = enabled;
        self
    }

    pub fn with_debug_inline_counts(mut self, enabled: bool) -> Self {
        self.debug_inline_counts = enabled;
        self
    }

    /// Activates `link` with the configured handler.
    pub fn press(&self, link: &Link) -> bool {
        link.press(&*self.link_handler)
    }

    /// `class` if the style sheet defines it.
    pub(crate) fn style(&self, class: &str) -> Option<StyleRef> {
        self.style_sheet
            .contains(class)
            .then(|| class.to_string())
    }

    /// The defined subset of `classes`, in order.
    pub(crate) fn styles(&self, classes: &[&str]) -> Vec<StyleRef> {
        classes
            .iter()
            .filter_map(|class| self.style(class))
            .collect()
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(|href| log::info!("No link handler configured, ignoring {href}"))
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("style_sheet", &self.style_sheet)
            .field("custom_renderer", &self.custom_renderer.is_some())
            .field("debug_tree", &self.debug_tree)
            .field("debug_inline_counts", &self.debug_inline_counts)
            .finish_non_exhaustive()
    }
}
