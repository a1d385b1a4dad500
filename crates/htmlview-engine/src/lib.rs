pub mod markup;
pub mod render;
pub mod style;

// Re-export key types for easier usage
pub use markup::{
    Lineage, MarkupParser, NodeKey, NodeKind, ParseCallback, ParseError, ParseResult, Tag,
    TaggedNode, TlMarkupParser, classify,
};
pub use render::{
    BULLET, CodeBlock, CodeLine, Container, CustomRender, CustomRenderer, Image, Link,
    LinkHandler, PositionClass, RenderOptions, RenderRoot, RenderState, Rendered, Scroll, Slot,
    TextPiece, TextRun, Transformer, TriggerOutcome, VisualNode, format_code, outline,
    render_markup,
};
pub use style::{PropertyBag, StyleRef, StyleSheet, StyleValue};
