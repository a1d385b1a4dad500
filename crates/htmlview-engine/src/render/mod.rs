/*!
 * # Rendering
 *
 * Turns a tagged node tree into the typed visual tree a host UI displays.
 *
 * ## Two passes per block
 *
 * Every block node's children are transformed twice: once in inline context
 * and once in block context. Each pass only keeps the nodes of its own kind,
 * so mixed content such as `<li>Two<ul>..</ul></li>` splits cleanly into a
 * single text line followed by the nested block containers.
 *
 * - Inline children are collapsed into one [`TextRun`] (list items get a
 *   bullet prefix) which comes before the block children.
 * - Text leaves pick up the style of their parent tag.
 * - `img` and `code` have dedicated wrappers; `code` goes through the
 *   [`format_code`] line formatter.
 *
 * ## Skip versus empty
 *
 * A transformed node is [`Rendered::Skip`] when a built-in rule decides it
 * does not apply (empty `div`, empty text, wrong context) and is dropped from
 * its sibling sequence. A custom renderer can instead answer
 * [`CustomRender::Empty`], which keeps a [`Slot::Empty`] placeholder in place.
 *
 * ## Modules
 *
 * - **`visual`**: output node types
 * - **`code_block`**: line splitting and row position classes for code
 * - **`options`**: `RenderOptions`, link and custom-render hooks
 * - **`transform`**: the recursive `Transformer`
 * - **`root`**: `RenderRoot`, the idle/rendering/rendered pipeline owner
 * - **`outline`**: plain-text dump of a visual tree
 */

pub mod code_block;
pub mod options;
pub mod outline;
pub mod root;
pub mod transform;
pub mod visual;

pub use code_block::{BLANK_LINE, CodeLine, PositionClass, format_code};
pub use options::{CustomRender, CustomRenderer, LinkHandler, RenderOptions};
pub use outline::{outline, outline_container};
pub use root::{
    ErrorHandler, RedisplayHandler, RenderRoot, RenderState, TriggerOutcome, render_markup,
};
pub use transform::{BULLET, LINE_BREAK, Transformer};
pub use visual::{
    CodeBlock, Container, Image, Link, Rendered, Scroll, Slot, TextPiece, TextRun, VisualNode,
    find_link,
};
