//! # Markup Input
//!
//! The input side of the pipeline: the tagged node tree a parser produces,
//! the static tag classification consulted while tagging, and the position
//! keys derived while the tree is walked.
//!
//! ## Modules
//!
//! - **`classify`**: `Tag` vocabulary and the block/inline partition
//! - **`node`**: `TaggedNode`, the classified parser output
//! - **`position`**: `NodeKey` and `Lineage`, derived per node during a pass
//! - **`parser`**: the `MarkupParser` collaborator contract
//! - **`tl_parser`**: `TlMarkupParser`, a synchronous adapter over the `tl` crate

pub mod classify;
pub mod node;
pub mod parser;
pub mod position;
pub mod tl_parser;

pub use classify::{NodeKind, Tag, classify};
pub use node::{TEXT_NODE_NAME, TaggedNode};
pub use parser::{MarkupParser, ParseCallback, ParseError, ParseResult};
pub use position::{Lineage, NodeKey};
pub use tl_parser::TlMarkupParser;
