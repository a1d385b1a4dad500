use thiserror::Error;

use super::node::TaggedNode;

/// Errors a markup parser can report back to the render pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Malformed markup: {reason}")]
    Malformed { reason: String },

    #[error("Parser did not complete")]
    NotCompleted,
}

pub type ParseResult = Result<Vec<TaggedNode>, ParseError>;

/// Completion callback handed to a [`MarkupParser`]. Called exactly once.
pub type ParseCallback = Box<dyn FnOnce(ParseResult)>;

/// Turns raw markup into a tagged node tree.
///
/// Implementations may complete synchronously inside `parse` or hold on to
/// `done` and call it later; callers must handle both.
pub trait MarkupParser {
    fn parse(&self, markup: &str, done: ParseCallback);
}
