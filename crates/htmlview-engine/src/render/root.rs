use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::markup::{MarkupParser, NodeKey, ParseCallback, ParseError, ParseResult};

use super::options::RenderOptions;
use super::transform::Transformer;
use super::visual::{Container, Scroll, Slot, find_link};

/// Receives parse failures. Defaults to logging them.
pub type ErrorHandler = Rc<dyn Fn(&ParseError)>;

/// Called with the new display tree after every completed pass.
pub type RedisplayHandler = Rc<dyn Fn(&Container)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Idle,
    Rendering,
    Rendered,
}

impl fmt::Display for RenderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderState::Idle => f.write_str("idle"),
            RenderState::Rendering => f.write_str("rendering"),
            RenderState::Rendered => f.write_str("rendered"),
        }
    }
}

/// What a call to [`RenderRoot::trigger`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A parse was started. It may already have completed.
    Started,
    /// A pass is pending; the trigger was dropped.
    InFlight,
    /// A tree already exists for the current input.
    AlreadyRendered,
    /// Nothing to render.
    NoInput,
}

#[derive(Debug)]
struct RootState {
    state: RenderState,
    tree: Option<Vec<Slot>>,
}

/// Owns one render pipeline: starts the parse, applies its single completion,
/// keeps the resulting tree and tells the host to redisplay.
///
/// Single-threaded. The parser may complete inside `parse` or later; no
/// borrow of the shared state is held while the parser or any host callback
/// runs.
pub struct RenderRoot<P: MarkupParser> {
    parser: P,
    options: Rc<RenderOptions>,
    shared: Rc<RefCell<RootState>>,
    on_error: ErrorHandler,
    on_redisplay: Option<RedisplayHandler>,
}

impl<P: MarkupParser> RenderRoot<P> {
    pub fn new(parser: P, options: RenderOptions) -> Self {
        Self {
            parser,
            options: Rc::new(options),
            shared: Rc::new(RefCell::new(RootState {
                state: RenderState::Idle,
                tree: None,
            })),
            on_error: Rc::new(|e| log::error!("Failed to render markup: {e}")),
            on_redisplay: None,
        }
    }

    pub fn with_error_handler(mut self, handler: impl Fn(&ParseError) + 'static) -> Self {
        self.on_error = Rc::new(handler);
        self
    }

    pub fn with_redisplay(mut self, handler: impl Fn(&Container) + 'static) -> Self {
        self.on_redisplay = Some(Rc::new(handler));
        self
    }

    pub fn state(&self) -> RenderState {
        self.shared.borrow().state
    }

    /// The last successfully produced tree.
    pub fn tree(&self) -> Option<Vec<Slot>> {
        self.shared.borrow().tree.clone()
    }

    /// Starts a pass over `markup` unless one is pending or a tree already
    /// exists. Absent or empty markup is ignored.
    pub fn trigger(&self, markup: Option<&str>) -> TriggerOutcome {
        let Some(markup) = markup.filter(|m| !m.is_empty()) else {
            return TriggerOutcome::NoInput;
        };

        {
            let mut shared = self.shared.borrow_mut();
            match shared.state {
                RenderState::Rendering => {
                    log::debug!("Render already in flight, dropping trigger");
                    return TriggerOutcome::InFlight;
                }
                RenderState::Rendered if shared.tree.is_some() => {
                    return TriggerOutcome::AlreadyRendered;
                }
                RenderState::Idle | RenderState::Rendered => {}
            }
            shared.state = RenderState::Rendering;
        }

        log::debug!("Starting render pass over {} bytes of markup", markup.len());
        self.parser.parse(markup, self.completion());
        TriggerOutcome::Started
    }

    /// Returns a rendered root to idle so new input can be rendered. The
    /// current tree stays on display until a pass replaces it.
    pub fn reset(&self) {
        let mut shared = self.shared.borrow_mut();
        if shared.state == RenderState::Rendering {
            log::warn!("Ignoring reset while a render pass is in flight");
            return;
        }
        shared.state = RenderState::Idle;
    }

    /// The tree to show: the stored tree under the root container, or an
    /// empty root container if there is none.
    pub fn display(&self) -> Container {
        root_container(&self.options, self.shared.borrow().tree.as_deref())
    }

    /// Presses the link with `key` in the current tree. Returns false if there
    /// is no such link or it has no href.
    pub fn press_link(&self, key: &NodeKey) -> bool {
        let link = {
            let shared = self.shared.borrow();
            shared
                .tree
                .as_deref()
                .and_then(|tree| find_link(tree, key))
                .cloned()
        };
        match link {
            Some(link) => self.options.press(&link),
            None => {
                log::warn!("No link with key {key} in the current tree");
                false
            }
        }
    }

    fn completion(&self) -> ParseCallback {
        let shared = Rc::clone(&self.shared);
        let options = Rc::clone(&self.options);
        let on_error = Rc::clone(&self.on_error);
        let on_redisplay = self.on_redisplay.clone();

        Box::new(move |result| match result {
            Ok(nodes) => {
                let tree = Transformer::new(&options).transform_document(&nodes);
                let shown = root_container(&options, Some(&tree));
                {
                    let mut shared = shared.borrow_mut();
                    shared.tree = Some(tree);
                    shared.state = RenderState::Rendered;
                }
                log::debug!("Render pass complete");
                if let Some(redisplay) = on_redisplay {
                    redisplay(&shown);
                }
            }
            Err(e) => {
                shared.borrow_mut().state = RenderState::Idle;
                on_error(&e);
            }
        })
    }
}

impl<P: MarkupParser> fmt::Debug for RenderRoot<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderRoot")
            .field("options", &self.options)
            .field("shared", &self.shared)
            .finish_non_exhaustive()
    }
}

fn root_container(options: &RenderOptions, tree: Option<&[Slot]>) -> Container {
    Container {
        key: None,
        style: options.style("root"),
        scroll: Scroll::None,
        children: tree.map(<[Slot]>::to_vec).unwrap_or_default(),
    }
}

/// Runs a single pass with a parser that completes synchronously.
pub fn render_markup<P: MarkupParser>(
    parser: &P,
    markup: &str,
    options: &RenderOptions,
) -> Result<Vec<Slot>, ParseError> {
    let outcome: Rc<RefCell<Option<ParseResult>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&outcome);
    parser.parse(markup, Box::new(move |result| *sink.borrow_mut() = Some(result)));

    let result = outcome.borrow_mut().take();
    let nodes = result.ok_or(ParseError::NotCompleted)??;
    Ok(Transformer::new(options).transform_document(&nodes))
}
