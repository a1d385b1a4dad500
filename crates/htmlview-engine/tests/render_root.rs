use std::cell::RefCell;
use std::rc::Rc;

use htmlview_engine::{
    NodeKey, ParseError, RenderOptions, RenderRoot, RenderState, TlMarkupParser, TriggerOutcome,
    outline,
};

#[test]
fn synchronous_parser_renders_within_trigger() {
    let redisplays = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&redisplays);
    let root = RenderRoot::new(TlMarkupParser::new(), RenderOptions::default())
        .with_redisplay(move |_| *sink.borrow_mut() += 1);

    assert_eq!(root.trigger(Some("<p>One</p><p>Two</p>")), TriggerOutcome::Started);
    assert_eq!(root.state(), RenderState::Rendered);
    assert_eq!(*redisplays.borrow(), 1);
    assert_eq!(root.display().children.len(), 2);

    // Same input object again is a no-op
    assert_eq!(
        root.trigger(Some("<p>One</p><p>Two</p>")),
        TriggerOutcome::AlreadyRendered
    );
    assert_eq!(*redisplays.borrow(), 1);
}

#[test]
fn reset_allows_new_input() {
    let root = RenderRoot::new(TlMarkupParser::new(), RenderOptions::default());

    root.trigger(Some("<p>old</p>"));
    root.reset();
    assert_eq!(root.state(), RenderState::Idle);
    // Previous tree stays on display until replaced
    assert_eq!(root.display().children.len(), 1);

    root.trigger(Some("<h1>new</h1><p>text</p>"));
    let tree = root.tree().unwrap();
    assert!(outline(&tree).starts_with("container #0 (h1Wrapper)"));
}

#[test]
fn link_press_goes_through_root() {
    let pressed = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&pressed);
    let options = RenderOptions::new(move |href| *sink.borrow_mut() = Some(href.to_string()));
    let root = RenderRoot::new(TlMarkupParser::new(), options);

    root.trigger(Some(r#"<p>See <a href="/docs/intro">the docs</a></p>"#));
    assert!(root.press_link(&NodeKey::from("0-1")));
    assert_eq!(pressed.borrow().as_deref(), Some("/docs/intro"));
}

#[test]
fn default_error_handler_only_logs() {
    struct Failing;
    impl htmlview_engine::MarkupParser for Failing {
        fn parse(&self, _markup: &str, done: htmlview_engine::ParseCallback) {
            done(Err(ParseError::Malformed {
                reason: "unterminated".to_string(),
            }));
        }
    }

    let root = RenderRoot::new(Failing, RenderOptions::default());
    assert_eq!(root.trigger(Some("<p")), TriggerOutcome::Started);
    assert_eq!(root.state(), RenderState::Idle);
    assert!(root.tree().is_none());
    assert!(root.display().children.is_empty());
}
