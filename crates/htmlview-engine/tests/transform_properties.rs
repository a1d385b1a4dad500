use std::cell::RefCell;
use std::rc::Rc;

use htmlview_engine::render::find_link;
use htmlview_engine::{
    BULLET, Container, CustomRender, NodeKey, RenderOptions, Scroll, Slot, TaggedNode, TextPiece,
    TextRun, Transformer, VisualNode,
};
use pretty_assertions::assert_eq;

fn transform(options: &RenderOptions, nodes: &[TaggedNode]) -> Vec<Slot> {
    Transformer::new(options).transform_document(nodes)
}

fn sample_document() -> Vec<TaggedNode> {
    vec![
        TaggedNode::element("h2").with_child(TaggedNode::text("Heading")),
        TaggedNode::element("div").with_children([
            TaggedNode::element("p").with_children([
                TaggedNode::text("Some "),
                TaggedNode::element("b").with_child(TaggedNode::text("bold")),
                TaggedNode::element("br"),
                TaggedNode::element("a")
                    .with_attribute("href", "https://example.com/x?y=1&z=2")
                    .with_child(TaggedNode::text("link")),
            ]),
            TaggedNode::element("div"),
            TaggedNode::element("ol").with_children([
                TaggedNode::element("li").with_child(TaggedNode::text("first")),
                TaggedNode::element("li").with_children([
                    TaggedNode::text("second"),
                    TaggedNode::element("ul")
                        .with_child(TaggedNode::element("li").with_child(TaggedNode::text("deep"))),
                ]),
            ]),
        ]),
        TaggedNode::element("code").with_child(TaggedNode::text("x\n\ny\n")),
        TaggedNode::element("p").with_children([
            TaggedNode::text("\r"),
            TaggedNode::element("em").with_child(TaggedNode::text("\r")),
        ]),
        TaggedNode::element("blockquote").with_child(TaggedNode::text("\r")),
    ]
}

fn collect_text_runs<'a>(slots: &'a [Slot], out: &mut Vec<&'a TextRun>) {
    for slot in slots {
        let Some(node) = slot.as_node() else { continue };
        match node {
            VisualNode::Text(run) => {
                out.push(run);
                for piece in &run.content {
                    if let TextPiece::Slot(slot) = piece {
                        collect_text_runs(std::slice::from_ref(slot), out);
                    }
                }
            }
            VisualNode::Container(container) => collect_text_runs(&container.children, out),
            VisualNode::Link(link) => collect_text_runs(&link.children, out),
            VisualNode::Image(_) | VisualNode::CodeBlock(_) => {}
        }
    }
}

#[test]
fn non_empty_leaves_never_produce_empty_text_runs() {
    let tree = transform(&RenderOptions::default(), &sample_document());
    let mut runs = Vec::new();
    collect_text_runs(&tree, &mut runs);

    assert!(!runs.is_empty());
    for run in runs {
        assert!(!run.content.is_empty(), "empty run {run:?}");
        if let Some(literal) = run.literal() {
            assert!(!literal.is_empty());
        }
    }
}

#[test]
fn transform_is_deterministic() {
    let options = RenderOptions::default().with_debug_inline_counts(true);
    let document = sample_document();
    assert_eq!(transform(&options, &document), transform(&options, &document));
}

#[test]
fn sentinel_renderer_replaces_every_node() {
    let sentinel = VisualNode::Container(Container {
        key: None,
        style: Some("sentinel".to_string()),
        scroll: Scroll::None,
        children: vec![],
    });
    let returned = sentinel.clone();
    let options = RenderOptions::default()
        .with_custom_renderer(move |_, _, _, _| CustomRender::Node(returned.clone()));

    let document = sample_document();
    let tree = transform(&options, &document);
    assert_eq!(tree, vec![Slot::Node(sentinel); document.len()]);
}

#[test]
fn custom_null_is_kept_in_place() {
    let options = RenderOptions::default().with_custom_renderer(|node, _, _, _| {
        if node.name == "h2" {
            CustomRender::Empty
        } else {
            CustomRender::NoOpinion
        }
    });
    let tree = transform(&options, &sample_document());
    assert_eq!(tree.len(), 5);
    assert_eq!(tree[0], Slot::Empty);
}

#[test]
fn custom_renderer_sees_every_visit_in_both_contexts() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let options = RenderOptions::default().with_custom_renderer(move |node, key, _, context| {
        sink.borrow_mut().push(format!("{key} {} {context}", node.name));
        CustomRender::NoOpinion
    });

    let p = TaggedNode::element("p").with_child(TaggedNode::text("hi"));
    transform(&options, &[p]);

    assert_eq!(
        *seen.borrow(),
        vec!["0 p block", "0-0 text inline", "0-0 text block"]
    );
}

#[test]
fn nested_list_item_keeps_bullet_line_before_block() {
    let tree = transform(&RenderOptions::default(), &sample_document());

    let Slot::Node(VisualNode::Container(div)) = &tree[1] else {
        panic!("expected div container");
    };
    // The empty div at index 1 is dropped, leaving p and ol
    assert_eq!(div.children.len(), 2);
    let Slot::Node(VisualNode::Container(ol)) = &div.children[1] else {
        panic!("expected ol container");
    };
    assert_eq!(ol.key, Some(NodeKey::from("1-2")));
    let Slot::Node(VisualNode::Container(second)) = &ol.children[1] else {
        panic!("expected li container");
    };

    assert_eq!(second.children.len(), 2);
    let Slot::Node(VisualNode::Text(line)) = &second.children[0] else {
        panic!("expected bullet line");
    };
    assert_eq!(line.content[0], TextPiece::Literal(BULLET.to_string()));
    assert!(matches!(
        &second.children[1],
        Slot::Node(VisualNode::Container(nested)) if nested.key == Some(NodeKey::from("1-2-1-1"))
    ));
}

#[test]
fn pressing_link_forwards_exact_href() {
    let pressed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&pressed);
    let options = RenderOptions::new(move |href| sink.borrow_mut().push(href.to_string()));

    let tree = transform(&options, &sample_document());
    let link = find_link(&tree, &NodeKey::from("1-0-3")).unwrap();

    assert!(options.press(link));
    assert_eq!(*pressed.borrow(), vec!["https://example.com/x?y=1&z=2"]);
}
