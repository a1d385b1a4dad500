use std::fmt::Write;

use super::visual::{Container, Scroll, Slot, TextPiece, VisualNode};

const INDENT: &str = "  ";

/// Renders a visual tree as an indented plain-text outline, one node per line.
///
/// Used by the CLI and by snapshot tests.
pub fn outline(slots: &[Slot]) -> String {
    let mut lines = Vec::new();
    for slot in slots {
        write_slot(&mut lines, slot, 0);
    }
    lines.join("\n")
}

/// Outline of a container and everything below it.
pub fn outline_container(container: &Container) -> String {
    let mut lines = Vec::new();
    write_container(&mut lines, container, 0);
    lines.join("\n")
}

fn line(lines: &mut Vec<String>, depth: usize, text: String) {
    lines.push(format!("{}{}", INDENT.repeat(depth), text));
}

fn write_slot(lines: &mut Vec<String>, slot: &Slot, depth: usize) {
    match slot {
        Slot::Empty => line(lines, depth, "empty".to_string()),
        Slot::Node(node) => write_node(lines, node, depth),
    }
}

fn write_container(lines: &mut Vec<String>, container: &Container, depth: usize) {
    let mut head = "container".to_string();
    if let Some(key) = &container.key {
        let _ = write!(head, " #{key}");
    }
    if let Some(style) = &container.style {
        let _ = write!(head, " ({style})");
    }
    if container.scroll == Scroll::Horizontal {
        head.push_str(" scroll=horizontal");
    }
    line(lines, depth, head);
    for child in &container.children {
        write_slot(lines, child, depth + 1);
    }
}

fn styles_suffix(styles: &[String]) -> String {
    if styles.is_empty() {
        String::new()
    } else {
        format!(" [{}]", styles.join(" "))
    }
}

fn write_node(lines: &mut Vec<String>, node: &VisualNode, depth: usize) {
    match node {
        VisualNode::Container(container) => write_container(lines, container, depth),
        VisualNode::Text(run) => {
            let mut head = "text".to_string();
            if let Some(key) = &run.key {
                let _ = write!(head, " #{key}");
            }
            head.push_str(&styles_suffix(&run.styles));
            if let Some(literal) = run.literal() {
                let _ = write!(head, " {literal:?}");
                line(lines, depth, head);
                return;
            }
            line(lines, depth, head);
            for piece in &run.content {
                match piece {
                    TextPiece::Literal(text) => line(lines, depth + 1, format!("{text:?}")),
                    TextPiece::Slot(slot) => write_slot(lines, slot, depth + 1),
                }
            }
        }
        VisualNode::Link(link) => {
            let href = match &link.href {
                Some(href) => format!("href={href:?}"),
                None => "href=none".to_string(),
            };
            line(
                lines,
                depth,
                format!("link #{} {}{}", link.key, href, styles_suffix(&link.styles)),
            );
            for child in &link.children {
                write_slot(lines, child, depth + 1);
            }
        }
        VisualNode::Image(image) => {
            let mut head = match &image.src {
                Some(src) => format!("image src={src:?}"),
                None => "image src=none".to_string(),
            };
            if let Some(style) = &image.style {
                let _ = write!(head, " ({style})");
            }
            line(lines, depth, head);
        }
        VisualNode::CodeBlock(block) => {
            let mut head = "code".to_string();
            if let Some(style) = &block.style {
                let _ = write!(head, " ({style})");
            }
            line(lines, depth, head);
            for code_line in &block.lines {
                line(
                    lines,
                    depth + 1,
                    format!("{} {} {:?}", code_line.label(), code_line.position, code_line.text),
                );
            }
        }
    }
}
