use std::fmt;

use serde::Serialize;

use crate::style::StyleRef;

/// Text shown for a source line that was empty, so the row keeps its height.
pub const BLANK_LINE: &str = "\n";

/// Where a row sits in its code block; drives the extra top/bottom padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PositionClass {
    First,
    Middle,
    Last,
    FirstAndLast,
}

impl PositionClass {
    /// Position of the 1-based line `number` in a block of `count` lines.
    pub fn of(number: usize, count: usize) -> Self {
        match (number, count) {
            (_, 1) => PositionClass::FirstAndLast,
            (1, _) => PositionClass::First,
            (n, c) if n == c => PositionClass::Last,
            _ => PositionClass::Middle,
        }
    }

    /// Row style classes, base row style first.
    pub fn style_refs(self) -> Vec<StyleRef> {
        let extra = match self {
            PositionClass::First => Some("codeFirstRow"),
            PositionClass::Last => Some("codeLastRow"),
            PositionClass::FirstAndLast => Some("codeFirstAndLastRow"),
            PositionClass::Middle => None,
        };
        std::iter::once("codeRow")
            .chain(extra)
            .map(str::to_string)
            .collect()
    }
}

impl fmt::Display for PositionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionClass::First => f.write_str("first"),
            PositionClass::Middle => f.write_str("middle"),
            PositionClass::Last => f.write_str("last"),
            PositionClass::FirstAndLast => f.write_str("firstAndLast"),
        }
    }
}

/// A numbered row of a code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeLine {
    /// 1-based
    pub number: usize,
    pub text: String,
    pub position: PositionClass,
    /// Row style classes for `position`, base row style first.
    pub styles: Vec<StyleRef>,
}

impl CodeLine {
    /// Gutter label, e.g. `"3."`.
    pub fn label(&self) -> String {
        format!("{}.", self.number)
    }
}

/// Splits code text into numbered rows.
///
/// A trailing newline does not produce an extra row; empty lines in between
/// become [`BLANK_LINE`].
pub fn format_code(text: &str) -> Vec<CodeLine> {
    let mut segments: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    if segments.last().is_some_and(|last| last.is_empty()) {
        segments.pop();
    }

    let count = segments.len();
    segments
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let number = index + 1;
            let position = PositionClass::of(number, count);
            CodeLine {
                number,
                text: if line.is_empty() {
                    BLANK_LINE.to_string()
                } else {
                    line.to_string()
                },
                position,
                styles: position.style_refs(),
            }
        })
        .collect()
}
