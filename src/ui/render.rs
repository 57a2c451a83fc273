//! Plain-text layout of formatted segments
//!
//! Used by the terminal demo and by anything that needs a readable
//! rendition of a message without a graphical toolkit.

use crate::format::{InlineSpan, Segment};

/// Lay out segments as terminal text
pub fn render_segments(segments: &[Segment]) -> String {
    let mut out = String::new();

    for segment in segments {
        match segment {
            Segment::Heading { text } => {
                out.push_str(text);
                out.push('\n');
                out.push_str(&"=".repeat(text.chars().count()));
                out.push('\n');
            }
            Segment::OrderedListItem { number, content } => {
                out.push_str(&format!("{}. {}\n", number, render_inline(content)));
            }
            Segment::Paragraph { content, indented } => {
                if *indented {
                    out.push_str("  ");
                }
                out.push_str(&render_inline(content));
                out.push('\n');
            }
            Segment::CodeBlock { language, code } => {
                out.push_str(&format!("--- {} ---\n", language));
                out.push_str(code);
                out.push_str("\n---\n");
            }
            Segment::PlainText { text } => out.push_str(text),
            Segment::Image(image) if image.alt.is_empty() => out.push_str("[image]\n"),
            Segment::Image(image) => out.push_str(&format!("[image: {}]\n", image.alt)),
        }
    }

    out
}

/// Inline code keeps its backticks so it stays distinguishable
pub fn render_inline(spans: &[InlineSpan]) -> String {
    spans
        .iter()
        .map(|span| match span {
            InlineSpan::Text(text) => text.clone(),
            InlineSpan::Code(code) => format!("`{}`", code),
        })
        .collect()
}
