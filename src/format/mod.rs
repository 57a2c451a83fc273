//! Chat message formatting
//!
//! Turns raw message content into an ordered list of [`Segment`]s:
//! headings, list items, paragraphs with inline code, fenced code blocks, or
//! a single embedded image. Formatting never fails; anything unrecognised
//! ends up as a paragraph or plain text.

pub mod builder;
pub mod entities;
pub mod image;
pub mod lexer;
pub mod segment;

pub use builder::DEFAULT_LANGUAGE;
pub use entities::decode_entities;
pub use image::{detect_image, replace_images};
pub use segment::{ImageSegment, InlineRun, InlineSpan, Segment};

use tracing::debug;

/// Format raw message content into segments
///
/// An image message short-circuits everything else. Otherwise entities are
/// decoded once, fenced code is cut out, and the remaining text is classified
/// line by line. The result is never empty.
pub fn format(content: &str) -> Vec<Segment> {
    if let Some(image) = detect_image(content) {
        debug!("Message is an embedded {} image", image.mime_type());
        return vec![Segment::Image(image)];
    }

    let decoded = decode_entities(content);
    let tokens = lexer::lex_blocks(&decoded);
    let segments = builder::build_segments(&tokens);

    if segments.is_empty() {
        return vec![Segment::plain(decoded)];
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> InlineSpan {
        InlineSpan::Text(s.to_string())
    }

    fn code(s: &str) -> InlineSpan {
        InlineSpan::Code(s.to_string())
    }

    #[test]
    fn test_mixed_lines() {
        let segments = format("Hello\n**Title**\n1. first `code` here");

        assert_eq!(
            segments,
            vec![
                Segment::paragraph(vec![text("Hello")]),
                Segment::heading("Title"),
                Segment::OrderedListItem {
                    number: "1".to_string(),
                    content: vec![text("first "), code("code"), text(" here")],
                },
            ]
        );
    }

    #[test]
    fn test_single_code_block() {
        assert_eq!(
            format("```js\nconst x = 1;\n```"),
            vec![Segment::code_block("js", "const x = 1;")]
        );
    }

    #[test]
    fn test_text_around_code_block() {
        let segments = format("Try this:\n```sh\nls\n```\nDone.");

        assert_eq!(
            segments,
            vec![
                Segment::paragraph(vec![text("Try this:")]),
                Segment::code_block("sh", "ls"),
                Segment::paragraph(vec![text("Done.")]),
            ]
        );
    }

    #[test]
    fn test_whitespace_between_blocks_is_plain_text() {
        let segments = format("```a\n1\n```\n\n```b\n2\n```");

        assert_eq!(
            segments,
            vec![
                Segment::code_block("a", "1"),
                Segment::plain("\n\n"),
                Segment::code_block("b", "2"),
            ]
        );
    }

    #[test]
    fn test_entities_decoded_before_fences() {
        let segments = format("```html\\n&lt;b&gt;hi&lt;/b&gt;\\n```");
        assert_eq!(segments, vec![Segment::code_block("html", "<b>hi</b>")]);
    }

    #[test]
    fn test_escaped_entity_in_code_not_double_decoded() {
        let segments = format("```\n&amp;lt;\n```");
        assert_eq!(segments, vec![Segment::code_block("text", "&lt;")]);
    }

    #[test]
    fn test_image_short_circuit() {
        let segments = format("![Generated Image](data:image/png;base64,iVBORw0KGgo=)\n```js\nx\n```");

        assert_eq!(segments.len(), 1);
        match &segments[0] {
            Segment::Image(image) => {
                assert_eq!(image.src, "data:image/png;base64,iVBORw0KGgo=");
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format(""), vec![Segment::plain("")]);
    }

    #[test]
    fn test_whitespace_input() {
        assert_eq!(format("   \n  "), vec![Segment::plain("   \n  ")]);
    }

    #[test]
    fn test_unterminated_fence_degrades() {
        let segments = format("```rust\nfn main() {");
        assert_eq!(
            segments,
            vec![
                Segment::paragraph(vec![text("```rust")]),
                Segment::paragraph(vec![text("fn main() {")]),
            ]
        );
    }

    #[test]
    fn test_malformed_image_link_formats_as_text() {
        assert_eq!(
            format("![x](data:image/)"),
            vec![Segment::paragraph(vec![text("![x](data:image/)")])]
        );

        let segments = format("![a\rb](data:image/png;base64,AA)");
        assert_eq!(segments.len(), 1);
        assert!(matches!(segments[0], Segment::Paragraph { .. }));
    }
}
