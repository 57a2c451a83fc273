//! Detection of messages that are a single generated image
//!
//! Image generation replies come back as `![alt](data:image/png;base64,...)`.
//! Such a message is shown as an image and nothing else.

use super::segment::ImageSegment;

const IMAGE_OPEN: &str = "![";
const DATA_URI_LINK: &str = "](data:image/";

/// Return the embedded image if `content` is an image message
///
/// The content must start with `![` and contain `](data:image/`; the first
/// `![alt](data:image/...)` link is then taken. Alt text never spans a
/// newline and the URI runs up to the first `)`.
pub fn detect_image(content: &str) -> Option<ImageSegment> {
    if !content.starts_with(IMAGE_OPEN) || !content.contains(DATA_URI_LINK) {
        return None;
    }

    let mut search_from = 0;
    while let Some(offset) = content[search_from..].find(IMAGE_OPEN) {
        let start = search_from + offset;
        if let Some((image, _)) = match_link_at(content, start) {
            return Some(image);
        }
        search_from = start + IMAGE_OPEN.len();
    }

    None
}

/// Replace every embedded image link in `text` with `replacement`
pub fn replace_images(text: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find(IMAGE_OPEN) {
        let start = search_from + offset;
        match match_link_at(text, start) {
            Some((_, end)) => {
                out.push_str(&text[last..start]);
                out.push_str(replacement);
                last = end;
                search_from = end;
            }
            None => search_from = start + IMAGE_OPEN.len(),
        }
    }

    out.push_str(&text[last..]);
    out
}

/// Try to match `![alt](data:image/...)` beginning exactly at `start`
///
/// The URI needs at least one character after `data:image/`. Returns the
/// image and the byte offset just past the closing `)`.
fn match_link_at(content: &str, start: usize) -> Option<(ImageSegment, usize)> {
    let alt_start = start + IMAGE_OPEN.len();
    let tail = &content[alt_start..];

    // Shortest alt text first, never crossing a line terminator
    for (alt_len, c) in tail.char_indices() {
        if tail[alt_len..].starts_with(DATA_URI_LINK) {
            let src_start = alt_len + 2;
            let subtype_start = alt_len + DATA_URI_LINK.len();
            if let Some(close) = tail[subtype_start..].find(')').filter(|&len| len > 0) {
                let src_end = subtype_start + close;
                let image = ImageSegment {
                    alt: tail[..alt_len].to_string(),
                    src: tail[src_start..src_end].to_string(),
                };
                return Some((image, alt_start + src_end + 1));
            }
        }
        if is_line_terminator(c) {
            break;
        }
    }

    None
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_image() {
        let image = detect_image("![Generated Image](data:image/png;base64,AAAA)").unwrap();
        assert_eq!(image.alt, "Generated Image");
        assert_eq!(image.src, "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_trailing_text_ignored() {
        let image =
            detect_image("![x](data:image/jpeg;base64,QUJD) and ```some code```").unwrap();
        assert_eq!(image.src, "data:image/jpeg;base64,QUJD");
    }

    #[test]
    fn test_must_start_with_image() {
        assert!(detect_image("see ![x](data:image/png;base64,AAAA)").is_none());
    }

    #[test]
    fn test_requires_data_uri() {
        assert!(detect_image("![x](https://example.com/cat.png)").is_none());
        assert!(detect_image("![x](data:text/plain,hi)").is_none());
    }

    #[test]
    fn test_unterminated_link() {
        assert!(detect_image("![x](data:image/png;base64,AAAA").is_none());
    }

    #[test]
    fn test_alt_cannot_cross_newline() {
        assert!(detect_image("![a\nb](data:image/png;base64,AAAA)").is_none());
    }

    #[test]
    fn test_alt_cannot_cross_any_line_terminator() {
        for alt in ["a\rb", "a\u{2028}b", "a\u{2029}b"] {
            let content = format!("![{}](data:image/png;base64,AA)", alt);
            assert!(detect_image(&content).is_none(), "alt {:?}", alt);
        }
    }

    #[test]
    fn test_empty_subtype_is_not_an_image() {
        assert!(detect_image("![x](data:image/)").is_none());
        assert_eq!(
            replace_images("a ![x](data:image/) b", "[Generated Image]"),
            "a ![x](data:image/) b"
        );
    }

    #[test]
    fn test_empty_subtype_extends_alt() {
        let image = detect_image("![x](data:image/)](data:image/png;base64,AA)").unwrap();
        assert_eq!(image.alt, "x](data:image/)");
        assert_eq!(image.src, "data:image/png;base64,AA");
    }

    #[test]
    fn test_replace_images() {
        let text = "before ![a](data:image/png;base64,AAAA) mid ![b](data:image/gif;base64,R0lG) ![c](http://x)";
        assert_eq!(
            replace_images(text, "[Generated Image]"),
            "before [Generated Image] mid [Generated Image] ![c](http://x)"
        );
        assert_eq!(replace_images("no images", "[img]"), "no images");
    }

    #[test]
    fn test_empty_alt() {
        let image = detect_image("![](data:image/gif;base64,R0lG)").unwrap();
        assert_eq!(image.alt, "");
        assert_eq!(image.mime_type(), "image/gif");
    }
}
