//! Single pass from lexer tokens to segments

use super::lexer::{lex_inline, BlockToken, InlineToken};
use super::segment::{InlineRun, InlineSpan, Segment};

/// Language reported for fences without a tag
pub const DEFAULT_LANGUAGE: &str = "text";

/// Build segments from a block token stream
pub fn build_segments(tokens: &[BlockToken<'_>]) -> Vec<Segment> {
    let mut segments = Vec::new();

    for token in tokens {
        match token {
            BlockToken::Text(text) => segments.extend(text_segments(text)),
            BlockToken::Fence { language, body, .. } => segments.push(Segment::code_block(
                language.unwrap_or(DEFAULT_LANGUAGE),
                body.trim(),
            )),
        }
    }

    segments
}

/// Segments for text outside any fence
///
/// Text that yields no line segments (blank lines only, or nothing at all)
/// is kept verbatim as a single plain text segment.
pub fn text_segments(text: &str) -> Vec<Segment> {
    let segments: Vec<Segment> = text.split('\n').filter_map(classify_line).collect();

    if segments.is_empty() {
        vec![Segment::plain(text)]
    } else {
        segments
    }
}

/// Classify one line; blank lines produce nothing
fn classify_line(line: &str) -> Option<Segment> {
    if let Some(title) = heading_text(line) {
        return Some(Segment::heading(title));
    }

    if let Some((number, rest)) = ordered_item(line) {
        return Some(Segment::OrderedListItem {
            number: number.to_string(),
            content: inline_run(rest),
        });
    }

    // Bullets are shown as indented paragraphs, not as a list
    if let Some(rest) = bullet_item(line) {
        return Some(Segment::indented(inline_run(rest)));
    }

    if line.trim().is_empty() {
        return None;
    }

    Some(Segment::paragraph(inline_run(line)))
}

/// `**Title**` spanning the whole line, with no `*` inside
fn heading_text(line: &str) -> Option<&str> {
    let inner = line.strip_prefix("**")?.strip_suffix("**")?;
    if inner.is_empty() || inner.contains('*') {
        return None;
    }
    Some(inner)
}

/// `<ws>*<digits>.<ws>` prefix; returns the numeral and the rest of the line
fn ordered_item(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_start();
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let rest = trimmed[digits..].strip_prefix('.')?;
    let rest = strip_one_whitespace(rest)?;
    Some((&trimmed[..digits], rest))
}

/// `<ws>*[-*]<ws>` prefix; returns the rest of the line
fn bullet_item(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let rest = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('*'))?;
    strip_one_whitespace(rest)
}

fn strip_one_whitespace(text: &str) -> Option<&str> {
    let c = text.chars().next().filter(|c| c.is_whitespace())?;
    Some(&text[c.len_utf8()..])
}

/// Split a line into text and inline code spans
pub fn inline_run(line: &str) -> InlineRun {
    lex_inline(line)
        .into_iter()
        .map(|token| match token {
            InlineToken::Text(text) => InlineSpan::Text(text.to_string()),
            InlineToken::Code(code) => InlineSpan::Code(code.to_string()),
        })
        .collect()
}
