//! Lexers for decoded message text
//!
//! [`lex_blocks`] cuts a message into plain text and fenced code blocks,
//! [`lex_inline`] cuts a single line into text and inline code. Both scan
//! leftmost-first and resume after each match, so overlapping candidates are
//! never considered.

const FENCE: &str = "```";
const TICK: char = '`';

/// A top-level piece of a message
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockToken<'a> {
    /// Text outside any fence
    Text(&'a str),

    /// A complete fenced block
    Fence {
        /// The exact source of the block, delimiters included
        raw: &'a str,
        /// Tag directly after the opening delimiter, if any
        language: Option<&'a str>,
        /// Everything between the opening line and the closing delimiter
        body: &'a str,
    },
}

impl<'a> BlockToken<'a> {
    /// The source slice this token was cut from
    pub fn raw(&self) -> &'a str {
        match self {
            BlockToken::Text(text) => text,
            BlockToken::Fence { raw, .. } => raw,
        }
    }
}

/// A piece of a single line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InlineToken<'a> {
    Text(&'a str),
    /// Contents of a `` `code` `` span, backticks excluded
    Code(&'a str),
}

/// Split `text` into text runs and fenced code blocks
///
/// A fence opens with three backticks, an optional `[A-Za-z0-9_]+` tag and
/// an optional newline. Its body is the shortest run up to the next three
/// backticks. An opening delimiter with no closing one is left as text.
pub fn lex_blocks(text: &str) -> Vec<BlockToken<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find(FENCE) {
        let open = cursor + offset;
        match fence_at(text, open) {
            Some(fence) => {
                if open > last {
                    tokens.push(BlockToken::Text(&text[last..open]));
                }
                last = open + fence.raw().len();
                cursor = last;
                tokens.push(fence);
            }
            // No closing delimiter anywhere after this point, so no later
            // opening can close either.
            None => break,
        }
    }

    if last < text.len() {
        tokens.push(BlockToken::Text(&text[last..]));
    }

    tokens
}

/// Parse a fence whose opening delimiter starts at `open`
fn fence_at(text: &str, open: usize) -> Option<BlockToken<'_>> {
    let after_open = open + FENCE.len();
    let rest = &text[after_open..];

    let tag_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    let language = (tag_len > 0).then(|| &rest[..tag_len]);

    let mut body_start = after_open + tag_len;
    if text[body_start..].starts_with('\n') {
        body_start += 1;
    }

    let close = body_start + text[body_start..].find(FENCE)?;
    let end = close + FENCE.len();

    Some(BlockToken::Fence {
        raw: &text[open..end],
        language,
        body: &text[body_start..close],
    })
}

/// Split a line into text and `` `inline code` `` spans
///
/// Code spans need at least one character between the backticks; an empty
/// pair is treated as text.
pub fn lex_inline(line: &str) -> Vec<InlineToken<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;
    let mut cursor = 0;

    while let Some(offset) = line[cursor..].find(TICK) {
        let open = cursor + offset;
        let Some(len) = line[open + 1..].find(TICK) else {
            break;
        };

        if len == 0 {
            // "``": retry from the second backtick
            cursor = open + 1;
            continue;
        }

        let close = open + 1 + len;
        if open > last {
            tokens.push(InlineToken::Text(&line[last..open]));
        }
        tokens.push(InlineToken::Code(&line[open + 1..close]));
        last = close + 1;
        cursor = last;
    }

    if last < line.len() {
        tokens.push(InlineToken::Text(&line[last..]));
    }

    tokens
}
