//! Structured pieces of a formatted chat message

use crate::{GenbotError, Result};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One span inside a line of text
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum InlineSpan {
    /// Ordinary text
    Text(String),
    /// Text that was wrapped in single backticks
    Code(String),
}

/// Ordered spans produced by splitting a line on backtick-delimited code
pub type InlineRun = Vec<InlineSpan>;

/// An image embedded as a `data:` URI
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageSegment {
    /// Alt text between the brackets
    pub alt: String,
    /// The full `data:image/...` URI
    pub src: String,
}

impl ImageSegment {
    /// MIME type declared by the data URI, e.g. `image/png`
    pub fn mime_type(&self) -> &str {
        let rest = self.src.strip_prefix("data:").unwrap_or(&self.src);
        let end = rest.find([';', ',']).unwrap_or(rest.len());
        &rest[..end]
    }

    /// Decode the base64 payload into raw image bytes
    pub fn decode(&self) -> Result<Vec<u8>> {
        let (header, payload) = self
            .src
            .split_once(',')
            .ok_or_else(|| GenbotError::ImageDecode("data URI has no payload".to_string()))?;

        if !header.ends_with(";base64") {
            return Err(GenbotError::ImageDecode(format!(
                "unsupported data URI encoding: {}",
                header
            )));
        }

        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| GenbotError::ImageDecode(e.to_string()))
    }

    /// File name offered when the user downloads the image
    pub fn download_filename(&self, at: DateTime<Utc>) -> String {
        format!("generated-image-{}.png", at.timestamp_millis())
    }
}

/// One structurally distinct unit of formatted message content
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// A line that was entirely `**bold**`
    Heading { text: String },

    /// A `N. item` line; `number` keeps the numeral exactly as written
    OrderedListItem { number: String, content: InlineRun },

    /// Any other non-blank line. Bullet lines become indented paragraphs.
    Paragraph { content: InlineRun, indented: bool },

    /// A fenced code block
    CodeBlock { language: String, code: String },

    /// Text that produced no other segment, kept verbatim
    PlainText { text: String },

    /// The whole message was a single embedded image
    Image(ImageSegment),
}

impl Segment {
    pub fn heading(text: impl Into<String>) -> Self {
        Segment::Heading { text: text.into() }
    }

    pub fn paragraph(content: InlineRun) -> Self {
        Segment::Paragraph {
            content,
            indented: false,
        }
    }

    pub fn indented(content: InlineRun) -> Self {
        Segment::Paragraph {
            content,
            indented: true,
        }
    }

    pub fn code_block(language: impl Into<String>, code: impl Into<String>) -> Self {
        Segment::CodeBlock {
            language: language.into(),
            code: code.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Segment::PlainText { text: text.into() }
    }
}
