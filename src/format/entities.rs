//! Entity and escape decoding for raw message content
//!
//! Backend responses arrive HTML-escaped and sometimes with JSON-style
//! escapes left in the text. The table is applied once, in order, before any
//! pattern matching.

/// Ordered substitutions; each one replaces every occurrence before the next runs
pub const ENTITY_TABLE: [(&str, &str); 10] = [
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
    ("\\u003e", ">"),
    ("\\u003c", "<"),
    ("\\n", "\n"),
    ("\\t", "\t"),
    ("\\\\", "/"),
];

/// Decode entities and escapes in `text`
pub fn decode_entities(text: &str) -> String {
    ENTITY_TABLE
        .iter()
        .fold(text.to_string(), |acc, &(from, to)| {
            if acc.contains(from) {
                acc.replace(from, to)
            } else {
                acc
            }
        })
}
