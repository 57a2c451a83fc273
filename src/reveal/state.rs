//! Word-by-word progress through a response

/// Progress of one reveal
///
/// Words come from splitting on single spaces, so runs of spaces produce
/// empty words and survive the split/join unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealState {
    words: Vec<String>,
    cursor: usize,
    accumulated: String,
}

impl RevealState {
    /// Start revealing `text`
    pub fn new(text: &str) -> Self {
        Self {
            words: text.split(' ').map(str::to_string).collect(),
            cursor: 0,
            accumulated: String::with_capacity(text.len()),
        }
    }

    /// Append the next word and return the text revealed so far
    ///
    /// Returns `None` once every word has been revealed.
    pub fn advance(&mut self) -> Option<&str> {
        let word = self.words.get(self.cursor)?;
        if self.cursor > 0 {
            self.accumulated.push(' ');
        }
        self.accumulated.push_str(word);
        self.cursor += 1;
        Some(self.accumulated.as_str())
    }

    /// Text revealed so far
    pub fn accumulated(&self) -> &str {
        &self.accumulated
    }

    /// Number of words revealed so far
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of words
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.words.len()
    }
}
