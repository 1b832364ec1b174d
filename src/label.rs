//! Cycling text label.

use embassy_time::{
    Duration,
    Instant,
};

/// How long each word stays on screen.
pub const LABEL_INTERVAL: Duration = Duration::from_secs(1);

/// Something that can show a line of text.
pub trait LabelSink {
    type Error;

    fn set_text(&mut self, text: &str) -> Result<(), Self::Error>;
}

/// Words to cycle through, longest first.
///
/// The renderer sizes its area for [`longest`](WordList::longest), so the
/// first entry must be the one that needs the most room. That order is not
/// checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordList<'w> {
    words: &'w [&'w str],
}

impl<'w> WordList<'w> {
    /// # Panics
    ///
    /// Panics if `words` is empty. In a `const` this is a compile error.
    #[must_use]
    pub const fn new(words: &'w [&'w str]) -> Self {
        assert!(!words.is_empty(), "word list must not be empty");
        Self { words }
    }

    /// The first word, used to size the label.
    #[must_use]
    pub const fn longest(&self) -> &'w str {
        self.words[0]
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'w str> {
        self.words.get(index).copied()
    }

    #[must_use]
    pub const fn as_slice(&self) -> &'w [&'w str] {
        self.words
    }
}

/// Timer plus index into a [`WordList`].
#[derive(Debug, Clone)]
pub struct LabelRotator<'w> {
    words: WordList<'w>,
    interval: Duration,
    index: usize,
    last_switch: Instant,
}

impl<'w> LabelRotator<'w> {
    /// Starts on the first word, with the timer running from `now`.
    #[must_use]
    pub const fn new(words: WordList<'w>, now: Instant, interval: Duration) -> Self {
        Self {
            words,
            interval,
            index: 0,
            last_switch: now,
        }
    }

    /// Move to the next word if the interval has passed.
    ///
    /// Returns the new word when it switched. Wraps back to the first word
    /// after the last one.
    pub fn poll(&mut self, now: Instant) -> Option<&'w str> {
        if now.saturating_duration_since(self.last_switch) <= self.interval {
            return None;
        }

        self.index = (self.index + 1) % self.words.len();
        self.last_switch = now;
        Some(self.current())
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn current(&self) -> &'w str {
        self.words.as_slice()[self.index]
    }

    #[must_use]
    pub const fn words(&self) -> WordList<'w> {
        self.words
    }
}
