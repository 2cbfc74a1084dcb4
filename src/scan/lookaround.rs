//! Bounded reads around the scanner's cursor. None of these move the cursor;
//! out-of-range requests are clamped to the source.

use super::scanner::Scanner;

impl Scanner {
    /// Up to `n` characters ending just before the cursor.
    ///
    /// Empty when the first character of that window is escaped.
    pub fn previous_chars(&self, n: usize) -> &[char] {
        let start = self.pos.saturating_sub(n);
        if self.escapes.contains(start) {
            return &[];
        }
        &self.src[start..self.pos]
    }

    pub fn previous_char(&self) -> Option<char> {
        self.previous_chars(1).first().copied()
    }

    /// Up to `n` characters starting just after the cursor.
    pub fn next_chars(&self, n: usize) -> &[char] {
        let len = self.src.len();
        let start = (self.pos + 1).min(len);
        let end = self.pos.saturating_add(n).saturating_add(1).min(len);
        &self.src[start..end]
    }

    pub fn next_char(&self) -> Option<char> {
        self.next_chars(1).first().copied()
    }

    /// The run of ASCII letters ending just before the cursor, stopping at
    /// an escaped character.
    pub fn previous_word(&self) -> &[char] {
        let mut start = self.pos;
        while start > 0 {
            let candidate = start - 1;
            if self.escapes.contains(candidate) || !self.src[candidate].is_ascii_alphabetic() {
                break;
            }
            start = candidate;
        }
        &self.src[start..self.pos]
    }

    /// The run of ASCII letters starting just after the cursor.
    pub fn next_word(&self) -> &[char] {
        let len = self.src.len();
        let start = (self.pos + 1).min(len);
        let end = self.src[start..]
            .iter()
            .position(|c| !c.is_ascii_alphabetic())
            .map_or(len, |i| start + i);
        &self.src[start..end]
    }

    /// Rest of the current line after the cursor, skipping `skip` characters.
    pub fn line_after(&self, skip: usize) -> &[char] {
        let len = self.src.len();
        let start = self.pos.saturating_add(1 + skip).min(len);
        let end = self.src[start..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(len, |i| start + i);
        &self.src[start..end]
    }

    /// Current line up to, not including, the cursor.
    pub fn line_before(&self) -> &[char] {
        let end = self.pos.min(self.src.len());
        let start = self.src[..end]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1);
        &self.src[start..end]
    }
}

/// Compare a character window against a keyword.
pub fn is_word(window: &[char], word: &str) -> bool {
    window.iter().copied().eq(word.chars())
}

/// Compare a character window against any of several keywords.
pub fn is_any_word(window: &[char], words: &[&str]) -> bool {
    words.iter().any(|w| is_word(window, w))
}
