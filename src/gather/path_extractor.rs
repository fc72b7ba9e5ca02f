//! Quoted-literal scanner that pulls path-like strings out of HTML, CSS or JS text.
//!
//! The scanner does not understand any of those languages. It walks the text looking
//! for `'` or `"`, and treats whatever sits between one quote and the next quote of
//! either kind as a candidate. Precision comes from [`is_valid_path`], not from here.

use crate::filter::path_validator::{has_path_prefix, is_valid_path};

fn is_quote(b: u8) -> bool {
    b == b'\'' || b == b'"'
}

/// Scanner state between quote characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Not inside any literal.
    Outside,
    /// Holding an opening quote at the given byte offset.
    Open(usize),
}

/// Iterator over raw path candidates (before validation), in order of appearance.
///
/// A literal opens at a quote and closes at the next `'` or `"`; the two need not
/// match. A closed literal whose content does not start with a path prefix is
/// discarded, and its closing quote becomes the next opening quote. Backslash
/// escapes are not recognised.
pub struct Candidates<'a> {
    text: &'a str,
    pos: usize,
    state: State,
}

impl<'a> Candidates<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0, state: State::Outside }
    }
}

impl<'a> Iterator for Candidates<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() {
            let idx = self.pos;
            self.pos += 1;
            if !is_quote(bytes[idx]) {
                continue;
            }
            match self.state {
                State::Outside => self.state = State::Open(idx),
                State::Open(open) => {
                    // quotes are ASCII, so both offsets sit on char boundaries
                    let content = &self.text[open + 1..idx];
                    if has_path_prefix(content) {
                        self.state = State::Outside;
                        return Some(content);
                    }
                    self.state = State::Open(idx);
                }
            }
        }
        None
    }
}

/// Extract validated path candidates from `content`.
///
/// Duplicates are kept; callers accumulate into a set.
pub fn extract_paths(content: &str) -> Vec<String> {
    Candidates::new(content)
        .filter(|c| is_valid_path(c))
        .map(str::to_string)
        .collect()
}
