// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/tokenizer.rs
//!
//! Byte-level tokenizer for bracket-delimited interface files
//!
//! Everything outside `[...]` is commentary and skipped. Tokens are read
//! lazily from any `BufRead`, so a large file is never held in memory
//! twice. A fresh `Tokenizer` over a fresh reader restarts the sequence.
//!
//! # Literal brackets and colons
//! Key tokens may carry `]` or `:` as their payload character:
//! - `[KEY:]]` is the token `KEY:]`
//! - `[KEY::]` is the token `KEY::`
//!
//! Content ending in `:]` keeps the `]` as payload, unless it ends in
//! `::]`, in which case the `]` is the closing bracket as usual.

use std::io::{self, BufRead};

use crate::core::types::Token;

/// Lazy iterator over the tokens of a byte stream
///
/// Yields `io::Result<Token>`; after the first error or the end of the
/// token sequence it only returns `None`.
pub struct Tokenizer<R> {
    reader: R,
    scratch: Vec<u8>,
    finished: bool,
}

impl<R: BufRead> Tokenizer<R> {
    /// Creates a tokenizer positioned at the start of `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            scratch: Vec::new(),
            finished: false,
        }
    }

    /// Reads the next token, or `None` when the sequence ends.
    ///
    /// The sequence ends at end of stream, at an empty `[]`, and at an
    /// unterminated `[` with no closing bracket.
    fn read_token(&mut self) -> io::Result<Option<Token>> {
        // Skip commentary up to and including the next '['
        self.scratch.clear();
        self.reader.read_until(b'[', &mut self.scratch)?;
        if self.scratch.last() != Some(&b'[') {
            return Ok(None);
        }

        let mut raw = Vec::new();
        self.reader.read_until(b']', &mut raw)?;
        if raw.last() != Some(&b']') || raw.len() == 1 {
            return Ok(None);
        }

        if !(raw.ends_with(b":]") && !raw.ends_with(b"::]")) {
            raw.pop();
        }

        Ok(Some(Token::from(raw)))
    }
}

impl<R: BufRead> Iterator for Tokenizer<R> {
    type Item = io::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.read_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Tokenizes an in-memory buffer
///
/// Reading from a slice cannot fail, so this returns plain tokens.
///
/// # Example
/// ```
/// use interface_organizer::core::tokenizer::tokenize;
///
/// let tokens = tokenize(b"[BIND:SELECT:REPEAT_NOT]\r\n[SYM:0:Enter]");
/// assert_eq!(tokens.len(), 2);
/// ```
pub fn tokenize(input: &[u8]) -> Vec<Token> {
    Tokenizer::new(input).map_while(Result::ok).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &[u8]) -> Vec<String> {
        tokenize(input).iter().map(Token::to_string).collect()
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(
            texts(b"[BIND:SELECT:REPEAT_NOT]\r\n[SYM:0:Enter]\r\n"),
            vec!["BIND:SELECT:REPEAT_NOT", "SYM:0:Enter"]
        );
    }

    #[test]
    fn test_commentary_is_skipped() {
        assert_eq!(
            texts(b"# GENERAL\r\nsome notes [KEY:a] more notes [KEY:b]"),
            vec!["KEY:a", "KEY:b"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize(b"").is_empty());
        assert!(tokenize(b"no brackets at all").is_empty());
    }

    #[test]
    fn test_empty_brackets_end_sequence() {
        assert_eq!(texts(b"[KEY:a][][KEY:b]"), vec!["KEY:a"]);
    }

    #[test]
    fn test_unterminated_token_is_dropped() {
        assert_eq!(texts(b"[KEY:a][KEY:b"), vec!["KEY:a"]);
    }

    #[test]
    fn test_open_bracket_inside_token() {
        assert_eq!(texts(b"[KEY:[]"), vec!["KEY:["]);
    }

    #[test]
    fn test_fused_after_end() {
        let mut tokenizer = Tokenizer::new(&b"[KEY:a]"[..]);
        assert!(tokenizer.next().is_some());
        assert!(tokenizer.next().is_none());
        assert!(tokenizer.next().is_none());
    }
}
