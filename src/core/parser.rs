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

//! src/core/parser.rs
//!
//! Document builder for interface files
//!
//! Consumes the token stream and groups key tokens under the binding
//! that precedes them, and bindings under the menu the lookup table
//! assigns to their name.
//!
//! # Architecture
//! Binding tokens are recognised with nom combinators over raw bytes.
//! Everything else is a key token and is appended to the current
//! binding. Key tokens seen before the first binding token belong to
//! the sentinel menu `""` under the sentinel binding `""`.
//!
//! # Errors
//! A malformed binding token or a binding name missing from the lookup
//! table aborts the whole parse. Dropping the binding instead would
//! silently lose it from the reorganised file.

use nom::{
    bytes::complete::{tag, take_till},
    combinator::{eof, map},
    IResult, Parser,
};
use std::io::BufRead;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::lookup::MenuLookup;
use crate::core::tokenizer::Tokenizer;
use crate::core::types::{BindingToken, Document, Token};

/// Parse errors with token position context
///
/// `position` is the 1-based ordinal of the offending token.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed binding token [{token}] (token {position}): expected BIND:<name>:<repeat>")]
    MalformedBinding { token: String, position: usize },

    #[error("Binding name '{name}' in [{token}] (token {position}) is not in the menu lookup table")]
    UnknownBinding {
        name: String,
        token: String,
        position: usize,
    },

    #[error("IO error reading interface file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Parse a binding token into its name and repeat fields
///
/// Format: `BIND:<name>:<repeat>`, exactly three `:`-separated fields.
///
/// # Example
/// ```ignore
/// let (_, binding) = parse_binding_token(b"BIND:SELECT:REPEAT_NOT")?;
/// assert_eq!(binding.name, b"SELECT");
/// ```
pub fn parse_binding_token(input: &[u8]) -> IResult<&[u8], BindingToken<'_>> {
    map(
        (
            tag(&b"BIND:"[..]),
            take_till(|b: u8| b == b':'),
            tag(&b":"[..]),
            take_till(|b: u8| b == b':'),
            eof,
        ),
        |(_, name, _, repeat, _)| BindingToken { name, repeat },
    )
    .parse(input)
}

/// Builds a `Document` from tokens
///
/// Holds the "current binding" and "current menu" state while tokens
/// are fed in one at a time.
pub struct DocumentBuilder<'a> {
    lookup: &'a MenuLookup,
    document: Document,
    current_menu: String,
    current_binding: Token,
    position: usize,
}

impl<'a> DocumentBuilder<'a> {
    /// Creates a builder that resolves menus through `lookup`.
    pub fn new(lookup: &'a MenuLookup) -> Self {
        Self {
            lookup,
            document: Document::new(lookup.menu_names().clone()),
            current_menu: String::new(),
            current_binding: Token::default(),
            position: 0,
        }
    }

    /// Feeds one token into the document.
    pub fn push(&mut self, token: Token) -> Result<(), ParseError> {
        self.position += 1;

        if !token.is_binding() {
            if self.current_binding.is_empty() {
                warn!("Key token [{}] appears before any binding", token);
            }
            self.document
                .menu_mut(&self.current_menu)
                .push_key(&self.current_binding, token);
            return Ok(());
        }

        let menu = {
            let (_, binding) = parse_binding_token(token.as_bytes()).map_err(|_| {
                ParseError::MalformedBinding {
                    token: token.to_string(),
                    position: self.position,
                }
            })?;

            self.lookup
                .menu_for(binding.name)
                .ok_or_else(|| ParseError::UnknownBinding {
                    name: String::from_utf8_lossy(binding.name).into_owned(),
                    token: token.to_string(),
                    position: self.position,
                })?
                .to_string()
        };

        if self.document.menu_mut(&menu).open_binding(&token) {
            debug!("New binding [{}] in menu {}", token, menu);
        } else {
            debug!("Merging repeated binding [{}] in menu {}", token, menu);
        }

        self.current_menu = menu;
        self.current_binding = token;
        Ok(())
    }

    /// Finishes building and returns the document.
    pub fn finish(self) -> Document {
        self.document
    }
}

/// Build a document from an in-memory token sequence
///
/// # Arguments
/// * `tokens` - Tokens in source order
/// * `lookup` - Binding name to menu table
///
/// # Example
/// ```ignore
/// let lookup = MenuLookup::from_pairs([("SELECT", "GENERAL")])?;
/// let document = build_document(tokenize(b"[BIND:SELECT:REPEAT_NOT][SYM:0:Enter]"), &lookup)?;
/// ```
pub fn build_document<I>(tokens: I, lookup: &MenuLookup) -> Result<Document, ParseError>
where
    I: IntoIterator<Item = Token>,
{
    let mut builder = DocumentBuilder::new(lookup);
    for token in tokens {
        builder.push(token)?;
    }
    Ok(builder.finish())
}

/// Tokenize a reader and build a document in a single pass
///
/// Read errors surface as `ParseError::IoError`.
pub fn parse_document<R: BufRead>(reader: R, lookup: &MenuLookup) -> Result<Document, ParseError> {
    let mut builder = DocumentBuilder::new(lookup);
    for token in Tokenizer::new(reader) {
        builder.push(token?)?;
    }
    Ok(builder.finish())
}
