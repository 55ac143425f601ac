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

//! src/core/types.rs
//!
//! Core type definitions for interface file organisation
//!
//! This module defines the fundamental types used throughout the application:
//! - `Token`: Raw bytes found between a `[` and its closing `]`
//! - `BindingToken`: Borrowed view of a `BIND:<name>:<repeat>` token
//! - `Menu`: Bindings routed to one menu, each with its key tokens
//! - `Document`: Every menu built from one interface file
//! - `Conflict`: Two bindings in the same menu sharing an equivalent key
//!
//! Tokens are opaque byte strings. They are compared, hashed and sorted
//! as raw bytes so output ordering never depends on the platform locale.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Prefix that marks a token as a binding token.
pub const BIND_PREFIX: &[u8] = b"BIND:";

/// A single bracket-delimited token
///
/// Holds the content between the brackets, without the brackets
/// themselves. Ordering is plain byte ordering.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Token(Vec<u8>);

impl Token {
    /// Create a token from anything convertible into bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw token bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True for tokens that open a new binding (`BIND:...`)
    pub fn is_binding(&self) -> bool {
        self.0.starts_with(BIND_PREFIX)
    }

    /// Middle field of a binding token, or an empty slice for anything else
    ///
    /// # Example
    /// ```ignore
    /// let token = Token::from("BIND:SELECT:REPEAT_NOT");
    /// assert_eq!(token.binding_name(), b"SELECT");
    /// ```
    pub fn binding_name(&self) -> &[u8] {
        let mut fields = self.0.split(|b| *b == b':');
        match (fields.next(), fields.next()) {
            (Some(b"BIND"), Some(name)) => name,
            _ => &[],
        }
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<&[u8]> for Token {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl From<Vec<u8>> for Token {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl AsRef<[u8]> for Token {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// The three fields of a `BIND:<name>:<repeat>` token
///
/// Borrowed from the token it was parsed out of.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BindingToken<'a> {
    /// Binding name, used to look up the owning menu
    pub name: &'a [u8],

    /// Repeat flag (e.g. `REPEAT_NOT`, `REPEAT_SLOW`)
    pub repeat: &'a [u8],
}

/// Bindings routed to a single menu
///
/// Keys are binding tokens (verbatim, including `BIND:`), values are
/// key tokens in the order they were first read. A `BTreeMap` keeps
/// bindings sorted by byte order for serialisation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Menu {
    bindings: BTreeMap<Token, Vec<Token>>,
}

/// Shared empty menu handed out for menus with no bindings.
static EMPTY_MENU: Menu = Menu {
    bindings: BTreeMap::new(),
};

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure an entry exists for a binding, returning true if it was new
    pub fn open_binding(&mut self, binding: &Token) -> bool {
        if self.bindings.contains_key(binding) {
            return false;
        }
        self.bindings.insert(binding.clone(), Vec::new());
        true
    }

    /// Append a key token to a binding, creating the binding if needed
    pub fn push_key(&mut self, binding: &Token, key: Token) {
        self.bindings.entry(binding.clone()).or_default().push(key);
    }

    /// Key tokens of one binding, in source order
    pub fn keys(&self, binding: &Token) -> Option<&[Token]> {
        self.bindings.get(binding).map(Vec::as_slice)
    }

    /// All bindings in byte order, with their key tokens
    pub fn bindings(&self) -> impl Iterator<Item = (&Token, &[Token])> {
        self.bindings.iter().map(|(b, keys)| (b, keys.as_slice()))
    }

    /// Number of bindings in this menu
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Total key tokens across every binding
    pub fn total_keys(&self) -> usize {
        self.bindings.values().map(Vec::len).sum()
    }
}

/// A parsed interface file, grouped by menu
///
/// Built once by the document builder and read-only afterwards.
/// `known_menus` is the full menu set of the lookup table, so callers
/// can visit menus that received no bindings at all.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Document {
    pub(crate) menus: BTreeMap<String, Menu>,
    pub(crate) known_menus: BTreeSet<String>,
}

impl Document {
    /// Create an empty document for the given set of known menu names
    pub fn new(known_menus: BTreeSet<String>) -> Self {
        Self {
            menus: BTreeMap::new(),
            known_menus,
        }
    }

    /// Look up a menu that received at least one binding or key
    pub fn menu(&self, name: &str) -> Option<&Menu> {
        self.menus.get(name)
    }

    /// Look up a menu, treating a missing one as empty
    pub fn menu_or_empty(&self, name: &str) -> &Menu {
        self.menus.get(name).unwrap_or(&EMPTY_MENU)
    }

    /// Menus present in the document, in byte order
    pub fn menus(&self) -> impl Iterator<Item = (&str, &Menu)> {
        self.menus.iter().map(|(name, menu)| (name.as_str(), menu))
    }

    /// Every menu name the lookup table knows about, in byte order
    pub fn known_menus(&self) -> impl Iterator<Item = &str> {
        self.known_menus.iter().map(String::as_str)
    }

    /// Total bindings across all menus
    pub fn total_bindings(&self) -> usize {
        self.menus.values().map(Menu::len).sum()
    }

    pub(crate) fn menu_mut(&mut self, name: &str) -> &mut Menu {
        self.menus.entry(name.to_string()).or_default()
    }
}

/// Two bindings in one menu bound to equivalent keys
///
/// `first_binding` always sorts before `second_binding`. Derived `Ord`
/// gives conflict reports a stable order.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Conflict {
    pub first_binding: Token,
    pub first_key: Token,
    pub second_binding: Token,
    pub second_key: Token,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][{}] conflicts with [{}][{}]",
            self.first_binding, self.first_key, self.second_binding, self.second_key
        )
    }
}
