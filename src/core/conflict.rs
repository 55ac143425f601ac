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

//! Key conflict detection within a menu
//!
//! Two bindings in the same menu conflict when any key of one is
//! equivalent (see `canonical`) to any key of the other. Some bindings
//! overlap on purpose, e.g. screen scrolling and cursor movement share
//! the arrow keys; those pairs are listed as overlap rules and never
//! reported.
//!
//! # Performance
//! Every unordered binding pair is compared key by key:
//! O(bindings² × keys²) per menu. Menus hold tens to low hundreds of
//! bindings, so this completes well under a millisecond.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::{self, Write};

use crate::core::canonical::canonicalize;
use crate::core::types::{Conflict, Document, Menu, Token};

/// How an overlap rule compares against a binding name.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Name must equal the pattern
    Exact,
    /// Name must contain the pattern
    Contains,
}

/// A pair of binding names that may share keys without conflicting
///
/// Rules are unordered: `first`/`second` match the two bindings in
/// either order.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OverlapRule {
    pub first: String,
    pub second: String,
    pub mode: MatchMode,
}

/// Built-in intentional overlaps: (first, second, mode).
const BUILTIN_OVERLAPS: [(&str, &str, MatchMode); 3] = [
    ("STANDARDSCROLL", "CURSOR", MatchMode::Contains),
    ("LEAVESCREEN", "OPTIONS", MatchMode::Exact),
    ("SEC_SELECT", "SELECT_ALL", MatchMode::Exact),
];

impl OverlapRule {
    pub fn new(first: &str, second: &str, mode: MatchMode) -> Self {
        Self {
            first: first.to_string(),
            second: second.to_string(),
            mode,
        }
    }

    fn matches_one(&self, pattern: &str, name: &[u8]) -> bool {
        let pattern = pattern.as_bytes();
        match self.mode {
            MatchMode::Exact => name == pattern,
            MatchMode::Contains => {
                pattern.is_empty() || name.windows(pattern.len()).any(|w| w == pattern)
            }
        }
    }

    /// True if the two binding names form this pair, in either order.
    pub fn matches(&self, first_name: &[u8], second_name: &[u8]) -> bool {
        (self.matches_one(&self.first, first_name) && self.matches_one(&self.second, second_name))
            || (self.matches_one(&self.first, second_name)
                && self.matches_one(&self.second, first_name))
    }
}

/// Finds bindings that share equivalent keys within a menu.
///
/// Holds the list of intentional overlaps. `new()` starts with the
/// built-in rules; `with_rule` appends more.
#[derive(Clone, Debug)]
pub struct ConflictDetector {
    overlaps: Vec<OverlapRule>,
}

impl ConflictDetector {
    /// Creates a detector with the built-in overlap rules.
    pub fn new() -> Self {
        Self {
            overlaps: BUILTIN_OVERLAPS
                .iter()
                .map(|(first, second, mode)| OverlapRule::new(first, second, *mode))
                .collect(),
        }
    }

    /// Adds an extra intentional overlap.
    pub fn with_rule(mut self, rule: OverlapRule) -> Self {
        self.overlaps.push(rule);
        self
    }

    /// Current overlap rules, built-in ones first.
    pub fn overlaps(&self) -> &[OverlapRule] {
        &self.overlaps
    }

    /// True if the pair of binding tokens is exempt from conflict checks.
    pub fn is_intended_overlap(&self, first: &Token, second: &Token) -> bool {
        let (first_name, second_name) = (first.binding_name(), second.binding_name());
        self.overlaps
            .iter()
            .any(|rule| rule.matches(first_name, second_name))
    }

    /// Finds all conflicts in one menu.
    ///
    /// Each unordered pair of distinct bindings is visited once, with the
    /// byte-order-smaller binding first. The result set deduplicates
    /// repeated `(binding, key, binding, key)` tuples.
    pub fn find_conflicts(&self, menu: &Menu) -> BTreeSet<Conflict> {
        let bindings: Vec<(&Token, Vec<(&Token, Vec<u8>)>)> = menu
            .bindings()
            .map(|(binding, keys)| {
                let canonical = keys
                    .iter()
                    .map(|key| (key, canonicalize(key.as_bytes()).into_owned()))
                    .collect();
                (binding, canonical)
            })
            .collect();

        let mut conflicts = BTreeSet::new();

        for (i, (first_binding, first_keys)) in bindings.iter().enumerate() {
            for (second_binding, second_keys) in &bindings[i + 1..] {
                if self.is_intended_overlap(first_binding, second_binding) {
                    continue;
                }

                for (first_key, first_class) in first_keys {
                    for (second_key, second_class) in second_keys {
                        if first_class == second_class {
                            conflicts.insert(Conflict {
                                first_binding: (*first_binding).clone(),
                                first_key: (*first_key).clone(),
                                second_binding: (*second_binding).clone(),
                                second_key: (*second_key).clone(),
                            });
                        }
                    }
                }
            }
        }

        conflicts
    }

    /// Finds conflicts in every known menu of a document.
    ///
    /// Menus come back in byte order; menus with no conflicts are left out.
    /// A known menu with no bindings counts as empty.
    pub fn find_document_conflicts<'d>(
        &self,
        document: &'d Document,
    ) -> Vec<(&'d str, BTreeSet<Conflict>)> {
        document
            .known_menus()
            .map(|name| (name, self.find_conflicts(document.menu_or_empty(name))))
            .filter(|(_, conflicts)| !conflicts.is_empty())
            .collect()
    }
}

/// Write a human-readable conflict report
///
/// Format, per menu with conflicts:
/// ```text
/// <n> conflicts in menu <name>:
/// \t[<binding>][<key>] conflicts with [<binding>][<key>]
/// ```
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &[(&str, BTreeSet<Conflict>)],
) -> io::Result<()> {
    for (menu, conflicts) in report {
        writeln!(writer, "{} conflicts in menu {}:", conflicts.len(), menu)?;
        for conflict in conflicts {
            writeln!(writer, "\t{}", conflict)?;
        }
    }
    Ok(())
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}
