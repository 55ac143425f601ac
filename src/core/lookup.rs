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

//! src/core/lookup.rs
//!
//! Binding name to menu name lookup table
//!
//! The interface file format has no notion of menus. Each binding name
//! (the middle field of `BIND:<name>:<repeat>`) is routed to a menu via
//! this externally supplied table. The core only ever reads it.

use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Errors raised while assembling a lookup table
#[derive(Debug, Error, PartialEq)]
pub enum LookupError {
    /// A binding name was assigned to two different menus
    #[error("Binding '{binding}' is assigned to both menu '{existing}' and menu '{requested}'")]
    ConflictingMenu {
        binding: String,
        existing: String,
        requested: String,
    },
}

/// Read-only map from binding name to the menu it belongs to
#[derive(Clone, Debug, Default)]
pub struct MenuLookup {
    menus_by_binding: HashMap<Vec<u8>, String>,
    menu_names: BTreeSet<String>,
}

impl MenuLookup {
    /// Creates an empty lookup table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a menu name, even if no binding routes to it yet.
    pub fn add_menu(&mut self, menu: &str) {
        self.menu_names.insert(menu.to_string());
    }

    /// Routes a binding name to a menu.
    ///
    /// Re-adding the same pair is a no-op. Routing a name that already
    /// belongs to a different menu fails, so one name never resolves
    /// to two menus.
    pub fn insert(&mut self, binding: &str, menu: &str) -> Result<(), LookupError> {
        if let Some(existing) = self.menus_by_binding.get(binding.as_bytes()) {
            if existing != menu {
                return Err(LookupError::ConflictingMenu {
                    binding: binding.to_string(),
                    existing: existing.clone(),
                    requested: menu.to_string(),
                });
            }
            return Ok(());
        }

        self.menus_by_binding
            .insert(binding.as_bytes().to_vec(), menu.to_string());
        self.add_menu(menu);
        Ok(())
    }

    /// Builds a table from `(binding name, menu name)` pairs.
    pub fn from_pairs<I, B, M>(pairs: I) -> Result<Self, LookupError>
    where
        I: IntoIterator<Item = (B, M)>,
        B: AsRef<str>,
        M: AsRef<str>,
    {
        let mut lookup = Self::new();
        for (binding, menu) in pairs {
            lookup.insert(binding.as_ref(), menu.as_ref())?;
        }
        Ok(lookup)
    }

    /// Menu for a binding name, if the table knows it
    pub fn menu_for(&self, binding_name: &[u8]) -> Option<&str> {
        self.menus_by_binding.get(binding_name).map(String::as_str)
    }

    /// Every menu name in the table
    pub fn menu_names(&self) -> &BTreeSet<String> {
        &self.menu_names
    }

    /// Number of binding names in the table
    pub fn len(&self) -> usize {
        self.menus_by_binding.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus_by_binding.is_empty()
    }
}
