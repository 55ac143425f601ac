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

//! Menu map loading and output file management.
//!
//! The menu map is the external table that routes binding names to
//! menus. It lives in a TOML file:
//!
//! ```toml
//! priority = ["GENERAL", "DESIGNATE"]
//!
//! [menus]
//! GENERAL = ["SELECT", "LEAVESCREEN", "OPTIONS"]
//! DESIGNATE = ["DESIGNATE_DIG"]
//!
//! [[overlaps]]
//! first = "ZOOM"
//! second = "CURSOR"
//! mode = "contains"
//! ```
//!
//! - **`priority`**: menus written first, in this order (optional)
//! - **`menus`**: binding names per menu; each name may belong to one menu
//! - **`overlaps`**: extra binding pairs allowed to share keys (optional)
//!
//! Output files are written atomically with a leading byte-order mark,
//! see [`writer`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::{ConflictDetector, MenuLookup, OverlapRule, DEFAULT_PRIORITY};

mod error;
pub mod writer;

pub use error::ConfigError;
pub use writer::{write_organized, InterfaceFile};

/// Default menu map location, before tilde expansion.
pub const DEFAULT_MENU_MAP: &str = "~/.config/interface-organizer/menus.toml";

fn default_priority() -> Vec<String> {
    DEFAULT_PRIORITY.iter().map(|m| m.to_string()).collect()
}

/// Contents of a menu map file.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OrganizerConfig {
    /// Menus serialised first, in order.
    #[serde(default = "default_priority")]
    pub priority: Vec<String>,

    /// Binding names per menu.
    #[serde(default)]
    pub menus: BTreeMap<String, Vec<String>>,

    /// Extra intentional overlaps, added after the built-in ones.
    #[serde(default)]
    pub overlaps: Vec<OverlapRule>,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            priority: default_priority(),
            menus: BTreeMap::new(),
            overlaps: Vec::new(),
        }
    }
}

impl OrganizerConfig {
    /// Loads a menu map from disk.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist and
    /// `ConfigError::InvalidFormat` if it isn't a valid menu map.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use interface_organizer::config::OrganizerConfig;
    /// use std::path::Path;
    ///
    /// let config = OrganizerConfig::load(Path::new("menus.toml"))?;
    /// println!("{} menus", config.menus.len());
    /// # Ok::<(), interface_organizer::config::ConfigError>(())
    /// ```
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content).map_err(|e| ConfigError::InvalidFormat {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        debug!(
            "Loaded menu map {} with {} menus",
            path.display(),
            config.menus.len()
        );
        Ok(config)
    }

    /// Parses a menu map from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Builds the binding name → menu lookup table.
    ///
    /// Every menu is registered, including menus with no binding names.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidLookup` if a binding name is listed
    /// under two different menus, and `ConfigError::InvalidMenuName` if a
    /// menu name contains a bracket.
    pub fn lookup(&self) -> Result<MenuLookup, ConfigError> {
        let mut lookup = MenuLookup::new();
        for (menu, bindings) in &self.menus {
            if menu.contains(['[', ']']) {
                return Err(ConfigError::InvalidMenuName(menu.clone()));
            }
            lookup.add_menu(menu);
            for binding in bindings {
                lookup.insert(binding, menu)?;
            }
        }
        Ok(lookup)
    }

    /// Builds a conflict detector with the built-in and configured overlaps.
    pub fn detector(&self) -> ConflictDetector {
        self.overlaps
            .iter()
            .cloned()
            .fold(ConflictDetector::new(), ConflictDetector::with_rule)
    }
}

/// Expands `~` and environment variables in a user-supplied path.
pub fn expand_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let raw = path
        .to_str()
        .ok_or_else(|| ConfigError::InvalidPath(path.display().to_string()))?;
    let expanded =
        shellexpand::full(raw).map_err(|e| ConfigError::InvalidPath(e.to_string()))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

#[cfg(test)]
mod tests;
