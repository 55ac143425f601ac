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

//! Interface Organizer
//!
//! Sorts bracket-token interface files (key bindings for a menu-driven
//! application) by menu, and reports bindings in the same menu that are
//! bound to equivalent keys.
//!
//! # Features
//!
//! - **Deterministic output:** Menus and bindings in byte order, ready to diff
//! - **Conflict Detection:** Shift-insensitive key comparison per menu
//! - **Intentional overlaps:** Built-in and configurable exemption rules
//! - **Safe writes:** Atomic output with optional timestamped backup
//!
//! # Architecture
//!
//! - **`core`:** Business logic (tokenizer, document builder, canonicaliser,
//!   conflict detection, serialiser)
//! - **`config`:** File operations (menu map loading, output writing, backups)
//!
//! # Examples
//!
//! ## Organising a file
//!
//! ```no_run
//! use interface_organizer::config::OrganizerConfig;
//! use interface_organizer::core::{parse_document, serialize};
//! use std::{fs::File, io::BufReader, path::Path};
//!
//! let config = OrganizerConfig::load(Path::new("menus.toml"))?;
//! let lookup = config.lookup()?;
//!
//! let reader = BufReader::new(File::open("interface.txt")?);
//! let document = parse_document(reader, &lookup)?;
//!
//! let output = serialize(&document, &config.priority);
//! println!("{}", String::from_utf8_lossy(&output));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Detecting conflicts
//!
//! ```no_run
//! use interface_organizer::core::{ConflictDetector, MenuLookup, build_document};
//! use interface_organizer::core::tokenizer::tokenize;
//!
//! let lookup = MenuLookup::from_pairs([("GENERAL", "GENERAL"), ("DESIGNATE", "DESIGNATE")])?;
//! let document = build_document(tokenize(b"[BIND:GENERAL:NONE][KEY:a]"), &lookup)?;
//!
//! let detector = ConflictDetector::new();
//! for (menu, conflicts) in detector.find_document_conflicts(&document) {
//!     println!("{} conflicts in menu {}:", conflicts.len(), menu);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod core;

// Re-export commonly used types for convenience
pub use crate::core::{Conflict, ConflictDetector, Document, Menu, MenuLookup, Token};
