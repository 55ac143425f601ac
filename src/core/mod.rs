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

//! src/core/mod.rs
//!
//! Core business logic module
//!
//! This module contains the data structures and algorithms for
//! organising interface files:
//! - Type definitions for tokens, menus and documents
//! - The byte-level bracket tokenizer
//! - Document building with menu lookup
//! - Key canonicalisation and conflict detection
//! - Deterministic serialisation
//!
//! Nothing here opens files. Readers and writers are supplied by the
//! caller, so every piece can be tested against in-memory buffers.

pub mod canonical;
pub mod conflict;
pub mod lookup;
pub mod parser;
pub mod serializer;
pub mod tokenizer;
pub mod types;

pub use conflict::{write_report, ConflictDetector, MatchMode, OverlapRule};
pub use lookup::{LookupError, MenuLookup};
pub use parser::{build_document, parse_document, ParseError};
pub use serializer::{serialize, write_document, BYTE_ORDER_MARK, DEFAULT_PRIORITY};
pub use types::*;

#[cfg(test)]
mod tests;
