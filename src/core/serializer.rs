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

//! src/core/serializer.rs
//!
//! Deterministic interface file writer
//!
//! Output layout, one section per menu:
//! ```text
//! \r\n
//! # GENERAL\r\n
//! [BIND:CURSOR_DOWN:REPEAT_FAST]\r\n
//! [SYM:0:Down]\r\n
//! ...
//! ```
//! Keys that precede every binding are written first, with no binding
//! line. Menus named in the priority list come next, in list order. All other
//! menus in the document follow in byte order. Bindings within a menu are
//! sorted by byte order; key tokens keep their source order.

use std::io::{self, Write};

use crate::core::types::{Document, Menu};

/// UTF-8 byte-order mark expected at the start of interface files.
pub const BYTE_ORDER_MARK: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Priority menus used when no other order is configured.
pub const DEFAULT_PRIORITY: &[&str] = &[
    "GENERAL",
    "FORTRESS_HOTKEYS",
    "DESIGNATE",
    "BUILD_HOTKEY",
    "BUILD_HOTKEY_CONSTRUCTION",
];

const LINE_END: &[u8] = b"\r\n";

/// Menu holding key tokens read before the first binding token.
const UNOWNED_MENU: &str = "";

fn write_menu<W: Write>(writer: &mut W, name: &str, menu: &Menu) -> io::Result<()> {
    writer.write_all(LINE_END)?;
    writer.write_all(b"# ")?;
    writer.write_all(name.as_bytes())?;
    writer.write_all(LINE_END)?;

    for (binding, keys) in menu.bindings() {
        // Keys read before any binding have no binding line to write
        if !binding.is_empty() {
            write_token(writer, binding.as_bytes())?;
        }
        for key in keys {
            write_token(writer, key.as_bytes())?;
        }
    }

    Ok(())
}

fn write_token<W: Write>(writer: &mut W, token: &[u8]) -> io::Result<()> {
    writer.write_all(b"[")?;
    writer.write_all(token)?;
    writer.write_all(b"]")?;
    writer.write_all(LINE_END)
}

/// Write a document to `writer` in canonical order
///
/// Keys read before any binding (the `""` menu) are always written
/// first, ahead of every binding line, so they cannot attach to a real
/// binding when the output is read back. Priority menus may repeat and
/// may name menus with no bindings; such menus produce a header-only
/// section. The byte-order mark is not written here.
pub fn write_document<W, S>(writer: &mut W, document: &Document, priority: &[S]) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    if let Some(unowned) = document.menu(UNOWNED_MENU) {
        write_menu(writer, UNOWNED_MENU, unowned)?;
    }

    for name in priority {
        let name = name.as_ref();
        if name == UNOWNED_MENU {
            continue;
        }
        write_menu(writer, name, document.menu_or_empty(name))?;
    }

    for (name, menu) in document.menus() {
        if name == UNOWNED_MENU || priority.iter().any(|p| p.as_ref() == name) {
            continue;
        }
        write_menu(writer, name, menu)?;
    }

    Ok(())
}

/// Render a document to bytes in canonical order
///
/// # Example
/// ```
/// use interface_organizer::core::{lookup::MenuLookup, parser::build_document};
/// use interface_organizer::core::serializer::serialize;
/// use interface_organizer::core::tokenizer::tokenize;
///
/// let lookup = MenuLookup::from_pairs([("SELECT", "GENERAL")])?;
/// let document = build_document(tokenize(b"[BIND:SELECT:REPEAT_NOT][SYM:0:Enter]"), &lookup)?;
///
/// let output = serialize(&document, &["GENERAL"]);
/// assert_eq!(output, b"\r\n# GENERAL\r\n[BIND:SELECT:REPEAT_NOT]\r\n[SYM:0:Enter]\r\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn serialize<S: AsRef<str>>(document: &Document, priority: &[S]) -> Vec<u8> {
    let mut output = Vec::new();
    // Writing into a Vec cannot fail
    let written = write_document(&mut output, document, priority);
    debug_assert!(written.is_ok());
    output
}
