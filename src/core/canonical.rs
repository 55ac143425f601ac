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

//! src/core/canonical.rs
//!
//! Key token canonicalisation
//!
//! Interface files write the same physical key in two ways: `KEY:a` and
//! `KEY:A` both sit on the `a` key, one with shift held. The host rarely
//! gates a binding on shift state, so for conflict checking both spellings
//! collapse onto one class, `SYM:0:<unshifted>`, using the QWERTY shift
//! pairs below. Every other token is compared literally, including
//! `SYM:1:<c>`, so `KEY:A` and `SYM:1:a` are not equivalent.

use std::borrow::Cow;

const KEY_PREFIX: &[u8] = b"KEY:";
const SYM_PREFIX: &[u8] = b"SYM:0:";

/// Unshifted QWERTY symbols, position-for-position with `SHIFTED`.
pub const UNSHIFTED: &[u8; 47] = b"`1234567890-=qwertyuiop[]\\asdfghjkl;'zxcvbnm,./";

/// Shifted QWERTY symbols, position-for-position with `UNSHIFTED`.
pub const SHIFTED: &[u8; 47] = b"~!@#$%^&*()_+QWERTYUIOP{}|ASDFGHJKL:\"ZXCVBNM<>?";

/// Map a key token onto its equivalence class
///
/// Only tokens of the exact form `KEY:<one byte>` are rewritten:
/// - unshifted symbol `u` becomes `SYM:0:u`
/// - shifted symbol `s` becomes `SYM:0:u`, where `u` is its unshifted pair
///
/// Anything else, including `SYM:` tokens and multi-byte `KEY:` payloads,
/// is returned unchanged.
///
/// # Example
/// ```
/// use interface_organizer::core::canonical::canonicalize;
///
/// assert_eq!(&*canonicalize(b"KEY:A"), b"SYM:0:a");
/// assert_eq!(&*canonicalize(b"MOUSE:1"), b"MOUSE:1");
/// ```
pub fn canonicalize(token: &[u8]) -> Cow<'_, [u8]> {
    let symbol = match token.strip_prefix(KEY_PREFIX) {
        Some(&[symbol]) => symbol,
        _ => return Cow::Borrowed(token),
    };

    let unshifted = if UNSHIFTED.contains(&symbol) {
        symbol
    } else {
        match SHIFTED.iter().position(|s| *s == symbol) {
            Some(index) => UNSHIFTED[index],
            None => return Cow::Borrowed(token),
        }
    };

    Cow::Owned([SYM_PREFIX, &[unshifted]].concat())
}

/// True when two key tokens share a canonical form
pub fn are_equivalent(first: &[u8], second: &[u8]) -> bool {
    canonicalize(first) == canonicalize(second)
}
