//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Tokenizer edge cases
//! - Document building and menu lookup
//! - Conflict detection and overlap rules
//! - Serialisation order and round trips

#[cfg(test)]
mod parser_tests;

use crate::core::{build_document, tokenizer::tokenize, Document, MenuLookup};

/// Lookup table shared by the test suites
pub(crate) fn test_lookup() -> MenuLookup {
    MenuLookup::from_pairs([
        ("GENERAL", "GENERAL"),
        ("DESIGNATE", "DESIGNATE"),
        ("SELECT", "GENERAL"),
        ("DESELECT", "GENERAL"),
        ("LEAVESCREEN", "GENERAL"),
        ("OPTIONS", "GENERAL"),
        ("SEC_SELECT", "GENERAL"),
        ("SELECT_ALL", "GENERAL"),
        ("STANDARDSCROLL_UP", "GENERAL"),
        ("CURSOR_UP", "GENERAL"),
        ("DESIGNATE_DIG", "DESIGNATE"),
        ("DESIGNATE_CHOP", "DESIGNATE"),
        ("STOCKPILE_FOOD", "STOCKPILE"),
    ])
    .unwrap()
}

/// Helper to build a document straight from source bytes
pub(crate) fn document_from(input: &[u8]) -> Document {
    build_document(tokenize(input), &test_lookup()).unwrap()
}
