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

//! Document builder tests
//!
//! Tests for turning token streams into documents:
//! - Binding token parsing
//! - Menu routing through the lookup table
//! - Merging of repeated binding tokens
//! - Key tokens with no owning binding
//! - Fatal errors for malformed or unknown bindings

use super::{document_from, test_lookup};
use crate::core::{
    parser::*,
    tokenizer::tokenize,
    types::Token,
};

#[test]
fn test_parse_binding_token() {
    let (rest, binding) = parse_binding_token(b"BIND:SELECT:REPEAT_NOT").unwrap();
    assert!(rest.is_empty());
    assert_eq!(binding.name, b"SELECT");
    assert_eq!(binding.repeat, b"REPEAT_NOT");
}

#[test]
fn test_parse_binding_token_rejects_wrong_field_count() {
    assert!(parse_binding_token(b"BIND:SELECT").is_err());
    assert!(parse_binding_token(b"BIND:SELECT:REPEAT_NOT:EXTRA").is_err());
    assert!(parse_binding_token(b"KEY:a").is_err());
}

#[test]
fn test_bindings_routed_to_menus() {
    let document = document_from(
        b"[BIND:SELECT:REPEAT_NOT][SYM:0:Enter][BIND:DESIGNATE_DIG:REPEAT_NOT][KEY:d]",
    );

    let general = document.menu("GENERAL").unwrap();
    assert_eq!(
        general.keys(&Token::from("BIND:SELECT:REPEAT_NOT")),
        Some(&[Token::from("SYM:0:Enter")][..])
    );

    let designate = document.menu("DESIGNATE").unwrap();
    assert_eq!(
        designate.keys(&Token::from("BIND:DESIGNATE_DIG:REPEAT_NOT")),
        Some(&[Token::from("KEY:d")][..])
    );
    assert_eq!(document.total_bindings(), 2);
}

#[test]
fn test_repeated_binding_is_merged_in_order() {
    let document = document_from(
        b"[BIND:SELECT:REPEAT_NOT][KEY:a][KEY:b]\
          [BIND:DESELECT:REPEAT_NOT][KEY:x]\
          [BIND:SELECT:REPEAT_NOT][KEY:c]",
    );

    let general = document.menu("GENERAL").unwrap();
    assert_eq!(general.len(), 2);
    assert_eq!(
        general.keys(&Token::from("BIND:SELECT:REPEAT_NOT")),
        Some(&[Token::from("KEY:a"), Token::from("KEY:b"), Token::from("KEY:c")][..])
    );
}

#[test]
fn test_repeat_flag_is_part_of_identity() {
    let document = document_from(b"[BIND:SELECT:REPEAT_NOT][KEY:a][BIND:SELECT:REPEAT_FAST][KEY:b]");
    assert_eq!(document.menu("GENERAL").unwrap().len(), 2);
}

#[test]
fn test_binding_without_keys_is_kept() {
    let document = document_from(b"[BIND:SELECT:REPEAT_NOT]");
    assert_eq!(
        document.menu("GENERAL").unwrap().keys(&Token::from("BIND:SELECT:REPEAT_NOT")),
        Some(&[] as &[Token])
    );
}

#[test]
fn test_keys_before_first_binding_go_to_sentinel() {
    let document = document_from(b"[KEY:z][BIND:SELECT:REPEAT_NOT][KEY:a]");

    let sentinel = document.menu("").unwrap();
    assert_eq!(sentinel.keys(&Token::default()), Some(&[Token::from("KEY:z")][..]));
    assert_eq!(document.menu("GENERAL").unwrap().total_keys(), 1);
}

#[test]
fn test_known_menus_include_empty_ones() {
    let document = document_from(b"[BIND:SELECT:REPEAT_NOT][KEY:a]");
    let known: Vec<&str> = document.known_menus().collect();
    assert_eq!(known, vec!["DESIGNATE", "GENERAL", "STOCKPILE"]);
    assert!(document.menu("STOCKPILE").is_none());
}

#[test]
fn test_unknown_binding_is_fatal() {
    let result = build_document(tokenize(b"[BIND:SELECT:NONE][BIND:MYSTERY:NONE]"), &test_lookup());

    match result {
        Err(ParseError::UnknownBinding { name, position, .. }) => {
            assert_eq!(name, "MYSTERY");
            assert_eq!(position, 2);
        }
        other => panic!("Expected UnknownBinding error, got: {:?}", other),
    }
}

#[test]
fn test_malformed_binding_is_fatal() {
    let result = build_document(tokenize(b"[BIND:SELECT]"), &test_lookup());
    assert!(matches!(result, Err(ParseError::MalformedBinding { position: 1, .. })));
}

#[test]
fn test_parse_document_from_reader() {
    let input: &[u8] = b"\xEF\xBB\xBF\r\n# GENERAL\r\n[BIND:SELECT:REPEAT_NOT]\r\n[SYM:0:Enter]\r\n";
    let document = parse_document(input, &test_lookup()).unwrap();
    assert_eq!(document.total_bindings(), 1);
}

#[test]
fn test_error_message_names_binding() {
    let err = build_document(tokenize(b"[BIND:MYSTERY:NONE]"), &test_lookup()).unwrap_err();
    assert!(err.to_string().contains("MYSTERY"));
}
