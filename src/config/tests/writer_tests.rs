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

use super::super::*;
use crate::core::BYTE_ORDER_MARK;
use std::{fs, path::PathBuf, thread, time::Duration};
use tempfile::TempDir;

/// Helper: Creates a temporary interface file for testing.
fn create_interface_file(content: &[u8]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("interface.txt");
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}

#[test]
fn test_write_organized_prefixes_bom() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sorted.txt");

    write_organized(&path, b"\r\n# GENERAL\r\n").unwrap();

    let written = fs::read(&path).unwrap();
    assert_eq!(&written[..3], &BYTE_ORDER_MARK);
    assert_eq!(&written[3..], b"\r\n# GENERAL\r\n");
}

#[test]
fn test_write_organized_overwrites() {
    let (_temp_dir, path) = create_interface_file(b"old content");
    write_organized(&path, b"new").unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"\xEF\xBB\xBFnew");
}

#[test]
fn test_write_organized_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("sorted.txt");

    assert!(matches!(
        write_organized(&path, b"x"),
        Err(ConfigError::WriteFailed(_))
    ));
}

#[test]
fn test_interface_file_missing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nonexistent.txt");

    match InterfaceFile::new(path.clone()).unwrap_err() {
        ConfigError::NotFound(p) => assert_eq!(p, path),
        other => panic!("Expected NotFound error, got: {:?}", other),
    }
}

#[test]
fn test_backup_dir_creation() {
    let (_temp_dir, path) = create_interface_file(b"[BIND:SELECT:NONE]");
    let backup_dir = path.parent().unwrap().join("backups");
    assert!(!backup_dir.exists(), "Backup dir should not exist yet");

    let file = InterfaceFile::new(path).unwrap();

    assert!(backup_dir.is_dir(), "Backup dir should be created");
    assert_eq!(file.backup_dir(), backup_dir);
}

#[test]
fn test_create_timestamped_backup() {
    let original = b"\xEF\xBB\xBF[BIND:SELECT:NONE][KEY:\xE9]";
    let (_temp_dir, path) = create_interface_file(original);
    let file = InterfaceFile::new(path).unwrap();

    let backup_path = file.create_timestamped_backup().unwrap();
    assert_eq!(backup_path.parent().unwrap(), file.backup_dir());

    // "interface.txt.2025-10-10_221500" -> "2025-10-10_221500"
    let filename = backup_path.file_name().unwrap().to_str().unwrap();
    let parts: Vec<&str> = filename.split('.').collect();
    assert_eq!(parts.len(), 3, "Filename should have 3 parts: name.ext.timestamp");
    assert_eq!(parts[0], "interface");
    assert_eq!(parts[1], "txt");
    assert!(
        chrono::NaiveDateTime::parse_from_str(parts[2], "%Y-%m-%d_%H%M%S").is_ok(),
        "Timestamp should be valid chrono format: {}",
        parts[2],
    );

    // Byte-exact copy, non-UTF-8 included
    assert_eq!(fs::read(&backup_path).unwrap(), original);
}

#[test]
fn test_replace_backs_up_then_writes() {
    let (_temp_dir, path) = create_interface_file(b"[BIND:SELECT:NONE][KEY:a]");
    let file = InterfaceFile::new(path.clone()).unwrap();

    let backup = file.replace(b"\r\n# GENERAL\r\n").unwrap();

    assert_eq!(fs::read(&backup).unwrap(), b"[BIND:SELECT:NONE][KEY:a]");
    assert_eq!(fs::read(&path).unwrap(), b"\xEF\xBB\xBF\r\n# GENERAL\r\n");
}

#[test]
fn test_multiple_backups_dont_overwrite() {
    let (_temp_dir, path) = create_interface_file(b"original content");
    let file = InterfaceFile::new(path.clone()).unwrap();

    let backup1 = file.create_timestamped_backup().unwrap();

    // Wait 1 second to ensure different timestamp
    thread::sleep(Duration::from_secs(1));

    fs::write(&path, b"modified content").unwrap();
    let backup2 = file.create_timestamped_backup().unwrap();

    assert_ne!(backup1, backup2);
    assert_eq!(fs::read(&backup1).unwrap(), b"original content");
    assert_eq!(fs::read(&backup2).unwrap(), b"modified content");
}
