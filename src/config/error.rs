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

use std::path::PathBuf;
use thiserror::Error;

use crate::core::LookupError;

/// Errors that can occur while loading the menu map or writing output.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File does not exist.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Path could not be expanded (bad encoding or unknown variable).
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Menu map is not valid TOML or has the wrong shape.
    #[error("Invalid menu map {path}: {message}")]
    InvalidFormat { path: PathBuf, message: String },

    /// Menu name would break the `# <name>` section header.
    #[error("Invalid menu name '{0}': menu names may not contain '[' or ']'")]
    InvalidMenuName(String),

    /// Menu map routes one binding name to two menus.
    #[error("Invalid menu map: {0}")]
    InvalidLookup(#[from] LookupError),

    /// Backup directory cannot be created or written to.
    #[error("Backup directory not writable: {0}")]
    BackupDirNotWritable(PathBuf),

    /// Failed to create backup file.
    #[error("Failed to create backup: {0}")]
    BackupFailed(String),

    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),

    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
