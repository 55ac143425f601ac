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

//! Atomic output writing with automatic backups
//!
//! Organised output always starts with a UTF-8 byte-order mark, which
//! the host application expects. Writes go through a temp file and an
//! atomic rename, so the target is never left half-written.

use atomic_write_file::AtomicWriteFile;
use chrono::Local;
use std::{fs, io::Write, path::{Path, PathBuf}};
use tracing::{info, warn};

use crate::config::ConfigError;
use crate::core::BYTE_ORDER_MARK;

/// Atomically writes a byte-order mark followed by `content` to `path`.
///
/// # Errors
///
/// Returns `ConfigError::WriteFailed` if the temp file cannot be created,
/// written, or renamed over the target. The target is left untouched.
///
/// # Example
///
/// ```no_run
/// use interface_organizer::config::write_organized;
/// use std::path::Path;
///
/// write_organized(Path::new("interface.sorted.txt"), b"\r\n# GENERAL\r\n")?;
/// # Ok::<(), interface_organizer::config::ConfigError>(())
/// ```
pub fn write_organized(path: &Path, content: &[u8]) -> Result<(), ConfigError> {
    // Open file for atomic writing
    let mut file = AtomicWriteFile::options().open(path).map_err(|e| {
        ConfigError::WriteFailed(format!("Failed to open {} for atomic write: {}", path.display(), e))
    })?;

    file.write_all(&BYTE_ORDER_MARK)
        .and_then(|_| file.write_all(content))
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to write content: {}", e)))?;

    // Commit atomically
    file.commit().map_err(|e| {
        ConfigError::WriteFailed(format!("Failed to commit atomic write: {}", e))
    })?;

    info!("Wrote {} bytes to {}", content.len() + BYTE_ORDER_MARK.len(), path.display());
    Ok(())
}

/// An existing interface file that may be replaced in place.
///
/// Replacing always snapshots the current file into a `backups/`
/// directory next to it first.
#[derive(Debug)]
pub struct InterfaceFile {
    path: PathBuf,
    backup_dir: PathBuf,
}

impl InterfaceFile {
    /// Opens an interface file for in-place replacement.
    ///
    /// Validates that the file exists and creates the backup directory if
    /// needed. A symlinked file is allowed but logged.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist.
    /// Returns `ConfigError::BackupDirNotWritable` if the backup directory
    /// cannot be created.
    pub fn new(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }

        if path.read_link().is_ok() {
            warn!("Interface file is a symlink: {}", path.display());
        }

        // e.g., data/init/interface.txt → data/init/backups/
        let backup_dir = path
            .parent()
            .ok_or_else(|| {
                ConfigError::BackupDirNotWritable(PathBuf::from(
                    "Interface file has no parent directory",
                ))
            })?
            .join("backups");

        if !backup_dir.exists() {
            fs::create_dir_all(&backup_dir)
                .map_err(|_| ConfigError::BackupDirNotWritable(backup_dir.clone()))?;
        }

        if backup_dir.metadata()?.permissions().readonly() {
            return Err(ConfigError::BackupDirNotWritable(backup_dir));
        }

        Ok(Self { path, backup_dir })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Copies the current file to `backups/<name>.<YYYY-MM-DD_HHMMSS>`.
    ///
    /// The copy is byte-exact; interface files are not guaranteed UTF-8.
    pub fn create_timestamped_backup(&self) -> Result<PathBuf, ConfigError> {
        let content = fs::read(&self.path)?;

        let timestamp = Local::now().format("%Y-%m-%d_%H%M%S");

        let original_name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ConfigError::BackupFailed(format!(
                    "Interface path has no usable file name: {}",
                    self.path.display()
                ))
            })?;

        let backup_path = self
            .backup_dir
            .join(format!("{}.{}", original_name, timestamp));

        fs::write(&backup_path, &content)
            .map_err(|e| ConfigError::BackupFailed(format!("{}: {}", backup_path.display(), e)))?;

        info!("Backed up {} to {}", self.path.display(), backup_path.display());
        Ok(backup_path)
    }

    /// Backs up the file, then atomically overwrites it with organised content.
    ///
    /// Returns the backup path. If the write fails, the original file is
    /// untouched and the backup is still available.
    pub fn replace(&self, content: &[u8]) -> Result<PathBuf, ConfigError> {
        let backup_path = self.create_timestamped_backup()?;
        write_organized(&self.path, content)?;
        Ok(backup_path)
    }
}
