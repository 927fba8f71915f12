use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::errors::{Error, Result};
use crate::models::{EntryInfo, EntryKind};

use super::entity::{entry_info, os_str_to_string, rename_entry, FsEntity};
use super::utils;

/// Handle to a directory, which may or may not exist yet.
///
/// The stored path is absolute and normalized and never names an existing
/// file at the time it was assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Directory {
    path: PathBuf,
}

impl Directory {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = Self::validate(path.as_ref())?;
        Ok(Self { path })
    }

    fn validate(path: &Path) -> Result<PathBuf> {
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidValue("no directory path was given".into()));
        }
        let resolved = utils::resolve_path(path)?;
        if resolved.is_file() {
            return Err(Error::NotADirectory(resolved));
        }
        Ok(resolved)
    }

    pub fn is_dir(&self) -> bool {
        self.path.is_dir()
    }

    /// Removes the directory. With `empty_only` the call fails on a populated
    /// directory; otherwise the whole tree goes.
    pub fn remove_with(&self, empty_only: bool) -> Result<()> {
        if empty_only {
            fs::remove_dir(&self.path)?;
        } else {
            fs::remove_dir_all(&self.path)?;
        }
        tracing::debug!(
            path = %self.path.display(),
            recursive = !empty_only,
            "removed directory"
        );
        Ok(())
    }

    /// Immediate children sorted case-insensitively by name. A child whose
    /// metadata cannot be read is listed as [`EntryKind::Unknown`].
    pub fn entries(&self) -> Result<Vec<EntryInfo>> {
        let mut children: Vec<(String, PathBuf)> = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            children.push((os_str_to_string(entry.file_name()), entry.path()));
        }
        children.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));

        let entries = children
            .into_iter()
            .map(|(name, path)| {
                entry_info(&path).unwrap_or_else(|_| EntryInfo {
                    name,
                    path: path.to_string_lossy().into_owned(),
                    kind: EntryKind::Unknown,
                    size: 0,
                })
            })
            .collect();
        Ok(entries)
    }
}

impl FsEntity for Directory {
    fn path(&self) -> &Path {
        &self.path
    }

    fn set_path(&mut self, path: &Path) -> Result<()> {
        self.path = Self::validate(path)?;
        Ok(())
    }

    /// Total bytes of the regular files below the directory. Symlinks are not
    /// followed.
    fn size(&self) -> Result<u64> {
        let mut total = 0u64;
        for entry in WalkDir::new(&self.path) {
            let entry = entry.map_err(io::Error::from)?;
            if entry.file_type().is_file() {
                total += entry.metadata().map_err(io::Error::from)?.len();
            }
        }
        Ok(total)
    }

    /// Directory contents are never merged, so an occupied destination always
    /// fails.
    fn rename(&mut self, new_name: &str) -> Result<()> {
        let directory = self.parent();
        let destination = rename_entry(&self.path, &directory, Some(new_name), false)?;
        self.set_path(&destination)
    }

    fn remove(&self) -> Result<()> {
        self.remove_with(true)
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
