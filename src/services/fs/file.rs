use std::fmt;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::core::errors::{Error, Result};

use super::entity::{rename_entry, FsEntity};
use super::utils;

/// Handle to a regular file, which may or may not exist yet.
///
/// The stored path is absolute and normalized and never names an existing
/// directory at the time it was assigned. Dropping the handle leaves the file
/// on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct File {
    path: PathBuf,
}

impl File {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = Self::validate(path.as_ref())?;
        Ok(Self { path })
    }

    fn validate(path: &Path) -> Result<PathBuf> {
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidValue("no file path was given".into()));
        }
        let resolved = utils::resolve_path(path)?;
        if resolved.is_dir() {
            return Err(Error::IsADirectory(resolved));
        }
        Ok(resolved)
    }

    /// Name without its final extension: `backup.tar.gz` gives `backup.tar`.
    pub fn stem(&self) -> String {
        let name = self.name();
        match suffix_start(&name) {
            Some(idx) => name[..idx].to_string(),
            None => name,
        }
    }

    /// Final extension including the dot: `backup.tar.gz` gives `.gz`.
    pub fn extension(&self) -> Option<String> {
        let name = self.name();
        suffix_start(&name).map(|idx| name[idx..].to_string())
    }

    /// Every extension in order: `backup.tar.gz` gives `[".tar", ".gz"]`.
    pub fn extensions(&self) -> Vec<String> {
        let name = self.name();
        if name.ends_with('.') {
            return Vec::new();
        }
        name.trim_start_matches('.')
            .split('.')
            .skip(1)
            .map(|ext| format!(".{ext}"))
            .collect()
    }

    /// Whether the path currently refers to a regular file. Useful when
    /// something else may have replaced the file since the handle was made.
    pub fn is_file(&self) -> bool {
        self.path.is_file()
    }

    /// Renames the file within its current directory.
    pub fn rename_with(&mut self, new_name: &str, replace_existing: bool) -> Result<()> {
        let directory = self.parent();
        self.relocate(&directory, Some(new_name), replace_existing)
    }

    /// Moves the file into `directory`, optionally renaming it on the way.
    pub fn move_to(
        &mut self,
        directory: impl AsRef<Path>,
        new_name: Option<&str>,
        replace_existing: bool,
    ) -> Result<()> {
        self.relocate(directory.as_ref(), new_name, replace_existing)
    }

    fn relocate(
        &mut self,
        directory: &Path,
        new_name: Option<&str>,
        replace_existing: bool,
    ) -> Result<()> {
        let destination = rename_entry(&self.path, directory, new_name, replace_existing)?;
        self.set_path(&destination)
    }

    /// Opens the file read-only.
    pub fn open(&self) -> Result<fs::File> {
        Ok(fs::File::open(&self.path)?)
    }

    /// Opens the file with caller-supplied options. The handle closes on drop.
    pub fn open_with(&self, options: &OpenOptions) -> Result<fs::File> {
        Ok(options.open(&self.path)?)
    }
}

impl FsEntity for File {
    fn path(&self) -> &Path {
        &self.path
    }

    fn set_path(&mut self, path: &Path) -> Result<()> {
        self.path = Self::validate(path)?;
        Ok(())
    }

    fn size(&self) -> Result<u64> {
        Ok(fs::metadata(&self.path)?.len())
    }

    fn rename(&mut self, new_name: &str) -> Result<()> {
        self.rename_with(new_name, false)
    }

    fn remove(&self) -> Result<()> {
        fs::remove_file(&self.path)?;
        tracing::debug!(path = %self.path.display(), "removed file");
        Ok(())
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

// A dot only starts a suffix when it is neither the first nor the last byte.
fn suffix_start(name: &str) -> Option<usize> {
    let idx = name.rfind('.')?;
    (idx > 0 && idx < name.len() - 1).then_some(idx)
}
