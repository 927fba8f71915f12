use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::errors::{Error, Result};
use crate::models::{EntryInfo, EntryKind, GroupRecord, UserRecord};

use super::ownership::{self, GroupSpec, UserSpec};
use super::utils;

/// Operations shared by [`File`](super::File) and [`Directory`](super::Directory).
///
/// Every derived value is read from the live filesystem on each call; nothing
/// is cached on the handle.
pub trait FsEntity: fmt::Display {
    /// Absolute, normalized location of the entity.
    fn path(&self) -> &Path;

    /// Points the handle at a new location, repeating the constructor's
    /// validation and normalization.
    fn set_path(&mut self, path: &Path) -> Result<()>;

    /// Final path component, or an empty string for the root.
    fn name(&self) -> String {
        self.path()
            .file_name()
            .map(os_str_to_string)
            .unwrap_or_default()
    }

    fn parent(&self) -> PathBuf {
        utils::parent_of(self.path())
    }

    /// Walks `levels` directories upwards. `0` behaves like `1`; negative
    /// values are rejected.
    fn get_parent(&self, levels: i32) -> Result<PathBuf> {
        utils::ancestor_of(self.path(), levels)
    }

    fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Size in bytes.
    fn size(&self) -> Result<u64>;

    fn owner(&self) -> Result<UserRecord> {
        ownership::owner_of(self.path())
    }

    fn group(&self) -> Result<GroupRecord> {
        ownership::group_of(self.path())
    }

    /// Changes the owning user and leaves the group untouched.
    fn change_owner(&self, user: UserSpec) -> Result<()> {
        ownership::change_owner(self.path(), &user)
    }

    /// Changes the owning group and leaves the user untouched.
    fn change_group(&self, group: GroupSpec) -> Result<()> {
        ownership::change_group(self.path(), &group)
    }

    /// Renames in place. Fails with [`Error::AlreadyExists`] when the new name
    /// is taken.
    fn rename(&mut self, new_name: &str) -> Result<()>;

    fn remove(&self) -> Result<()>;

    /// Snapshot of the entry as it currently exists on disk.
    fn info(&self) -> Result<EntryInfo> {
        entry_info(self.path())
    }
}

/// Moves `source` into `directory`, optionally under `new_name`, and returns the
/// destination.
///
/// An occupied destination is an error unless `replace_existing` is set, in
/// which case the platform rename swaps it out atomically. Any entry at the
/// destination counts as occupying it, including a dangling symlink.
pub(crate) fn rename_entry(
    source: &Path,
    directory: &Path,
    new_name: Option<&str>,
    replace_existing: bool,
) -> Result<PathBuf> {
    let new_name = new_name.filter(|name| !name.is_empty());
    if let Some(name) = new_name {
        if name.contains(['/', '\\']) {
            return Err(Error::InvalidValue(format!(
                "expected a name without separators, got {name:?}"
            )));
        }
    }

    let name = match new_name {
        Some(name) => OsStr::new(name),
        None => source.file_name().ok_or_else(|| {
            Error::InvalidValue(format!("{} has no name to keep", source.display()))
        })?,
    };
    let destination = utils::resolve_path(directory)?.join(name);

    if fs::symlink_metadata(&destination).is_ok() {
        if !replace_existing {
            return Err(Error::AlreadyExists(destination));
        }
        fs::rename(source, &destination)?;
        tracing::debug!(
            from = %source.display(),
            to = %destination.display(),
            "replaced existing entry"
        );
    } else {
        fs::rename(source, &destination)?;
        tracing::debug!(
            from = %source.display(),
            to = %destination.display(),
            "renamed entry"
        );
    }

    Ok(destination)
}

pub(crate) fn entry_info(path: &Path) -> Result<EntryInfo> {
    let md = fs::symlink_metadata(path)?;
    let kind = EntryKind::from_metadata(&md);
    let size = if kind == EntryKind::File { md.len() } else { 0 };
    Ok(EntryInfo {
        name: path.file_name().map(os_str_to_string).unwrap_or_default(),
        path: path.to_string_lossy().into_owned(),
        kind,
        size,
    })
}

pub(crate) fn os_str_to_string(s: impl AsRef<OsStr>) -> String {
    s.as_ref().to_string_lossy().into_owned()
}
