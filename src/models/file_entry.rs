use serde::Serialize;
use std::fs::Metadata;

/// Snapshot of a single filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    pub name: String,
    pub path: String,
    pub kind: EntryKind,
    pub size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Other,
    /// Listed by the directory but its metadata could not be read.
    Unknown,
}

impl EntryKind {
    /// Classifies `symlink_metadata` output without following links.
    pub fn from_metadata(md: &Metadata) -> EntryKind {
        let file_type = md.file_type();
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}
