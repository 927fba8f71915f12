pub mod file_entry;
pub mod owner;

pub use file_entry::{EntryInfo, EntryKind};
pub use owner::{GroupRecord, UserRecord};
