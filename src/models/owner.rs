use serde::Serialize;
use std::path::PathBuf;

/// An entry from the user account database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub username: String,
    pub user_id: u32,
    pub group_id: u32,
    pub home_directory: PathBuf,
}

/// An entry from the group database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRecord {
    pub name: String,
    pub id: u32,
    pub members: Vec<String>,
}
