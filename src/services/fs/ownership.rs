use std::fmt;
use std::path::Path;

use crate::core::errors::Result;
#[cfg(not(unix))]
use crate::core::errors::Error;
use crate::models::{GroupRecord, UserRecord};

/// A user given either by account name or numeric id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSpec {
    Name(String),
    Id(u32),
}

/// A group given either by group name or numeric id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupSpec {
    Name(String),
    Id(u32),
}

impl From<&str> for UserSpec {
    fn from(name: &str) -> Self {
        UserSpec::Name(name.to_string())
    }
}

impl From<String> for UserSpec {
    fn from(name: String) -> Self {
        UserSpec::Name(name)
    }
}

impl From<u32> for UserSpec {
    fn from(id: u32) -> Self {
        UserSpec::Id(id)
    }
}

impl From<&str> for GroupSpec {
    fn from(name: &str) -> Self {
        GroupSpec::Name(name.to_string())
    }
}

impl From<String> for GroupSpec {
    fn from(name: String) -> Self {
        GroupSpec::Name(name)
    }
}

impl From<u32> for GroupSpec {
    fn from(id: u32) -> Self {
        GroupSpec::Id(id)
    }
}

impl fmt::Display for UserSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserSpec::Name(name) => f.write_str(name),
            UserSpec::Id(id) => write!(f, "{id}"),
        }
    }
}

impl fmt::Display for GroupSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupSpec::Name(name) => f.write_str(name),
            GroupSpec::Id(id) => write!(f, "{id}"),
        }
    }
}

#[cfg(unix)]
mod posix {
    use std::fs;
    use std::os::unix::fs::MetadataExt;
    use std::path::Path;

    use nix::unistd::{chown, Gid, Group, Uid, User};

    use super::{GroupSpec, UserSpec};
    use crate::core::errors::{Error, Result};
    use crate::models::{GroupRecord, UserRecord};

    pub fn owner_of(path: &Path) -> Result<UserRecord> {
        let uid = fs::metadata(path)?.uid();
        let user = User::from_uid(Uid::from_raw(uid))?
            .ok_or_else(|| Error::UserNotFound(uid.to_string()))?;
        Ok(UserRecord {
            username: user.name,
            user_id: user.uid.as_raw(),
            group_id: user.gid.as_raw(),
            home_directory: user.dir,
        })
    }

    pub fn group_of(path: &Path) -> Result<GroupRecord> {
        let gid = fs::metadata(path)?.gid();
        let group = Group::from_gid(Gid::from_raw(gid))?
            .ok_or_else(|| Error::GroupNotFound(gid.to_string()))?;
        Ok(GroupRecord {
            name: group.name,
            id: group.gid.as_raw(),
            members: group.mem,
        })
    }

    pub fn change_owner(path: &Path, user: &UserSpec) -> Result<()> {
        let uid = match user {
            UserSpec::Id(id) => Uid::from_raw(*id),
            UserSpec::Name(name) => {
                User::from_name(name)?
                    .ok_or_else(|| Error::UserNotFound(name.clone()))?
                    .uid
            }
        };
        chown(path, Some(uid), None)?;
        Ok(())
    }

    pub fn change_group(path: &Path, group: &GroupSpec) -> Result<()> {
        let gid = match group {
            GroupSpec::Id(id) => Gid::from_raw(*id),
            GroupSpec::Name(name) => {
                Group::from_name(name)?
                    .ok_or_else(|| Error::GroupNotFound(name.clone()))?
                    .gid
            }
        };
        chown(path, None, Some(gid))?;
        Ok(())
    }
}

pub(crate) fn owner_of(path: &Path) -> Result<UserRecord> {
    #[cfg(unix)]
    {
        posix::owner_of(path)
    }
    #[cfg(not(unix))]
    {
        let _ = path;
        Err(Error::NotSupported("owner lookup"))
    }
}

pub(crate) fn group_of(path: &Path) -> Result<GroupRecord> {
    #[cfg(unix)]
    {
        posix::group_of(path)
    }
    #[cfg(not(unix))]
    {
        let _ = path;
        Err(Error::NotSupported("group lookup"))
    }
}

pub(crate) fn change_owner(path: &Path, user: &UserSpec) -> Result<()> {
    #[cfg(unix)]
    {
        posix::change_owner(path, user)?;
        tracing::debug!(path = %path.display(), user = %user, "changed owner");
        Ok(())
    }
    #[cfg(not(unix))]
    {
        let _ = (path, user);
        Err(Error::NotSupported("owner change"))
    }
}

pub(crate) fn change_group(path: &Path, group: &GroupSpec) -> Result<()> {
    #[cfg(unix)]
    {
        posix::change_group(path, group)?;
        tracing::debug!(path = %path.display(), group = %group, "changed group");
        Ok(())
    }
    #[cfg(not(unix))]
    {
        let _ = (path, group);
        Err(Error::NotSupported("group change"))
    }
}
