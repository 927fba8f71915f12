use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("is a directory: {}", .0.display())]
    IsADirectory(PathBuf),
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("not supported on this platform: {0}")]
    NotSupported(&'static str),
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("group not found: {0}")]
    GroupNotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(unix)]
impl From<nix::Error> for Error {
    fn from(errno: nix::Error) -> Self {
        Error::Io(std::io::Error::from(errno))
    }
}
