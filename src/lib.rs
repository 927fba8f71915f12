//! File and directory handles that keep a validated, normalized absolute path
//! and answer metadata and mutation requests against the live filesystem.

pub mod core;
pub mod models;
pub mod services;

pub use crate::core::errors::{Error, Result};
pub use crate::services::fs::{Directory, File, FsEntity, GroupSpec, UserSpec};
