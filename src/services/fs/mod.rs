pub mod directory;
pub mod entity;
pub mod file;
pub mod ownership;
pub mod utils;

pub use directory::Directory;
pub use entity::FsEntity;
pub use file::File;
pub use ownership::{GroupSpec, UserSpec};
