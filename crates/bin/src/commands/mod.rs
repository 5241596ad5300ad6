pub mod token;
pub mod vfs;
