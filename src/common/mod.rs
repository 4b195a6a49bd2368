pub mod config;
pub mod errors;
pub mod format;
pub mod permissions;
