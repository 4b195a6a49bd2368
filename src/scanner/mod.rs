pub mod classify;
pub mod record;
pub mod roots;
pub mod walker;

pub use record::FileRecord;
pub use roots::DirectorySet;
