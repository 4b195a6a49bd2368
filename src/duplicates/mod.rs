pub mod grouper;
pub mod hasher;
pub mod resolver;

pub use grouper::{find_content_duplicates, find_name_duplicates, DuplicateGroup};
pub use resolver::{resolve_group, ResolveStrategy, ResolvedGroup};
