pub mod engine;
pub mod naming;
pub mod passes;

pub use engine::{Action, CleanMode, CleanReport, Cleaner};
pub use passes::{
    delete_empty, delete_same_content, delete_same_name, delete_temporary, fix_permissions,
    rename_invalid_symbols, Pass,
};
