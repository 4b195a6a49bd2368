use std::path::PathBuf;

/// Typed errors for tidydir operations.
/// The binary wraps these in `anyhow` for reporting,
/// but library modules stay precise about what failed and where.
#[derive(Debug, thiserror::Error)]
pub enum TidyError {
    /// File system operation failed
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed
    #[error("Failed to walk '{}': {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A directory to manage is missing or not a directory
    #[error("Not a directory: '{}'", path.display())]
    NotADirectory { path: PathBuf },

    /// Configuration file is invalid
    #[error("Config error in '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Permission string is not an octal mode in 0..=777
    #[error("Invalid permission mode '{value}' (expected octal digits, at most 777)")]
    InvalidPermissions { value: String },

    /// Could not find a free name for a rename
    #[error("No free name left for '{}'", path.display())]
    NameExhausted { path: PathBuf },
}

impl TidyError {
    /// Attach a path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TidyError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = TidyError> = std::result::Result<T, E>;
