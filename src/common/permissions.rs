use std::fs::Metadata;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use super::errors::{Result, TidyError};

/// Permission bits tidydir compares and sets (rwx for user, group, other)
pub const PERMISSION_MASK: u32 = 0o777;

/// Parse an octal permission string such as "644" or "0o644"
pub fn parse_mode(value: &str) -> Result<u32> {
    let invalid = || TidyError::InvalidPermissions {
        value: value.to_string(),
    };

    let digits = value.trim();
    let digits = digits.strip_prefix("0o").unwrap_or(digits);
    if digits.is_empty() {
        return Err(invalid());
    }

    let mode = u32::from_str_radix(digits, 8).map_err(|_| invalid())?;
    if mode > PERMISSION_MASK {
        return Err(invalid());
    }
    Ok(mode)
}

/// Permission bits of a file, without the file type bits
pub fn mode_bits(metadata: &Metadata) -> u32 {
    metadata.permissions().mode() & PERMISSION_MASK
}

/// Set a file's permission bits to exactly `mode`
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .map_err(|e| TidyError::io(path, e))
}

/// Render a mode the way `ls`-style tools and the config file spell it
pub fn format_mode(mode: u32) -> String {
    format!("{:03o}", mode)
}
