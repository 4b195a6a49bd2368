use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use super::errors::{Result, TidyError};
use super::permissions;

/// Effective tidydir configuration
///
/// Built once at startup from the defaults merged with an optional JSON
/// override file, then passed by reference into every pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// Name suffixes that mark a file as temporary
    #[serde(rename = "temporary files")]
    pub temp_suffixes: Vec<String>,

    /// Characters not allowed in file names
    #[serde(rename = "invalid symbols")]
    pub invalid_symbols: Vec<char>,

    /// Target permission bits as octal digits
    pub permissions: String,

    /// Character substituted for each invalid symbol
    #[serde(rename = "character to replace with")]
    pub replacement: char,
}

/// Raw shape of the override file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigOverride {
    #[serde(rename = "temporary files")]
    temp_suffixes: Option<Vec<String>>,

    #[serde(rename = "invalid symbols")]
    invalid_symbols: Option<Vec<String>>,

    permissions: Option<String>,

    #[serde(rename = "character to replace with")]
    replacement: Option<String>,
}

fn default_temp_suffixes() -> Vec<String> {
    vec![".tmp".to_string()]
}
fn default_invalid_symbols() -> Vec<char> {
    vec![':', '"', '*', '?', '$', '#', '^']
}
fn default_permissions() -> String {
    "644".to_string()
}
fn default_replacement() -> char {
    '_'
}

impl Default for Config {
    fn default() -> Self {
        Self {
            temp_suffixes: default_temp_suffixes(),
            invalid_symbols: default_invalid_symbols(),
            permissions: default_permissions(),
            replacement: default_replacement(),
        }
    }
}

impl Config {
    /// Load config, falling back to the defaults on any problem with the
    /// override file. A bad config file never aborts a run.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Config::default();
        };

        match Self::try_load(path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config override");
                config
            }
            Err(e) => {
                tracing::debug!(error = %e, "ignoring config override, using defaults");
                Config::default()
            }
        }
    }

    /// Read an override file and merge it key-by-key over the defaults
    pub fn try_load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| TidyError::io(path, e))?;
        Self::from_json(&contents).map_err(|message| TidyError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Merge a JSON override document over the defaults
    pub fn from_json(contents: &str) -> std::result::Result<Self, String> {
        let value: serde_json::Value =
            serde_json::from_str(contents).map_err(|e| e.to_string())?;
        if !value.is_object() {
            return Err("top level must be a JSON object".to_string());
        }
        let raw: ConfigOverride = serde_json::from_value(value).map_err(|e| e.to_string())?;

        let mut config = Config::default();

        if let Some(suffixes) = raw.temp_suffixes {
            if suffixes.iter().any(|s| s.is_empty()) {
                return Err("'temporary files' must not contain empty suffixes".to_string());
            }
            config.temp_suffixes = suffixes;
        }

        if let Some(symbols) = raw.invalid_symbols {
            config.invalid_symbols = symbols
                .iter()
                .map(|s| single_char(s).ok_or_else(|| format!("invalid symbol '{}' is not one character", s)))
                .collect::<std::result::Result<_, _>>()?;
        }

        if let Some(perms) = raw.permissions {
            permissions::parse_mode(&perms).map_err(|e| e.to_string())?;
            config.permissions = perms;
        }

        if let Some(replacement) = raw.replacement {
            config.replacement = single_char(&replacement).ok_or_else(|| {
                format!("replacement '{}' is not one character", replacement)
            })?;
        }

        if config.invalid_symbols.contains(&config.replacement) {
            tracing::warn!(
                replacement = %config.replacement,
                "replacement character is itself an invalid symbol, using default symbols and replacement"
            );
            config.invalid_symbols = default_invalid_symbols();
            config.replacement = default_replacement();
        }

        Ok(config)
    }

    /// Target permission bits
    pub fn permission_mode(&self) -> Result<u32> {
        permissions::parse_mode(&self.permissions)
    }

    /// Check if a file name contains any invalid symbol
    ///
    /// Names are matched on their raw bytes, so a name that is not valid
    /// UTF-8 is still checked for the symbols it does contain.
    pub fn has_invalid_symbol(&self, name: &OsStr) -> bool {
        let bytes = name.as_bytes();
        self.invalid_symbols.iter().any(|c| {
            let symbol = c.to_string();
            bytes
                .windows(symbol.len())
                .any(|window| window == symbol.as_bytes())
        })
    }

    /// Check if a file name ends with a temporary suffix
    pub fn is_temporary(&self, name: &OsStr) -> bool {
        let bytes = name.as_bytes();
        self.temp_suffixes
            .iter()
            .any(|s| bytes.ends_with(s.as_bytes()))
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
