use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};

use crate::common::errors::{Result, TidyError};

/// Split a file name into stem and extension (with its dot)
///
/// The extension starts at the last dot, unless that dot leads the name or
/// ends it: `.bashrc` and `notes.` have no extension.
pub fn split_name(name: &[u8]) -> (&[u8], &[u8]) {
    match name.iter().rposition(|&b| b == b'.') {
        Some(i) if i > 0 && i + 1 < name.len() => name.split_at(i),
        _ => name.split_at(name.len()),
    }
}

/// Replace every invalid symbol in a name with `replacement`
///
/// Works on the raw bytes of the name: only the UTF-8 encodings of the
/// symbols are replaced, everything else is copied through untouched.
pub fn sanitize_name(name: &OsStr, symbols: &[char], replacement: char) -> OsString {
    let patterns: Vec<String> = symbols.iter().map(char::to_string).collect();
    let replacement = replacement.to_string();
    let bytes = name.as_bytes();

    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match patterns.iter().find(|p| bytes[i..].starts_with(p.as_bytes())) {
            Some(symbol) => {
                out.extend_from_slice(replacement.as_bytes());
                i += symbol.len();
            }
            None => {
                out.push(bytes[i]);
                i += 1;
            }
        }
    }
    OsString::from_vec(out)
}

/// `stem` + `separator` + `n` + `extension`
pub fn numbered_name(name: &OsStr, separator: char, n: u32) -> OsString {
    let (stem, ext) = split_name(name.as_bytes());
    let mut out = stem.to_vec();
    out.extend_from_slice(format!("{separator}{n}").as_bytes());
    out.extend_from_slice(ext);
    OsString::from_vec(out)
}

/// First free path for `candidate`
///
/// Returns `candidate` itself when it is free, otherwise the first numbered
/// variant (`name_1.ext`, `name_2.ext`, ...) that is. `is_taken` is asked
/// again for every attempt.
pub fn resolve_free_path<F>(candidate: &Path, separator: char, is_taken: F) -> Result<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    if !is_taken(candidate) {
        return Ok(candidate.to_path_buf());
    }

    let name = candidate.file_name().unwrap_or_default();
    for n in 1..=u32::MAX {
        let attempt = candidate.with_file_name(numbered_name(name, separator, n));
        if !is_taken(&attempt) {
            return Ok(attempt);
        }
    }

    Err(TidyError::NameExhausted {
        path: candidate.to_path_buf(),
    })
}
