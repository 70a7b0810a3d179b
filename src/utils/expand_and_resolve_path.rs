use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use crate::runtime::Error;

/// Strip one layer of matching straight quotes, as left behind when a quoted path is pasted
pub fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Expands a leading ~ if possible (only for UTF-8 paths), and always returns an absolute PathBuf.
/// Non-UTF-8 paths are left unexpanded with a warning, but are still made absolute.
/// Does NOT fail if the file does not exist.
pub fn expand_and_resolve_path<P: AsRef<Path>>(input: P) -> Result<PathBuf> {
    let input = input.as_ref();
    let expanded: PathBuf = match input.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => {
            log::warn!(
                "Path {:?} is not valid UTF-8. Skipping path expansion.",
                input
            );
            input.to_path_buf()
        }
    };

    let abs = if expanded.is_absolute() {
        expanded
    } else {
        env::current_dir()
            .context("Failed to get current directory")?
            .join(expanded)
    };
    Ok(abs)
}

/// Turn a typed folder into an existing, absolute directory.
/// Surrounding quotes go, a leading ~ is expanded and trailing separators are dropped
pub fn normalize_folder(raw: &str) -> Result<PathBuf> {
    let unquoted = strip_quotes(raw.trim());
    let mut trimmed = unquoted.trim_end_matches(std::path::MAIN_SEPARATOR);
    if trimmed.is_empty() && !unquoted.is_empty() {
        //The root directory itself
        trimmed = &unquoted[..1];
    }
    if trimmed.is_empty() {
        return Err(Error::empty_input("folder").into());
    }

    let folder = expand_and_resolve_path(trimmed)?;
    if !folder.is_dir() {
        return Err(Error::folder_not_found(&folder).into());
    }
    Ok(folder)
}
