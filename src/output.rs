//! Writing and checking the rendered document.

use crate::error::{DocgenError, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;

/// How an existing output file compares to freshly rendered text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Freshness {
    UpToDate,
    Stale,
    Missing,
}

/// Replace `path` with `contents` in one rename.
///
/// The text is written to a temporary file next to the target and persisted
/// over it, so readers see either the old document or the new one. An
/// existing target keeps its permissions, and a symlinked target is written
/// through the link rather than replaced by a regular file.
pub fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source: io::Error| DocgenError::Write {
        path: path.to_path_buf(),
        source,
    };
    let target = resolve_target(path);
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let existing = fs::metadata(&target).ok().map(|meta| meta.permissions());

    let mut tmp = temp_builder().tempfile_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    if let Some(permissions) = existing {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(&target).map_err(|err| write_err(err.error))?;
    Ok(())
}

/// Follow a symlinked output to the file it points at.
fn resolve_target(path: &Path) -> PathBuf {
    let is_link = fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false);
    if is_link {
        if let Ok(resolved) = fs::canonicalize(path) {
            return resolved;
        }
    }
    path.to_path_buf()
}

/// New files get the mode a plain `create` would give them (0666 minus umask)
/// instead of tempfile's owner-only default.
#[cfg(unix)]
fn temp_builder() -> Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;
    let mut builder = Builder::new();
    builder.permissions(fs::Permissions::from_mode(0o666));
    builder
}

#[cfg(not(unix))]
fn temp_builder() -> Builder<'static, 'static> {
    Builder::new()
}

pub fn compare_existing(path: &Path, contents: &str) -> Result<Freshness> {
    match fs::read(path) {
        Ok(existing) if existing == contents.as_bytes() => Ok(Freshness::UpToDate),
        Ok(_) => Ok(Freshness::Stale),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Freshness::Missing),
        Err(source) => Err(DocgenError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
