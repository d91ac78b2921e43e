//! Common utility functions shared across the codebase.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::Builder;

/// Replace the contents of `path` atomically.
///
/// The data is written to a temporary file in the same directory, flushed to
/// disk, then renamed over `path`. If anything fails before the rename the
/// temporary file is removed and `path` is left as it was.
///
/// An existing file keeps its permissions. A new file gets the mode a plain
/// `fs::write` would give it.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let existing = match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to read metadata: {}", path.display()));
        }
    };

    let mut builder = Builder::new();
    if existing.is_none() {
        set_new_file_permissions(&mut builder);
    }
    let mut tmp = builder
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create temporary file in: {}", dir.display()))?;
    if let Some(permissions) = existing {
        tmp.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("Failed to set permissions: {}", tmp.path().display()))?;
    }

    tmp.write_all(data)
        .with_context(|| format!("Failed to write file: {}", tmp.path().display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("Failed to flush file: {}", tmp.path().display()))?;
    tmp.persist(path)
        .with_context(|| format!("Failed to replace file: {}", path.display()))?;

    Ok(())
}

/// Temporary files default to 0o600. Ask for 0o666 so the umask decides.
#[cfg(unix)]
fn set_new_file_permissions(builder: &mut Builder<'_, '_>) {
    use std::os::unix::fs::PermissionsExt;

    builder.permissions(fs::Permissions::from_mode(0o666));
}

#[cfg(not(unix))]
fn set_new_file_permissions(_builder: &mut Builder<'_, '_>) {}
