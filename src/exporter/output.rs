//! Idempotent output writing.
//!
//! Generated files feed build-freshness checks keyed off modification
//! times, so a no-op regeneration must not touch the file at all. The
//! writer renders fully in memory, byte-compares against what is on disk,
//! and only replaces the file - atomically, via a sibling temp file - when
//! the content actually differs.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use tempfile::NamedTempFile;

use crate::exporter::errors::ExportError;
use crate::util;

/// Render a document and write it to `path` only if the content changed.
///
/// Returns `Ok(true)` when the file was (re)written, `Ok(false)` when the
/// existing file already matched byte-for-byte. The render closure runs to
/// completion before any disk state is touched; a render failure therefore
/// never leaves a partial file behind.
pub fn export<F>(path: &Path, render: F) -> Result<bool>
where
    F: FnOnce() -> Result<String>,
{
    let rendered = render()?;

    match fs::read(path) {
        Ok(existing) if existing == rendered.as_bytes() => {
            tracing::debug!(path = %path.display(), "content unchanged, skipping write");
            return Ok(false);
        }
        Ok(_) => {}
        Err(source) if source.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(ExportError::Io {
                path: path.to_path_buf(),
                source,
            }
            .into())
        }
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    util::fs::ensure_dir(parent)?;

    // Write to a sibling temp file and rename over the target so readers
    // never observe a half-written document.
    let mut tmp = NamedTempFile::new_in(parent).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tmp.write_all(rendered.as_bytes())
        .map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    tmp.persist(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    tracing::debug!(path = %path.display(), bytes = rendered.len(), "wrote generated file");
    Ok(true)
}
