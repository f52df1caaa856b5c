//! Project files and their build classification.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How a file participates in the build, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// C translation unit
    CSource,
    /// C++ translation unit
    CxxSource,
    /// Header, never compiled on its own
    Header,
    /// Anything else (docs, resources, data)
    Other,
}

/// A file belonging to a project.
///
/// Paths are stored exactly as declared; the exporter relativizes them
/// against the owning project's location at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Declared path of the file
    pub path: PathBuf,
}

impl SourceFile {
    /// Create a new file entry.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SourceFile { path: path.into() }
    }

    /// Get the declared path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Classify the file by its extension (case-insensitive).
    pub fn kind(&self) -> FileKind {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("c") => FileKind::CSource,
            Some("cc" | "cpp" | "cxx" | "c++") => FileKind::CxxSource,
            Some("h" | "hh" | "hpp" | "hxx" | "inl") => FileKind::Header,
            _ => FileKind::Other,
        }
    }

    /// Check whether this file produces an object file.
    pub fn is_source(&self) -> bool {
        matches!(self.kind(), FileKind::CSource | FileKind::CxxSource)
    }

    /// Check whether this file is a header.
    pub fn is_header(&self) -> bool {
        self.kind() == FileKind::Header
    }

    /// Object file name for this source, keyed solely by the file stem.
    ///
    /// Two sources with the same stem in different directories map to the
    /// same object name; callers must not assume uniqueness.
    pub fn object_name(&self, extension: &str) -> Option<String> {
        let stem = self.path.file_stem()?.to_string_lossy();
        Some(format!("{stem}.{extension}"))
    }
}
