//! Toolchain abstraction for C/C++ compilers.
//!
//! A `Toolset` answers the questions a backend generator asks about a
//! compiler family: which programs to invoke, how artifacts are named, and
//! which flag tokens apply to a scope at each stage. Flag *values* for any
//! particular compiler stay behind this trait; generators only consume its
//! shape.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::exporter::scope::Scope;

mod gcc;

pub use gcc::GccToolset;

/// Toolchain stage a flag list applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Preprocessor flags, shared by C and C++ compiles
    Preprocessor,
    /// C compile flags
    C,
    /// C++ compile flags
    Cxx,
    /// Link flags
    Link,
}

/// The family of a toolset, used in action capability metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolsetFamily {
    /// GCC (GNU Compiler Collection)
    Gcc,
    /// Clang/LLVM
    Clang,
    /// Microsoft Visual C++
    Msvc,
}

impl ToolsetFamily {
    /// Get the family name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolsetFamily::Gcc => "gcc",
            ToolsetFamily::Clang => "clang",
            ToolsetFamily::Msvc => "msvc",
        }
    }
}

impl fmt::Display for ToolsetFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trait for toolchain capabilities.
///
/// Implementations are referenced from projects via `Arc<dyn Toolset>` and
/// are read-only during export; `Send + Sync` so one instance can back
/// concurrent exports of distinct projects.
pub trait Toolset: fmt::Debug + Send + Sync {
    /// Get the toolset family.
    fn family(&self) -> ToolsetFamily;

    /// C compiler program name.
    fn cc(&self) -> &str;

    /// C++ compiler program name.
    fn cxx(&self) -> &str;

    /// Archiver program name.
    fn ar(&self) -> &str;

    /// Ordered flag tokens for one stage of the given scope.
    ///
    /// Order is significant and duplicates are preserved - callers join
    /// tokens with single spaces and emit them as-is. An aggregate scope
    /// yields the family baseline plus the project's own flags; a
    /// configuration scope yields only that configuration's incremental
    /// flags, merging being left to the generated build file.
    fn flags_for(&self, scope: &dyn Scope, stage: Stage) -> Vec<String>;

    /// Object file extension.
    fn object_extension(&self) -> &str;

    /// Static library extension.
    fn static_lib_extension(&self) -> &str;

    /// Shared library extension.
    fn shared_lib_extension(&self) -> &str;

    /// Executable extension; empty when executables are unsuffixed.
    fn exe_extension(&self) -> &str;

    /// Static library prefix (e.g. "lib").
    fn static_lib_prefix(&self) -> &str;

    /// Shared library prefix.
    fn shared_lib_prefix(&self) -> &str;
}
