//! Projects - buildable units within a workspace.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::configuration::Configuration;
use crate::core::files::SourceFile;
use crate::core::language::Language;
use crate::exporter::toolset::{Stage, Toolset};

/// What kind of artifact a project produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    /// Command-line executable (default)
    #[default]
    #[serde(alias = "exe", alias = "console")]
    ConsoleApp,
    /// GUI executable; identical to ConsoleApp for make-style backends
    #[serde(alias = "windowed")]
    WindowedApp,
    /// Static library (.a / .lib)
    #[serde(alias = "static", alias = "lib")]
    StaticLib,
    /// Shared library (.so / .dylib / .dll)
    #[serde(alias = "shared", alias = "dll")]
    SharedLib,
}

impl ProjectKind {
    /// Get the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::ConsoleApp => "consoleapp",
            ProjectKind::WindowedApp => "windowedapp",
            ProjectKind::StaticLib => "staticlib",
            ProjectKind::SharedLib => "sharedlib",
        }
    }

    /// Check whether the produced artifact is an executable.
    pub fn is_executable(&self) -> bool {
        matches!(self, ProjectKind::ConsoleApp | ProjectKind::WindowedApp)
    }
}

impl std::fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProjectKind {
    type Err = ProjectKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "consoleapp" | "console" | "exe" => Ok(ProjectKind::ConsoleApp),
            "windowedapp" | "windowed" => Ok(ProjectKind::WindowedApp),
            "staticlib" | "static" | "lib" => Ok(ProjectKind::StaticLib),
            "sharedlib" | "shared" | "dll" => Ok(ProjectKind::SharedLib),
            _ => Err(ProjectKindParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid project kind.
#[derive(Debug, Clone)]
pub struct ProjectKindParseError(pub String);

impl std::fmt::Display for ProjectKindParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid project kind '{}', valid values: consoleapp, windowedapp, staticlib, sharedlib",
            self.0
        )
    }
}

impl std::error::Error for ProjectKindParseError {}

/// A buildable unit: one library or executable with its files,
/// configurations, and toolchain references.
///
/// The project is the aggregate scope of an export: its lists are the
/// baseline every configuration layers overrides onto.
#[derive(Debug, Clone)]
pub struct Project {
    /// Display name; also names the generated build file
    pub name: String,

    /// Directory generated files are written to; every path emitted into
    /// them is made relative to this location
    pub location: PathBuf,

    /// Artifact kind
    pub kind: ProjectKind,

    /// Language that drives the link step
    pub language: Language,

    /// Build variants, in declaration order; the first one is the default
    pub configurations: Vec<Configuration>,

    /// Declared files; only sources produce object rules
    pub files: Vec<SourceFile>,

    /// Baseline preprocessor defines
    pub defines: Vec<String>,

    /// Baseline include search directories
    pub include_dirs: Vec<PathBuf>,

    /// Baseline libraries to link
    pub libs: Vec<String>,

    /// Baseline preprocessor flags
    pub cpp_flags: Vec<String>,

    /// Baseline C compile flags
    pub c_flags: Vec<String>,

    /// Baseline C++ compile flags
    pub cxx_flags: Vec<String>,

    /// Baseline link flags
    pub link_flags: Vec<String>,

    /// Compiler capability; supplied externally, shared, never mutated
    pub compiler: Option<Arc<dyn Toolset>>,

    /// Linker capability; usually the same object as `compiler`
    pub linker: Option<Arc<dyn Toolset>>,
}

impl Project {
    /// Create a project with the given name and location.
    pub fn new(name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Project {
            name: name.into(),
            location: location.into(),
            kind: ProjectKind::default(),
            language: Language::default(),
            configurations: Vec::new(),
            files: Vec::new(),
            defines: Vec::new(),
            include_dirs: Vec::new(),
            libs: Vec::new(),
            cpp_flags: Vec::new(),
            c_flags: Vec::new(),
            cxx_flags: Vec::new(),
            link_flags: Vec::new(),
            compiler: None,
            linker: None,
        }
    }

    /// Set the artifact kind.
    pub fn with_kind(mut self, kind: ProjectKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the project language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Append a configuration.
    pub fn with_configuration(mut self, configuration: Configuration) -> Self {
        self.configurations.push(configuration);
        self
    }

    /// Append a file.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(SourceFile::new(path));
        self
    }

    /// Add a baseline define.
    pub fn with_define(mut self, define: impl Into<String>) -> Self {
        self.defines.push(define.into());
        self
    }

    /// Add a baseline include directory.
    pub fn with_include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dirs.push(dir.into());
        self
    }

    /// Add a baseline library.
    pub fn with_lib(mut self, lib: impl Into<String>) -> Self {
        self.libs.push(lib.into());
        self
    }

    /// Add a baseline flag for one toolchain stage.
    pub fn with_flag(mut self, stage: Stage, flag: impl Into<String>) -> Self {
        match stage {
            Stage::Preprocessor => self.cpp_flags.push(flag.into()),
            Stage::C => self.c_flags.push(flag.into()),
            Stage::Cxx => self.cxx_flags.push(flag.into()),
            Stage::Link => self.link_flags.push(flag.into()),
        }
        self
    }

    /// Use one toolset for both compiling and linking.
    pub fn with_toolset(mut self, toolset: Arc<dyn Toolset>) -> Self {
        self.compiler = Some(Arc::clone(&toolset));
        self.linker = Some(toolset);
        self
    }

    /// Set the compiler capability only.
    pub fn with_compiler(mut self, compiler: Arc<dyn Toolset>) -> Self {
        self.compiler = Some(compiler);
        self
    }

    /// Set the linker capability only.
    pub fn with_linker(mut self, linker: Arc<dyn Toolset>) -> Self {
        self.linker = Some(linker);
        self
    }

    /// Iterate over the files that produce object rules.
    pub fn source_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter().filter(|f| f.is_source())
    }
}

/// A custom build rule, generated by backends that support them.
///
/// The built-in make backend does not generate rule files; the type exists
/// so action descriptors can carry a rule hook.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Rule name
    pub name: String,

    /// Directory the rule file is generated into
    pub location: PathBuf,
}

impl Rule {
    /// Create a rule description.
    pub fn new(name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Rule {
            name: name.into(),
            location: location.into(),
        }
    }
}
