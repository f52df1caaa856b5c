//! Render scopes - the read surface element generators consume.
//!
//! Every element renders against a `Scope`: either a whole project (the
//! aggregate) or one configuration of it. The two shapes implement the
//! same trait so one element body serves both; behavior differences go
//! through `is_aggregate`, never through downcasts or shape probes.

use std::path::PathBuf;

use crate::core::configuration::Configuration;
use crate::core::project::Project;
use crate::exporter::errors::ExportError;
use crate::exporter::toolset::{Stage, Toolset};

/// Conventional output directories of a configuration, relative to the
/// owning project's location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    /// Where the built target lands (`bin/<project>/<configuration>`)
    pub target: String,

    /// Where object files land (`obj/<project>/<configuration>`)
    pub objects: String,
}

/// The polymorphic read surface an element renders against.
pub trait Scope {
    /// The owning project.
    fn project(&self) -> &Project;

    /// The configuration, when this is a per-configuration scope.
    fn configuration(&self) -> Option<&Configuration>;

    /// Whether this is the aggregate (project) scope.
    fn is_aggregate(&self) -> bool {
        self.configuration().is_none()
    }

    /// Display name, original case preserved.
    fn display_name(&self) -> &str;

    /// Preprocessor defines of this scope.
    fn defines(&self) -> &[String];

    /// Include search directories of this scope.
    fn include_dirs(&self) -> &[PathBuf];

    /// Libraries to link at this scope.
    fn libs(&self) -> &[String];

    /// Declared flag overrides for one stage.
    fn flag_overrides(&self, stage: Stage) -> &[String];

    /// Output directories; `None` at the aggregate scope, where the
    /// directory layout is not yet configuration-specific.
    fn directories(&self) -> Option<OutputDirs>;

    /// The compiler capability, or `ToolchainUnavailable`.
    fn compiler(&self) -> Result<&dyn Toolset, ExportError>;

    /// The linker capability, or `ToolchainUnavailable`.
    fn linker(&self) -> Result<&dyn Toolset, ExportError>;
}

/// Aggregate scope over a whole project.
#[derive(Debug, Clone, Copy)]
pub struct ProjectScope<'a> {
    project: &'a Project,
}

impl<'a> ProjectScope<'a> {
    /// Create the aggregate scope of a project.
    pub fn new(project: &'a Project) -> Self {
        ProjectScope { project }
    }
}

impl Scope for ProjectScope<'_> {
    fn project(&self) -> &Project {
        self.project
    }

    fn configuration(&self) -> Option<&Configuration> {
        None
    }

    fn display_name(&self) -> &str {
        &self.project.name
    }

    fn defines(&self) -> &[String] {
        &self.project.defines
    }

    fn include_dirs(&self) -> &[PathBuf] {
        &self.project.include_dirs
    }

    fn libs(&self) -> &[String] {
        &self.project.libs
    }

    fn flag_overrides(&self, stage: Stage) -> &[String] {
        match stage {
            Stage::Preprocessor => &self.project.cpp_flags,
            Stage::C => &self.project.c_flags,
            Stage::Cxx => &self.project.cxx_flags,
            Stage::Link => &self.project.link_flags,
        }
    }

    fn directories(&self) -> Option<OutputDirs> {
        None
    }

    fn compiler(&self) -> Result<&dyn Toolset, ExportError> {
        toolset_of(self.project, &self.project.compiler, "compiler")
    }

    fn linker(&self) -> Result<&dyn Toolset, ExportError> {
        toolset_of(self.project, &self.project.linker, "linker")
    }
}

/// Scope over one configuration of a project.
#[derive(Debug, Clone, Copy)]
pub struct ConfigurationScope<'a> {
    project: &'a Project,
    configuration: &'a Configuration,
}

impl<'a> ConfigurationScope<'a> {
    /// Create the scope of one configuration belonging to `project`.
    pub fn new(project: &'a Project, configuration: &'a Configuration) -> Self {
        ConfigurationScope {
            project,
            configuration,
        }
    }
}

impl Scope for ConfigurationScope<'_> {
    fn project(&self) -> &Project {
        self.project
    }

    fn configuration(&self) -> Option<&Configuration> {
        Some(self.configuration)
    }

    fn display_name(&self) -> &str {
        &self.configuration.name
    }

    fn defines(&self) -> &[String] {
        &self.configuration.defines
    }

    fn include_dirs(&self) -> &[PathBuf] {
        &self.configuration.include_dirs
    }

    fn libs(&self) -> &[String] {
        &self.configuration.libs
    }

    fn flag_overrides(&self, stage: Stage) -> &[String] {
        self.configuration.flags(stage)
    }

    fn directories(&self) -> Option<OutputDirs> {
        // Fixed convention, composed from original-case names; the result
        // is already relative to the project location.
        Some(OutputDirs {
            target: format!("bin/{}/{}", self.project.name, self.configuration.name),
            objects: format!("obj/{}/{}", self.project.name, self.configuration.name),
        })
    }

    fn compiler(&self) -> Result<&dyn Toolset, ExportError> {
        toolset_of(self.project, &self.project.compiler, "compiler")
    }

    fn linker(&self) -> Result<&dyn Toolset, ExportError> {
        toolset_of(self.project, &self.project.linker, "linker")
    }
}

fn toolset_of<'a>(
    project: &Project,
    slot: &'a Option<std::sync::Arc<dyn Toolset>>,
    tool: &'static str,
) -> Result<&'a dyn Toolset, ExportError> {
    slot.as_deref().ok_or_else(|| ExportError::ToolchainUnavailable {
        project: project.name.clone(),
        tool,
    })
}
