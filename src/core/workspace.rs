//! Workspaces - the top-level container a driver exports.

use std::path::{Path, PathBuf};

use crate::core::project::Project;

/// A collection of projects sharing a location and a configuration list.
///
/// The configuration names declared here are what workspace-level build
/// files present to the user; each project carries its own resolved
/// `Configuration` objects.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    /// Display name
    pub name: String,

    /// Directory workspace-level files are generated into
    pub location: PathBuf,

    /// Configuration names in declaration order; the first is the default
    pub configurations: Vec<String>,

    /// Member projects in declaration order
    pub projects: Vec<Project>,
}

impl Workspace {
    /// Create a workspace with the given name and location.
    pub fn new(name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Workspace {
            name: name.into(),
            location: location.into(),
            configurations: Vec::new(),
            projects: Vec::new(),
        }
    }

    /// Append a configuration name.
    pub fn with_configuration(mut self, name: impl Into<String>) -> Self {
        self.configurations.push(name.into());
        self
    }

    /// Append a project.
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    /// Get the workspace location.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Find a member project by name.
    pub fn find_project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_builder() {
        let workspace = Workspace::new("demo", "build")
            .with_configuration("Debug")
            .with_configuration("Release")
            .with_project(Project::new("app", "build/app"))
            .with_project(Project::new("lib", "build/lib"));

        assert_eq!(workspace.configurations, ["Debug", "Release"]);
        assert_eq!(workspace.projects.len(), 2);
        assert!(workspace.find_project("lib").is_some());
        assert!(workspace.find_project("missing").is_none());
    }
}
