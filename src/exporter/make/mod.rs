//! GNU Make backend.
//!
//! Registers the `gmake` action and implements its lifecycle hooks: one
//! makefile per project (`<name>.make`), one dispatching `Makefile` per
//! workspace, and clean hooks that remove what the export hooks wrote.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::project::{Project, ProjectKind};
use crate::core::workspace::Workspace;
use crate::core::Language;
use crate::exporter::action::Action;
use crate::exporter::document::DocumentBuilder;
use crate::exporter::errors::ExportError;
use crate::exporter::output;
use crate::exporter::registry::ActionRegistry;
use crate::exporter::scope::ProjectScope;
use crate::exporter::toolset::ToolsetFamily;
use crate::util;

pub mod project;
pub mod workspace;

/// Trigger name of the GNU Make action.
pub const TRIGGER: &str = "gmake";

/// Build the GNU Make action descriptor.
pub fn action() -> Action {
    Action {
        trigger: TRIGGER.to_string(),
        shortname: "GNU Make".to_string(),
        description: "Generate GNU makefiles for POSIX, MinGW, and Cygwin".to_string(),
        os: None,
        valid_kinds: vec![
            ProjectKind::ConsoleApp,
            ProjectKind::WindowedApp,
            ProjectKind::StaticLib,
            ProjectKind::SharedLib,
        ],
        valid_languages: vec![Language::C, Language::Cxx],
        valid_tools: vec![ToolsetFamily::Gcc, ToolsetFamily::Clang],
        on_workspace: Some(on_workspace),
        on_project: Some(on_project),
        on_rule: None,
        on_clean_workspace: Some(on_clean_workspace),
        on_clean_project: Some(on_clean_project),
        on_clean_target: Some(on_clean_target),
    }
}

/// Register the GNU Make action.
pub fn register(registry: &mut ActionRegistry) -> Result<(), ExportError> {
    registry.register(action())
}

/// Path of the makefile generated for a project.
pub fn project_makefile_path(project: &Project) -> PathBuf {
    project.location.join(format!("{}.make", project.name))
}

/// Path of the makefile generated for a workspace.
pub fn workspace_makefile_path(workspace: &Workspace) -> PathBuf {
    workspace.location.join("Makefile")
}

/// Render a path for emission into a makefile (forward slashes only; the
/// generated file substitutes separators itself where msdos shells need
/// them).
pub(crate) fn make_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn on_workspace(wks: &Workspace) -> Result<bool> {
    let path = workspace_makefile_path(wks);
    tracing::debug!(workspace = %wks.name, path = %path.display(), "exporting workspace makefile");
    output::export(&path, || workspace::render(wks))
}

fn on_project(prj: &Project) -> Result<bool> {
    let path = project_makefile_path(prj);
    tracing::debug!(project = %prj.name, path = %path.display(), "exporting project makefile");
    output::export(&path, || {
        let mut doc = DocumentBuilder::new();
        let scope = ProjectScope::new(prj);
        project::run_pipeline(project::PROJECT_ELEMENTS, &mut doc, &scope)?;
        Ok(doc.render())
    })
}

fn on_clean_workspace(wks: &Workspace) -> Result<()> {
    let path = workspace_makefile_path(wks);
    tracing::info!(workspace = %wks.name, "removing generated workspace makefile");
    util::fs::remove_file_if_exists(&path)
}

fn on_clean_project(prj: &Project) -> Result<()> {
    let path = project_makefile_path(prj);
    tracing::info!(project = %prj.name, "removing generated project makefile");
    util::fs::remove_file_if_exists(&path)
}

fn on_clean_target(prj: &Project) -> Result<()> {
    tracing::info!(project = %prj.name, "removing built targets");
    util::fs::remove_dir_all_if_exists(&prj.location.join("bin").join(&prj.name))?;
    util::fs::remove_dir_all_if_exists(&prj.location.join("obj").join(&prj.name))
}
