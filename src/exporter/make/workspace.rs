//! Workspace makefile generation.
//!
//! The workspace `Makefile` does no compiling of its own: it lists the
//! member projects, forwards the selected configuration to each project
//! makefile, and offers `all`, `clean`, and `help` entry points.

use anyhow::Result;

use crate::core::project::Project;
use crate::core::workspace::Workspace;
use crate::exporter::document::DocumentBuilder;
use crate::util;

/// Render the dispatching makefile for a workspace.
pub fn render(wks: &Workspace) -> Result<String> {
    let mut doc = DocumentBuilder::new();

    doc.line("# GNU Make workspace makefile autogenerated by Slipway");
    doc.blank();

    if let Some(first) = wks.configurations.first() {
        doc.line("ifndef config");
        doc.indent();
        doc.line(format!("config={}", first.to_lowercase()));
        doc.outdent();
        doc.line("endif");
        doc.blank();
    }

    doc.line("ifndef verbose");
    doc.indent();
    doc.line("SILENT = @");
    doc.outdent();
    doc.line("endif");
    doc.blank();

    let names: Vec<&str> = wks.projects.iter().map(|p| p.name.as_str()).collect();
    doc.line(format!("PROJECTS := {}", names.join(" ")));
    doc.blank();
    doc.line(".PHONY: all clean help $(PROJECTS)");
    doc.blank();
    doc.line("all: $(PROJECTS)");
    doc.blank();

    for project in &wks.projects {
        let dir = dispatch_dir(wks, project);
        doc.line(format!("{}:", project.name));
        doc.raw_line(format!(
            "\t@echo \"==== Building {} ($(config)) ====\"",
            project.name
        ));
        doc.raw_line(format!(
            "\t@${{MAKE}} --no-print-directory -C {dir} -f {}.make config=$(config)",
            project.name
        ));
        doc.blank();
    }

    doc.line("clean:");
    for project in &wks.projects {
        let dir = dispatch_dir(wks, project);
        doc.raw_line(format!(
            "\t@${{MAKE}} --no-print-directory -C {dir} -f {}.make clean",
            project.name
        ));
    }
    doc.blank();

    doc.line("help:");
    doc.raw_line("\t@echo \"Usage: make [config=name] [target]\"");
    doc.raw_line("\t@echo \"\"");
    doc.raw_line("\t@echo \"CONFIGURATIONS:\"");
    for configuration in &wks.configurations {
        doc.raw_line(format!("\t@echo \"  {}\"", configuration.to_lowercase()));
    }
    doc.raw_line("\t@echo \"\"");
    doc.raw_line("\t@echo \"TARGETS:\"");
    doc.raw_line("\t@echo \"  all (default)\"");
    doc.raw_line("\t@echo \"  clean\"");
    for project in &wks.projects {
        doc.raw_line(format!("\t@echo \"  {}\"", project.name));
    }

    Ok(doc.render())
}

/// Directory the workspace makefile changes into for one project,
/// relative to the workspace location.
fn dispatch_dir(wks: &Workspace, project: &Project) -> String {
    let rel = super::make_path(&util::fs::relative_path(&wks.location, &project.location));
    if rel.is_empty() {
        ".".to_string()
    } else {
        rel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace() -> Workspace {
        Workspace::new("demo", "ws")
            .with_configuration("Debug")
            .with_configuration("Release")
            .with_project(Project::new("app", "ws/app"))
            .with_project(Project::new("engine", "ws/libs/engine"))
    }

    #[test]
    fn test_projects_are_listed_and_dispatched() {
        let text = render(&workspace()).unwrap();

        assert!(text.contains("PROJECTS := app engine"));
        assert!(text.contains(
            "\t@${MAKE} --no-print-directory -C app -f app.make config=$(config)"
        ));
        assert!(text.contains(
            "\t@${MAKE} --no-print-directory -C libs/engine -f engine.make clean"
        ));
    }

    #[test]
    fn test_default_config_is_first_declared() {
        let text = render(&workspace()).unwrap();
        assert!(text.contains("ifndef config\n  config=debug\nendif"));
    }

    #[test]
    fn test_help_lists_configurations_and_projects() {
        let text = render(&workspace()).unwrap();
        assert!(text.contains("\t@echo \"  debug\""));
        assert!(text.contains("\t@echo \"  release\""));
        assert!(text.contains("\t@echo \"  engine\""));
    }

    #[test]
    fn test_project_in_workspace_root_dispatches_to_dot() {
        let wks = Workspace::new("flat", "ws")
            .with_configuration("Debug")
            .with_project(Project::new("app", "ws"));
        let text = render(&wks).unwrap();
        assert!(text.contains("-C . -f app.make"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let wks = workspace();
        assert_eq!(render(&wks).unwrap(), render(&wks).unwrap());
    }
}
