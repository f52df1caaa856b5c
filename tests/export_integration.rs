//! Export integration tests.
//!
//! These drive the full export workflow through the public surface:
//! registry lookup, lifecycle hooks, generated files on disk, idempotent
//! re-export, and cleanup.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use predicates::prelude::*;
use tempfile::TempDir;

use slipway::exporter::make;
use slipway::{
    ActionRegistry, Configuration, ExportError, GccToolset, Language, Project, ProjectKind,
    Stage, Workspace,
};

/// Create a temporary directory for generated files.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// A two-project workspace: a static library and an executable using it.
fn demo_workspace(root: &Path) -> Workspace {
    let engine = Project::new("engine", root.join("engine"))
        .with_kind(ProjectKind::StaticLib)
        .with_language(Language::Cxx)
        .with_include_dir("include")
        .with_file("src/engine.cpp")
        .with_configuration(Configuration::new("Debug").with_define("DEBUG"))
        .with_configuration(Configuration::new("Release").with_define("NDEBUG"))
        .with_toolset(Arc::new(GccToolset::gcc()));

    let app = Project::new("app", root.join("app"))
        .with_kind(ProjectKind::ConsoleApp)
        .with_language(Language::Cxx)
        .with_include_dir("../engine/include")
        .with_file("src/main.cpp")
        .with_file("src/game.cpp")
        .with_lib("m")
        .with_configuration(
            Configuration::new("Debug")
                .with_define("DEBUG")
                .with_flag(Stage::Cxx, "-g"),
        )
        .with_configuration(
            Configuration::new("Release")
                .with_define("NDEBUG")
                .with_flag(Stage::Cxx, "-O2"),
        )
        .with_toolset(Arc::new(GccToolset::gcc()));

    Workspace::new("demo", root)
        .with_configuration("Debug")
        .with_configuration("Release")
        .with_project(engine)
        .with_project(app)
}

// ============================================================================
// registry dispatch
// ============================================================================

#[test]
fn test_export_through_registry_lookup() {
    let tmp = temp_dir();
    let wks = demo_workspace(tmp.path());

    let registry = ActionRegistry::with_builtins().unwrap();
    let action = registry.lookup("gmake").unwrap();

    let on_workspace = action.on_workspace.expect("gmake exports workspaces");
    let on_project = action.on_project.expect("gmake exports projects");

    assert!(on_workspace(&wks).unwrap());
    for project in &wks.projects {
        assert!(on_project(project).unwrap());
    }

    assert!(tmp.path().join("Makefile").exists());
    assert!(tmp.path().join("engine/engine.make").exists());
    assert!(tmp.path().join("app/app.make").exists());
}

#[test]
fn test_unknown_trigger_fails_lookup() {
    let registry = ActionRegistry::with_builtins().unwrap();
    let err = registry.lookup("vs2010").unwrap_err();
    assert!(matches!(err, ExportError::UnknownAction { trigger } if trigger == "vs2010"));
}

// ============================================================================
// generated content
// ============================================================================

#[test]
fn test_generated_project_makefile_content() {
    let tmp = temp_dir();
    let wks = demo_workspace(tmp.path());
    let app = wks.find_project("app").unwrap();

    let registry = ActionRegistry::with_builtins().unwrap();
    let action = registry.lookup("gmake").unwrap();
    action.on_project.unwrap()(app).unwrap();

    let content = fs::read_to_string(tmp.path().join("app/app.make")).unwrap();

    assert!(predicate::str::contains("ifndef config\n  config=debug\nendif").eval(&content));
    assert!(predicate::str::contains("INCLUDES  = -I../engine/include").eval(&content));
    assert!(predicate::str::contains("ifeq ($(config),debug)").eval(&content));
    assert!(predicate::str::contains("else ifeq ($(config),release)").eval(&content));
    assert!(predicate::str::contains("TARGETDIR = bin/app/Debug").eval(&content));
    assert!(predicate::str::contains("LIBS      = -lm").eval(&content));
    assert!(predicate::str::contains("$(OBJDIR)/main.o: src/main.cpp").eval(&content));
    assert!(predicate::str::contains("$(OBJDIR)/game.o: src/game.cpp").eval(&content));
    assert!(predicate::str::contains("-include $(OBJECTS:%.o=%.d)").eval(&content));
}

#[test]
fn test_generated_workspace_makefile_content() {
    let tmp = temp_dir();
    let wks = demo_workspace(tmp.path());

    let registry = ActionRegistry::with_builtins().unwrap();
    let action = registry.lookup("gmake").unwrap();
    action.on_workspace.unwrap()(&wks).unwrap();

    let content = fs::read_to_string(tmp.path().join("Makefile")).unwrap();

    assert!(predicate::str::contains("PROJECTS := engine app").eval(&content));
    assert!(predicate::str::contains("-C engine -f engine.make config=$(config)").eval(&content));
    assert!(predicate::str::contains("-C app -f app.make clean").eval(&content));
    assert!(predicate::str::contains("@echo \"  release\"").eval(&content));
}

#[test]
fn test_static_library_link_rule() {
    let tmp = temp_dir();
    let wks = demo_workspace(tmp.path());
    let engine = wks.find_project("engine").unwrap();

    let registry = ActionRegistry::with_builtins().unwrap();
    let action = registry.lookup("gmake").unwrap();
    action.on_project.unwrap()(engine).unwrap();

    let content = fs::read_to_string(tmp.path().join("engine/engine.make")).unwrap();
    assert!(predicate::str::contains("LINKCMD   = $(AR) -rcs \"$(TARGET)\" $(OBJECTS)").eval(&content));
    assert!(predicate::str::contains("TARGET    = $(TARGETDIR)/libengine.a").eval(&content));
}

// ============================================================================
// idempotence
// ============================================================================

#[test]
fn test_reexport_without_model_change_is_a_noop() {
    let tmp = temp_dir();
    let wks = demo_workspace(tmp.path());
    let app = wks.find_project("app").unwrap();

    let registry = ActionRegistry::with_builtins().unwrap();
    let action = registry.lookup("gmake").unwrap();
    let on_project = action.on_project.unwrap();

    assert!(on_project(app).unwrap());
    let first = fs::read(tmp.path().join("app/app.make")).unwrap();

    assert!(!on_project(app).unwrap());
    let second = fs::read(tmp.path().join("app/app.make")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_model_change_triggers_rewrite() {
    let tmp = temp_dir();
    let wks = demo_workspace(tmp.path());
    let app = wks.find_project("app").unwrap();

    let registry = ActionRegistry::with_builtins().unwrap();
    let on_project = registry.lookup("gmake").unwrap().on_project.unwrap();

    assert!(on_project(app).unwrap());

    let modified = app.clone().with_define("EXTRA");
    assert!(on_project(&modified).unwrap());

    let content = fs::read_to_string(tmp.path().join("app/app.make")).unwrap();
    assert!(predicate::str::contains("-DEXTRA").eval(&content));
}

// ============================================================================
// failure behavior
// ============================================================================

#[test]
fn test_missing_toolchain_leaves_no_file_behind() {
    let tmp = temp_dir();
    let broken = Project::new("broken", tmp.path())
        .with_file("src/main.c")
        .with_configuration(Configuration::new("Debug"));

    let registry = ActionRegistry::with_builtins().unwrap();
    let on_project = registry.lookup("gmake").unwrap().on_project.unwrap();

    let err = on_project(&broken).unwrap_err();
    let export_err = err.downcast_ref::<ExportError>().unwrap();
    assert!(matches!(export_err, ExportError::ToolchainUnavailable { .. }));
    assert!(!make::project_makefile_path(&broken).exists());
}

// ============================================================================
// clean hooks
// ============================================================================

#[test]
fn test_clean_hooks_remove_generated_files() {
    let tmp = temp_dir();
    let wks = demo_workspace(tmp.path());

    let registry = ActionRegistry::with_builtins().unwrap();
    let action = registry.lookup("gmake").unwrap();

    action.on_workspace.unwrap()(&wks).unwrap();
    for project in &wks.projects {
        action.on_project.unwrap()(project).unwrap();
    }

    action.on_clean_workspace.unwrap()(&wks).unwrap();
    for project in &wks.projects {
        action.on_clean_project.unwrap()(project).unwrap();
        action.on_clean_target.unwrap()(project).unwrap();
    }

    assert!(!tmp.path().join("Makefile").exists());
    assert!(!tmp.path().join("engine/engine.make").exists());
    assert!(!tmp.path().join("app/app.make").exists());
}
