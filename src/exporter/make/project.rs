//! Project makefile generation.
//!
//! A project makefile is produced by an ordered pipeline of element
//! generators, each appending one contiguous block to the shared
//! document. The same element bodies serve both scope shapes: run against
//! the aggregate `ProjectScope` they emit the resolved baseline with
//! assignment operators, run against a `ConfigurationScope` inside a
//! cascade branch they emit that configuration's overrides with append
//! operators.
//!
//! Element order is a correctness requirement, not a style choice: the
//! configuration cascade defines `TARGETDIR`, `OBJDIR`, and the
//! pre/post-build command variables that the link template and the named
//! rules expand later.

use std::path::Path;

use anyhow::Result;

use crate::core::files::FileKind;
use crate::core::project::{Project, ProjectKind};
use crate::core::Language;
use crate::exporter::document::DocumentBuilder;
use crate::exporter::errors::ExportError;
use crate::exporter::scope::{ConfigurationScope, Scope};
use crate::exporter::toolset::Stage;
use crate::util;

/// One element generator: consumes a scope, appends one block of output.
pub type Element = fn(&mut DocumentBuilder, &dyn Scope) -> Result<()>;

/// Pipeline run once per project, against the aggregate scope.
pub const PROJECT_ELEMENTS: &[Element] = &[
    emit_header,
    emit_default_config,
    emit_verbose_guard,
    emit_shell_detect,
    emit_tool_guards,
    emit_defines,
    emit_includes,
    emit_flags,
    emit_libs,
    emit_directories,
    emit_configuration_cascade,
    emit_link_command,
    emit_objects,
    emit_rules,
    emit_file_rules,
    emit_dependency_include,
];

/// Pipeline run once per configuration, inside its cascade branch.
pub const CONFIG_ELEMENTS: &[Element] = &[
    emit_directories,
    emit_defines,
    emit_includes,
    emit_flags,
    emit_libs,
    emit_command_blocks,
];

/// Run every element in order against one scope.
///
/// The first failing element aborts the rest; callers must not persist
/// anything rendered so far.
pub fn run_pipeline(
    elements: &[Element],
    doc: &mut DocumentBuilder,
    scope: &dyn Scope,
) -> Result<()> {
    for element in elements {
        element(doc, scope)?;
    }
    Ok(())
}

/// Emit a make variable: assignment at the aggregate scope, append at the
/// configuration scope. Empty values still produce an explicit line so
/// downstream references never observe an undefined variable.
fn write_var(doc: &mut DocumentBuilder, scope: &dyn Scope, name: &str, value: &str) {
    if scope.is_aggregate() {
        write_assign(doc, name, value);
    } else if value.is_empty() {
        doc.line(format!("{name:<9}+="));
    } else {
        doc.line(format!("{name:<9}+= {value}"));
    }
}

/// Emit a plain variable assignment.
fn write_assign(doc: &mut DocumentBuilder, name: &str, value: &str) {
    if value.is_empty() {
        doc.line(format!("{name:<9} ="));
    } else {
        doc.line(format!("{name:<9} = {value}"));
    }
}

/// Render a model path relative to the owning project's location.
///
/// Declared-relative paths are already project-relative and pass through;
/// absolute paths are relativized so generated files stay portable.
fn project_relative(project: &Project, path: &Path) -> String {
    let rel = if path.is_absolute() {
        util::fs::relative_path(&project.location, path)
    } else {
        path.to_path_buf()
    };
    super::make_path(&rel)
}

/// Target file name for a project, per kind and toolset naming.
fn target_file_name(scope: &dyn Scope) -> Result<String, ExportError> {
    let project = scope.project();
    let linker = scope.linker()?;
    Ok(match project.kind {
        ProjectKind::StaticLib => format!(
            "{}{}.{}",
            linker.static_lib_prefix(),
            project.name,
            linker.static_lib_extension()
        ),
        ProjectKind::SharedLib => format!(
            "{}{}.{}",
            linker.shared_lib_prefix(),
            project.name,
            linker.shared_lib_extension()
        ),
        ProjectKind::ConsoleApp | ProjectKind::WindowedApp => {
            let ext = linker.exe_extension();
            if ext.is_empty() {
                project.name.clone()
            } else {
                format!("{}.{}", project.name, ext)
            }
        }
    })
}

fn emit_header(doc: &mut DocumentBuilder, _scope: &dyn Scope) -> Result<()> {
    doc.line("# GNU Make project makefile autogenerated by Slipway");
    doc.blank();
    Ok(())
}

fn emit_default_config(doc: &mut DocumentBuilder, scope: &dyn Scope) -> Result<()> {
    let Some(first) = scope.project().configurations.first() else {
        return Ok(());
    };
    doc.line("ifndef config");
    doc.indent();
    doc.line(format!("config={}", first.name.to_lowercase()));
    doc.outdent();
    doc.line("endif");
    doc.blank();
    Ok(())
}

fn emit_verbose_guard(doc: &mut DocumentBuilder, _scope: &dyn Scope) -> Result<()> {
    doc.line("ifndef verbose");
    doc.indent();
    doc.line("SILENT = @");
    doc.outdent();
    doc.line("endif");
    doc.blank();
    Ok(())
}

/// Probe the shell flavor at make time. `ComSpec` is only set by Windows
/// shells, so finding `cmd` in it selects the msdos command forms.
fn emit_shell_detect(doc: &mut DocumentBuilder, _scope: &dyn Scope) -> Result<()> {
    doc.line("SHELLTYPE := posix");
    doc.line("ifeq (cmd,$(findstring cmd,$(ComSpec)))");
    doc.indent();
    doc.line("SHELLTYPE := msdos");
    doc.outdent();
    doc.line("endif");
    doc.blank();
    Ok(())
}

fn emit_tool_guards(doc: &mut DocumentBuilder, scope: &dyn Scope) -> Result<()> {
    let toolset = scope.compiler()?;
    for (var, program) in [
        ("CC", toolset.cc()),
        ("CXX", toolset.cxx()),
        ("AR", toolset.ar()),
    ] {
        doc.line(format!("ifndef {var}"));
        doc.indent();
        doc.line(format!("{var} = {program}"));
        doc.outdent();
        doc.line("endif");
    }
    doc.blank();
    Ok(())
}

fn emit_defines(doc: &mut DocumentBuilder, scope: &dyn Scope) -> Result<()> {
    let tokens: Vec<String> = scope.defines().iter().map(|d| format!("-D{d}")).collect();
    write_var(doc, scope, "DEFINES", &tokens.join(" "));
    Ok(())
}

fn emit_includes(doc: &mut DocumentBuilder, scope: &dyn Scope) -> Result<()> {
    let project = scope.project();
    let tokens: Vec<String> = scope
        .include_dirs()
        .iter()
        .map(|dir| format!("-I{}", project_relative(project, dir)))
        .collect();
    write_var(doc, scope, "INCLUDES", &tokens.join(" "));
    Ok(())
}

fn emit_flags(doc: &mut DocumentBuilder, scope: &dyn Scope) -> Result<()> {
    let compiler = scope.compiler()?;
    let linker = scope.linker()?;

    if scope.is_aggregate() {
        let mut cpp = compiler.flags_for(scope, Stage::Preprocessor);
        cpp.push("$(DEFINES)".to_string());
        cpp.push("$(INCLUDES)".to_string());
        write_var(doc, scope, "CPPFLAGS", &cpp.join(" "));

        let mut c = vec!["$(CPPFLAGS)".to_string()];
        c.extend(compiler.flags_for(scope, Stage::C));
        write_var(doc, scope, "CFLAGS", &c.join(" "));

        let mut cxx = vec!["$(CFLAGS)".to_string()];
        cxx.extend(compiler.flags_for(scope, Stage::Cxx));
        write_var(doc, scope, "CXXFLAGS", &cxx.join(" "));

        write_var(doc, scope, "LDFLAGS", &linker.flags_for(scope, Stage::Link).join(" "));
    } else {
        write_var(
            doc,
            scope,
            "CPPFLAGS",
            &compiler.flags_for(scope, Stage::Preprocessor).join(" "),
        );
        write_var(doc, scope, "CFLAGS", &compiler.flags_for(scope, Stage::C).join(" "));
        write_var(doc, scope, "CXXFLAGS", &compiler.flags_for(scope, Stage::Cxx).join(" "));
        write_var(doc, scope, "LDFLAGS", &linker.flags_for(scope, Stage::Link).join(" "));
    }
    Ok(())
}

fn emit_libs(doc: &mut DocumentBuilder, scope: &dyn Scope) -> Result<()> {
    let tokens: Vec<String> = scope.libs().iter().map(|lib| format!("-l{lib}")).collect();
    write_var(doc, scope, "LIBS", &tokens.join(" "));
    // Sibling-target dependencies; kept defined so the target rule can
    // list the variable unconditionally.
    write_var(doc, scope, "LDDEPS", "");
    Ok(())
}

fn emit_directories(doc: &mut DocumentBuilder, scope: &dyn Scope) -> Result<()> {
    match scope.directories() {
        // Aggregate scope: the layout is configuration-specific, so only
        // reserve the variables.
        None => {
            write_assign(doc, "TARGETDIR", "");
            write_assign(doc, "TARGET", "");
            write_assign(doc, "OBJDIR", "");
        }
        Some(dirs) => {
            write_assign(doc, "TARGETDIR", &dirs.target);
            write_assign(
                doc,
                "TARGET",
                &format!("$(TARGETDIR)/{}", target_file_name(scope)?),
            );
            write_assign(doc, "OBJDIR", &dirs.objects);
        }
    }
    Ok(())
}

/// Walk declared configurations in order and emit one mutually exclusive
/// conditional chain, each branch body produced by the configuration
/// pipeline one indentation level deeper.
fn emit_configuration_cascade(doc: &mut DocumentBuilder, scope: &dyn Scope) -> Result<()> {
    let project = scope.project();
    if project.configurations.is_empty() {
        return Ok(());
    }

    doc.blank();
    let entry_level = doc.level();
    for (index, configuration) in project.configurations.iter().enumerate() {
        let keyword = if index == 0 { "ifeq" } else { "else ifeq" };
        doc.line(format!(
            "{keyword} ($(config),{})",
            configuration.name.to_lowercase()
        ));
        doc.indent();
        let branch = ConfigurationScope::new(project, configuration);
        run_pipeline(CONFIG_ELEMENTS, doc, &branch)?;
        doc.outdent();
    }
    doc.line("endif");
    debug_assert_eq!(doc.level(), entry_level);
    Ok(())
}

fn emit_link_command(doc: &mut DocumentBuilder, scope: &dyn Scope) -> Result<()> {
    // The template only expands make variables, but a project with no
    // linker must fail here rather than emit an unusable rule.
    scope.linker()?;

    let project = scope.project();
    let driver = match project.language {
        Language::C => "$(CC)",
        Language::Cxx => "$(CXX)",
    };
    let command = match project.kind {
        ProjectKind::StaticLib => "$(AR) -rcs \"$(TARGET)\" $(OBJECTS)".to_string(),
        ProjectKind::SharedLib => format!(
            "{driver} -shared -o \"$(TARGET)\" $(OBJECTS) $(LDFLAGS) $(LIBS) $(LDDEPS)"
        ),
        ProjectKind::ConsoleApp | ProjectKind::WindowedApp => {
            format!("{driver} -o \"$(TARGET)\" $(OBJECTS) $(LDFLAGS) $(LIBS) $(LDDEPS)")
        }
    };

    doc.blank();
    write_assign(doc, "LINKCMD", &command);
    Ok(())
}

fn emit_objects(doc: &mut DocumentBuilder, scope: &dyn Scope) -> Result<()> {
    let compiler = scope.compiler()?;
    doc.blank();
    doc.line("OBJECTS := \\");
    for file in scope.project().source_files() {
        if let Some(object) = file.object_name(compiler.object_extension()) {
            doc.raw_line(format!("\t$(OBJDIR)/{object} \\"));
        }
    }
    Ok(())
}

fn emit_rules(doc: &mut DocumentBuilder, scope: &dyn Scope) -> Result<()> {
    let name = scope.display_name();

    doc.blank();
    doc.line(".PHONY: all clean prebuild prelink");
    doc.blank();
    doc.line("all: $(TARGETDIR) $(OBJDIR) prebuild prelink $(TARGET)");
    doc.raw_line("\t@:");
    doc.blank();

    doc.line("$(TARGET): $(OBJECTS) $(LDDEPS)");
    doc.raw_line(format!("\t@echo Linking {name}"));
    doc.raw_line("\t$(SILENT) $(LINKCMD)");
    doc.raw_line("\t$(POSTBUILDCMDS)");
    doc.blank();

    for dir in ["$(TARGETDIR)", "$(OBJDIR)"] {
        doc.line(format!("{dir}:"));
        doc.raw_line(format!("\t@echo Creating {dir}"));
        doc.line("ifeq (posix,$(SHELLTYPE))");
        doc.raw_line(format!("\t$(SILENT) mkdir -p {dir}"));
        doc.line("else");
        doc.raw_line(format!("\t$(SILENT) mkdir $(subst /,\\\\,{dir})"));
        doc.line("endif");
        doc.blank();
    }

    doc.line("clean:");
    doc.raw_line(format!("\t@echo Cleaning {name}"));
    doc.line("ifeq (posix,$(SHELLTYPE))");
    doc.raw_line("\t$(SILENT) rm -f  $(TARGET)");
    doc.raw_line("\t$(SILENT) rm -rf $(OBJDIR)");
    doc.line("else");
    doc.raw_line("\t$(SILENT) if exist $(subst /,\\\\,$(TARGET)) del $(subst /,\\\\,$(TARGET))");
    doc.raw_line("\t$(SILENT) if exist $(subst /,\\\\,$(OBJDIR)) rmdir /s /q $(subst /,\\\\,$(OBJDIR))");
    doc.line("endif");
    doc.blank();

    doc.line("prebuild:");
    doc.raw_line("\t$(PREBUILDCMDS)");
    doc.blank();
    doc.line("prelink:");
    doc.raw_line("\t$(PRELINKCMDS)");
    Ok(())
}

fn emit_file_rules(doc: &mut DocumentBuilder, scope: &dyn Scope) -> Result<()> {
    let project = scope.project();
    let compiler = scope.compiler()?;

    for file in project.source_files() {
        let Some(object) = file.object_name(compiler.object_extension()) else {
            continue;
        };
        let dependency = project_relative(project, &file.path);

        doc.blank();
        doc.line(format!("$(OBJDIR)/{object}: {dependency}"));
        doc.raw_line("\t@echo $(notdir $<)");
        match file.kind() {
            FileKind::CxxSource => {
                doc.raw_line("\t$(SILENT) $(CXX) $(CXXFLAGS) -o \"$@\" -c \"$<\"");
            }
            _ => {
                doc.raw_line("\t$(SILENT) $(CC) $(CFLAGS) -o \"$@\" -c \"$<\"");
            }
        }
    }
    Ok(())
}

fn emit_dependency_include(doc: &mut DocumentBuilder, scope: &dyn Scope) -> Result<()> {
    let compiler = scope.compiler()?;
    doc.blank();
    doc.line(format!(
        "-include $(OBJECTS:%.{}=%.d)",
        compiler.object_extension()
    ));
    Ok(())
}

fn emit_command_blocks(doc: &mut DocumentBuilder, scope: &dyn Scope) -> Result<()> {
    let Some(configuration) = scope.configuration() else {
        return Ok(());
    };
    let blocks: [(&str, &str, &[String]); 3] = [
        ("PREBUILDCMDS", "pre-build", &configuration.prebuild_commands),
        ("PRELINKCMDS", "pre-link", &configuration.prelink_commands),
        ("POSTBUILDCMDS", "post-build", &configuration.postbuild_commands),
    ];
    for (name, label, commands) in blocks {
        doc.line(format!("define {name}"));
        if !commands.is_empty() {
            doc.raw_line(format!("\t@echo Running {label} commands"));
            for command in commands {
                doc.raw_line(format!("\t{command}"));
            }
        }
        doc.line("endef");
    }
    Ok(())
}
