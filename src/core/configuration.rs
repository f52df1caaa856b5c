//! Build configurations - named variants layered on top of a project.

use std::path::PathBuf;

use crate::exporter::toolset::Stage;

/// A named build variant (e.g. Debug, Release) belonging to exactly one
/// project.
///
/// Every list here is an *override*: additional values layered on top of
/// the owning project's baseline. Merging happens in the generated build
/// file, not in the model.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    /// Display name; declaration case is preserved in generated output
    /// except where a backend requires a folded form
    pub name: String,

    /// Additional preprocessor defines
    pub defines: Vec<String>,

    /// Additional include search directories
    pub include_dirs: Vec<PathBuf>,

    /// Additional libraries to link
    pub libs: Vec<String>,

    /// Additional preprocessor flags
    pub cpp_flags: Vec<String>,

    /// Additional C compile flags
    pub c_flags: Vec<String>,

    /// Additional C++ compile flags
    pub cxx_flags: Vec<String>,

    /// Additional link flags
    pub link_flags: Vec<String>,

    /// Commands run before compilation starts
    pub prebuild_commands: Vec<String>,

    /// Commands run after compilation, before the link step
    pub prelink_commands: Vec<String>,

    /// Commands run after the target is produced
    pub postbuild_commands: Vec<String>,
}

impl Configuration {
    /// Create a configuration with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Configuration {
            name: name.into(),
            ..Configuration::default()
        }
    }

    /// Add a preprocessor define.
    pub fn with_define(mut self, define: impl Into<String>) -> Self {
        self.defines.push(define.into());
        self
    }

    /// Add an include search directory.
    pub fn with_include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dirs.push(dir.into());
        self
    }

    /// Add a library to link.
    pub fn with_lib(mut self, lib: impl Into<String>) -> Self {
        self.libs.push(lib.into());
        self
    }

    /// Add a flag for one toolchain stage.
    pub fn with_flag(mut self, stage: Stage, flag: impl Into<String>) -> Self {
        self.flags_mut(stage).push(flag.into());
        self
    }

    /// Add a pre-build command.
    pub fn with_prebuild_command(mut self, command: impl Into<String>) -> Self {
        self.prebuild_commands.push(command.into());
        self
    }

    /// Add a pre-link command.
    pub fn with_prelink_command(mut self, command: impl Into<String>) -> Self {
        self.prelink_commands.push(command.into());
        self
    }

    /// Add a post-build command.
    pub fn with_postbuild_command(mut self, command: impl Into<String>) -> Self {
        self.postbuild_commands.push(command.into());
        self
    }

    /// Flag override list for one stage.
    pub fn flags(&self, stage: Stage) -> &[String] {
        match stage {
            Stage::Preprocessor => &self.cpp_flags,
            Stage::C => &self.c_flags,
            Stage::Cxx => &self.cxx_flags,
            Stage::Link => &self.link_flags,
        }
    }

    fn flags_mut(&mut self, stage: Stage) -> &mut Vec<String> {
        match stage {
            Stage::Preprocessor => &mut self.cpp_flags,
            Stage::C => &mut self.c_flags,
            Stage::Cxx => &mut self.cxx_flags,
            Stage::Link => &mut self.link_flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accumulates_overrides() {
        let config = Configuration::new("Debug")
            .with_define("DEBUG")
            .with_include_dir("gen")
            .with_flag(Stage::C, "-g")
            .with_flag(Stage::Link, "-rdynamic");

        assert_eq!(config.name, "Debug");
        assert_eq!(config.defines, vec!["DEBUG"]);
        assert_eq!(config.flags(Stage::C), ["-g"]);
        assert_eq!(config.flags(Stage::Link), ["-rdynamic"]);
        assert!(config.flags(Stage::Cxx).is_empty());
    }

    #[test]
    fn test_flag_order_is_preserved() {
        let config = Configuration::new("Release")
            .with_flag(Stage::Cxx, "-O2")
            .with_flag(Stage::Cxx, "-fno-rtti")
            .with_flag(Stage::Cxx, "-O2");

        // Duplicates survive; order is declaration order.
        assert_eq!(config.flags(Stage::Cxx), ["-O2", "-fno-rtti", "-O2"]);
    }
}
