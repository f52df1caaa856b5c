//! GCC/Clang toolset implementation.

use super::{Stage, Toolset, ToolsetFamily};
use crate::exporter::scope::Scope;

/// GCC-style toolset, covering the gcc and clang families.
#[derive(Debug, Clone)]
pub struct GccToolset {
    family: ToolsetFamily,
    cc: String,
    cxx: String,
    ar: String,
}

impl GccToolset {
    /// The GNU toolset (gcc / g++ / ar).
    pub fn gcc() -> Self {
        GccToolset {
            family: ToolsetFamily::Gcc,
            cc: "gcc".to_string(),
            cxx: "g++".to_string(),
            ar: "ar".to_string(),
        }
    }

    /// The Clang toolset (clang / clang++ / ar).
    pub fn clang() -> Self {
        GccToolset {
            family: ToolsetFamily::Clang,
            cc: "clang".to_string(),
            cxx: "clang++".to_string(),
            ar: "ar".to_string(),
        }
    }

    /// A GCC-style toolset with explicit program names, for cross
    /// prefixes like `arm-linux-gnueabi-gcc`.
    pub fn with_programs(
        family: ToolsetFamily,
        cc: impl Into<String>,
        cxx: impl Into<String>,
        ar: impl Into<String>,
    ) -> Self {
        GccToolset {
            family,
            cc: cc.into(),
            cxx: cxx.into(),
            ar: ar.into(),
        }
    }

    /// Family baseline tokens, emitted once at the aggregate scope.
    fn baseline(stage: Stage) -> &'static [&'static str] {
        match stage {
            // Dependency files drive the generated makefile's -include.
            Stage::Preprocessor => &["-MMD", "-MP"],
            Stage::C | Stage::Cxx | Stage::Link => &[],
        }
    }
}

impl Toolset for GccToolset {
    fn family(&self) -> ToolsetFamily {
        self.family
    }

    fn cc(&self) -> &str {
        &self.cc
    }

    fn cxx(&self) -> &str {
        &self.cxx
    }

    fn ar(&self) -> &str {
        &self.ar
    }

    fn flags_for(&self, scope: &dyn Scope, stage: Stage) -> Vec<String> {
        let mut flags = Vec::new();
        if scope.is_aggregate() {
            flags.extend(Self::baseline(stage).iter().map(|s| s.to_string()));
        }
        flags.extend(scope.flag_overrides(stage).iter().cloned());
        flags
    }

    fn object_extension(&self) -> &str {
        "o"
    }

    fn static_lib_extension(&self) -> &str {
        "a"
    }

    fn shared_lib_extension(&self) -> &str {
        "so"
    }

    fn exe_extension(&self) -> &str {
        ""
    }

    fn static_lib_prefix(&self) -> &str {
        "lib"
    }

    fn shared_lib_prefix(&self) -> &str {
        "lib"
    }
}
