//! Slipway - a build-description exporter for C/C++ workspaces
//!
//! This crate takes an in-memory, already-resolved description of a
//! workspace (projects, configurations, source files, toolchains) and
//! exports concrete build artifacts from it. The GNU Make backend ships
//! built in; other backends plug into the same action registry and
//! lifecycle-hook contract.

pub mod core;
pub mod exporter;
pub mod util;

pub use crate::core::{
    configuration::Configuration,
    files::SourceFile,
    language::Language,
    project::{Project, ProjectKind, Rule},
    workspace::Workspace,
};

pub use crate::exporter::toolset::{GccToolset, Stage, Toolset, ToolsetFamily};
pub use crate::exporter::{Action, ActionRegistry, DocumentBuilder, ExportError};
