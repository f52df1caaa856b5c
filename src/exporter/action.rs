//! Action descriptors - the pluggable backend surface.
//!
//! An action bundles everything a driver needs to dispatch an export:
//! identity and display metadata, capability constraints (which project
//! kinds, languages, and toolset families the backend understands), and
//! the lifecycle hooks that do the actual generation. The capability lists
//! are carried as metadata for drivers to consult; this module never
//! enforces them.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::project::{Project, ProjectKind, Rule};
use crate::core::workspace::Workspace;
use crate::core::Language;
use crate::exporter::toolset::ToolsetFamily;

/// Export hook for a whole workspace; returns whether output changed.
pub type WorkspaceHook = fn(&Workspace) -> Result<bool>;

/// Export hook for one project; returns whether output changed.
pub type ProjectHook = fn(&Project) -> Result<bool>;

/// Export hook for a custom rule; returns whether output changed.
pub type RuleHook = fn(&Rule) -> Result<bool>;

/// Clean hook removing workspace-level generated files.
pub type CleanWorkspaceHook = fn(&Workspace) -> Result<()>;

/// Clean hook removing project-level generated files.
pub type CleanProjectHook = fn(&Project) -> Result<()>;

/// Clean hook removing a project's built artifacts.
pub type CleanTargetHook = fn(&Project) -> Result<()>;

/// Operating system an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Windows,
    Linux,
    MacOs,
    Bsd,
}

impl TargetOs {
    /// Get the OS name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetOs::Windows => "windows",
            TargetOs::Linux => "linux",
            TargetOs::MacOs => "macos",
            TargetOs::Bsd => "bsd",
        }
    }
}

impl std::fmt::Display for TargetOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable descriptor of one output backend.
///
/// Created once at registration time and never mutated afterwards; hooks
/// are plain function pointers so descriptors stay `'static` and cheap to
/// clone.
#[derive(Debug, Clone)]
pub struct Action {
    /// Unique trigger name the driver selects the action by
    pub trigger: String,

    /// Short display name
    pub shortname: String,

    /// One-line description for listings
    pub description: String,

    /// Target OS; `None` when the generated output is OS-neutral
    pub os: Option<TargetOs>,

    /// Project kinds this backend can express
    pub valid_kinds: Vec<ProjectKind>,

    /// Languages this backend can express
    pub valid_languages: Vec<Language>,

    /// Toolset families this backend can drive
    pub valid_tools: Vec<ToolsetFamily>,

    /// Workspace export hook
    pub on_workspace: Option<WorkspaceHook>,

    /// Project export hook
    pub on_project: Option<ProjectHook>,

    /// Custom-rule export hook
    pub on_rule: Option<RuleHook>,

    /// Workspace clean hook
    pub on_clean_workspace: Option<CleanWorkspaceHook>,

    /// Project clean hook
    pub on_clean_project: Option<CleanProjectHook>,

    /// Target clean hook
    pub on_clean_target: Option<CleanTargetHook>,
}

impl Action {
    /// Check whether a project kind is declared supported.
    pub fn supports_kind(&self, kind: ProjectKind) -> bool {
        self.valid_kinds.contains(&kind)
    }

    /// Check whether a language is declared supported.
    pub fn supports_language(&self, language: Language) -> bool {
        self.valid_languages.contains(&language)
    }

    /// Check whether a toolset family is declared supported.
    pub fn supports_tool(&self, family: ToolsetFamily) -> bool {
        self.valid_tools.contains(&family)
    }
}
