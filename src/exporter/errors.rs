//! Export error types.

use std::path::PathBuf;

use thiserror::Error;

/// Error during export.
///
/// Rendering is pure until the final write, so none of these variants can
/// leave partially generated output on disk.
#[derive(Debug, Error)]
pub enum ExportError {
    /// An action with this trigger is already registered.
    #[error("an action is already registered for trigger `{trigger}`")]
    DuplicateTrigger { trigger: String },

    /// No action is registered under this trigger.
    #[error("no action registered for trigger `{trigger}`")]
    UnknownAction { trigger: String },

    /// A scope has no usable compiler or linker; the in-progress render is
    /// aborted and nothing is written.
    #[error("project `{project}` has no usable {tool}")]
    ToolchainUnavailable {
        project: String,
        tool: &'static str,
    },

    /// Reading, comparing, or writing the target path failed.
    #[error("failed to write `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
