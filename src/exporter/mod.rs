//! Export pipeline - turning the build model into backend output.
//!
//! The pieces compose in one direction: a driver looks an [`Action`] up in
//! the [`ActionRegistry`] and invokes its lifecycle hooks; a hook renders
//! scopes through ordered element pipelines into a [`DocumentBuilder`];
//! [`output::export`] diffs the rendered text against disk and writes only
//! on change. Rendering is pure - the final write is the only side effect.

pub mod action;
pub mod document;
pub mod errors;
pub mod make;
pub mod output;
pub mod registry;
pub mod scope;
pub mod toolset;

pub use action::{Action, TargetOs};
pub use document::DocumentBuilder;
pub use errors::ExportError;
pub use registry::ActionRegistry;
pub use scope::{ConfigurationScope, OutputDirs, ProjectScope, Scope};
