//! Extension points, gated action records, and priority-ordered dispatch.
//!
//! The core of the framework: feature modules register [`Action`] records on
//! named extension points; a user gesture produces a [`Baton`] (selection +
//! derived [`Collection`] facts); [`Platform::invoke`] walks the point in
//! priority order through the availability and eligibility filters and each
//! action's dynamic matcher, and fires exactly one handler — first match
//! wins.
//!
//! # Modules
//!
//! - [`point`] - Named, ordered extension point registry
//! - [`def`] - Action records, handler and matcher sum types
//! - [`capability`] / [`gate`] - Capability sets and the upsell gate
//! - [`folder`] - Folder permission model
//! - [`baton`] / [`collection`] - Per-invocation context and derived facts
//! - [`filters`] - Static availability/eligibility predicate chains
//! - [`invoke`] - The invoker (guarded dispatch table)
//! - [`settings`] - Platform settings document (capabilities, toggles, device)

pub mod baton;
pub mod capability;
pub mod collection;
pub mod def;
pub mod error;
pub mod filters;
pub mod folder;
pub mod gate;
pub mod invoke;
pub mod point;
pub mod settings;

#[cfg(test)]
mod tests;

pub use baton::Baton;
pub use capability::CapabilitySet;
pub use collection::Collection;
pub use def::{Action, ActionBuilder, Handler, LegacyMatch, Matcher};
pub use error::{HandlerError, MatchError, SettingsError};
pub use filters::{is_available, is_eligible};
pub use folder::{Folder, FolderProvider, FolderRights, MemFolders};
pub use gate::{CapabilityGate, StaticGate, UpsellPrompt};
pub use invoke::{DEFAULT_ACTION, InvokeMode, ModuleRegistry, Platform};
pub use point::{PointEntry, Registry};
pub use settings::Settings;

// Re-exported so downstream crates spell guard scopes without naming the
// expression crate directly.
pub use switchboard_expr::{Guard, Scope};
pub use switchboard_primitives::{DeviceClass, DeviceFacts};
