//! The invoker: a priority-ordered guarded dispatch table.
//!
//! [`Platform::invoke`] runs the full gating pipeline over one extension
//! point and fires the first action that passes everything — exactly one
//! handler per invocation. `CheckOnly` mode runs the identical pipeline
//! without executing anything, for pre-flight enablement checks.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::baton::Baton;
use crate::capability::CapabilitySet;
use crate::def::{Action, Handler, SingleFn};
use crate::error::HandlerError;
use crate::filters::{is_available, is_eligible};
use crate::folder::FolderProvider;
use crate::gate::{CapabilityGate, UpsellPrompt};
use crate::point::Registry;
use switchboard_primitives::DeviceFacts;

/// Id of the synthetic default action, skipped when the baton prevented
/// default behavior.
pub const DEFAULT_ACTION: &str = "default";

/// Whether an invocation may execute a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokeMode {
	/// Normal dispatch: first passing action's handler runs.
	Dispatch,
	/// Pre-flight: same pipeline, same boolean result, no handler runs.
	CheckOnly,
}

/// Named deferred handlers, resolved when a [`Handler::Module`] action
/// dispatches.
#[derive(Default)]
pub struct ModuleRegistry {
	map: RwLock<HashMap<String, Arc<SingleFn>>>,
}

impl ModuleRegistry {
	/// Creates an empty module registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a module handler under a name.
	pub fn register(&self, name: impl Into<String>, f: impl Fn(&Baton) -> Result<(), HandlerError> + 'static) {
		self.map.write().insert(name.into(), Arc::new(f));
	}

	/// Looks a module handler up by name.
	pub fn resolve(&self, name: &str) -> Option<Arc<SingleFn>> {
		self.map.read().get(name).cloned()
	}
}

/// Bundles the collaborators one invocation needs: capability gate, device
/// facts, folder provider, module handlers, and the action registry.
pub struct Platform {
	gate: Arc<dyn CapabilityGate>,
	device: DeviceFacts,
	folders: Arc<dyn FolderProvider>,
	modules: ModuleRegistry,
	actions: Registry<Action>,
}

impl Platform {
	/// Creates a platform around a gate and folder provider.
	pub fn new(gate: Arc<dyn CapabilityGate>, folders: Arc<dyn FolderProvider>) -> Self {
		Self {
			gate,
			device: DeviceFacts::default(),
			folders,
			modules: ModuleRegistry::new(),
			actions: Registry::new(),
		}
	}

	/// Sets the runtime device facts.
	pub fn with_device(mut self, device: DeviceFacts) -> Self {
		self.device = device;
		self
	}

	/// The capability gate.
	pub fn gate(&self) -> &dyn CapabilityGate {
		self.gate.as_ref()
	}

	/// The runtime device facts.
	pub fn device(&self) -> &DeviceFacts {
		&self.device
	}

	/// The folder provider.
	pub fn folders(&self) -> &dyn FolderProvider {
		self.folders.as_ref()
	}

	/// The module handler registry.
	pub fn modules(&self) -> &ModuleRegistry {
		&self.modules
	}

	/// The action registry.
	pub fn actions(&self) -> &Registry<Action> {
		&self.actions
	}

	/// Runs the gating pipeline over `point` and dispatches the first
	/// passing action. Returns whether anything was dispatched (or, in
	/// `CheckOnly` mode, whether anything would have been).
	pub async fn invoke(&self, point: &str, baton: &mut Baton, mode: InvokeMode) -> bool {
		let list = self.actions.list(point);
		if list.is_empty() {
			return false;
		}

		// Capability pre-check across the whole point. An action with an
		// empty capability set keeps the point reachable and never counts
		// toward upsell.
		let sets: Vec<CapabilitySet> = list.iter().map(|a| a.capabilities().clone()).collect();
		if !self.gate.any(&sets) {
			let promptable = sets.iter().any(|set| !set.is_empty() && self.gate.enabled(set));
			if promptable && mode == InvokeMode::Dispatch {
				self.gate.trigger(UpsellPrompt {
					point: point.to_string(),
					missing: self.gate.missing(&sets),
				});
			}
			return false;
		}

		// Collection facts must settle before any eligibility predicate
		// reads them.
		baton.collection_mut().resolve(self.folders.as_ref()).await;

		for action in &list {
			if action.id() == DEFAULT_ACTION && baton.is_default_prevented() {
				continue;
			}
			if baton.is_disabled(point, action.id()) {
				continue;
			}
			if !is_available(self.gate.as_ref(), &self.device, action) {
				continue;
			}
			if !is_eligible(baton, self.folders.as_ref(), action) {
				continue;
			}
			if let Some(matcher) = action.matcher()
				&& !matcher.matches(baton, action.id()).await
			{
				continue;
			}

			if mode == InvokeMode::Dispatch {
				self.run_handler(point, action, baton);
			}
			return true;
		}

		false
	}

	/// Convenience: wraps raw selection data and dispatches.
	pub async fn invoke_items(&self, point: &str, items: Vec<serde_json::Value>) -> bool {
		let mut baton = Baton::new(items);
		self.invoke(point, &mut baton, InvokeMode::Dispatch).await
	}

	/// Executes the winning action's handler. Handler failures are logged
	/// with full context and absorbed: routing succeeded, so the
	/// invocation still reports `true`.
	fn run_handler(&self, point: &str, action: &Action, baton: &Baton) {
		let result = match action.handler() {
			Handler::Single(f) => f(baton),
			Handler::Multi(f) => f(baton.data(), baton),
			Handler::Module(name) => match self.modules.resolve(name) {
				Some(f) => f(baton),
				None => Err(HandlerError::new(format!("unknown handler module: {name}"))),
			},
		};

		if let Err(err) = result {
			tracing::error!(
				point,
				action = action.id(),
				items = baton.data().len(),
				folder = baton.folder_id().unwrap_or("-"),
				error = %err,
				"action handler failed",
			);
		}
	}
}
