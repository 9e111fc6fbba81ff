//! Static predicate chains.
//!
//! Availability looks only at action metadata (toggle, device, capability
//! visibility) and is checked before anything baton-specific. Eligibility
//! looks at the baton (propagation, `every`, collection facts, folder
//! permissions). Both always run before any dynamic matcher, and both fail
//! closed: a missing folder context or a poisoned guard disables the
//! action, never the invocation.

use crate::baton::{Baton, item_scope};
use crate::def::Action;
use crate::folder::FolderProvider;
use crate::gate::CapabilityGate;
use switchboard_primitives::DeviceFacts;

/// Static availability: pure predicate over action metadata.
pub fn is_available(gate: &dyn CapabilityGate, device: &DeviceFacts, action: &Action) -> bool {
	if action.toggle() == Some(false) {
		return false;
	}

	if let Some(guard) = action.device_guard() {
		let matched = guard.check(&|name: &str, qualifier: Option<&str>| qualifier.is_none() && device.test(name));
		if !matched {
			return false;
		}
	}

	gate.visible(action.capabilities())
}

/// Static eligibility over the baton. Evaluated only for available actions.
pub fn is_eligible(baton: &Baton, folders: &dyn FolderProvider, action: &Action) -> bool {
	if baton.is_propagation_stopped() {
		return false;
	}

	if let Some(guard) = action.every_guard()
		&& !baton.data().iter().all(|item| guard.check(&item_scope(item)))
	{
		return false;
	}

	if let Some(guard) = action.collection_guard()
		&& !baton.collection().check(guard)
	{
		return false;
	}

	if let Some(guard) = action.folder_guard() {
		let Some(id) = baton.folder_id() else {
			tracing::error!(action = action.id(), "folder guard without a folder id, failing closed");
			return false;
		};
		let Some(folder) = folders.get(id) else {
			tracing::error!(action = action.id(), folder = id, "folder guard against unresolved folder, failing closed");
			return false;
		};
		if !guard.check(&folder.scope()) {
			return false;
		}
	}

	true
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::def::Action;
	use crate::folder::{Folder, FolderRights, MemFolders};
	use crate::gate::StaticGate;
	use switchboard_primitives::{DeviceClass, DeviceFacts};

	fn desktop() -> DeviceFacts {
		DeviceFacts::new(DeviceClass::Desktop)
	}

	#[test]
	fn toggle_off_hides() {
		let gate = StaticGate::new();
		let action = Action::builder("t").toggle(false).build();
		assert!(!is_available(&gate, &desktop(), &action));

		let action = Action::builder("t").toggle(true).build();
		assert!(is_available(&gate, &desktop(), &action));
	}

	#[test]
	fn device_guard_matches_class() {
		let gate = StaticGate::new();
		let phone_only = Action::builder("a").device("smartphone").build();
		assert!(!is_available(&gate, &desktop(), &phone_only));
		assert!(is_available(&gate, &DeviceFacts::new(DeviceClass::Smartphone), &phone_only));

		let not_phone = Action::builder("b").device("!smartphone").build();
		assert!(is_available(&gate, &desktop(), &not_phone));
	}

	#[test]
	fn capability_visibility_gates() {
		let gate = StaticGate::new().grant("mail").upsell("infostore");
		assert!(is_available(&gate, &desktop(), &Action::builder("a").capabilities("mail").build()));
		assert!(is_available(&gate, &desktop(), &Action::builder("b").capabilities("infostore").build()));
		assert!(!is_available(&gate, &desktop(), &Action::builder("c").capabilities("calendar").build()));
	}

	#[test]
	fn propagation_stop_blocks_everything() {
		let folders = MemFolders::new();
		let baton = Baton::new(vec![json!({"id": "1"})]);
		let action = Action::builder("a").build();
		assert!(is_eligible(&baton, &folders, &action));

		baton.stop_propagation();
		assert!(!is_eligible(&baton, &folders, &action));
	}

	#[test]
	fn every_guard_requires_all_items() {
		let folders = MemFolders::new();
		let action = Action::builder("a").every("subject").build();

		let baton = Baton::new(vec![json!({"subject": "x"}), json!({"subject": "y"})]);
		assert!(is_eligible(&baton, &folders, &action));

		let baton = Baton::new(vec![json!({"subject": "x"}), json!({"other": 1})]);
		assert!(!is_eligible(&baton, &folders, &action));
	}

	#[test]
	fn malformed_every_guard_fails_closed() {
		let folders = MemFolders::new();
		let action = Action::builder("a").every("subject &&").build();
		let baton = Baton::new(vec![json!({"subject": "x"})]);
		assert!(!is_eligible(&baton, &folders, &action));
	}

	#[tokio::test]
	async fn folder_guard_checks_permission_bits() {
		let folders = MemFolders::new();
		folders.insert(Folder::new("7", "mail", FolderRights::READ | FolderRights::DELETE));

		let action = Action::builder("del").folder("delete && !is:infostore").build();
		let baton = Baton::new(vec![json!({"id": "1", "folder_id": "7"})]);
		assert!(is_eligible(&baton, &folders, &action));

		let readonly = Action::builder("w").folder("write").build();
		assert!(!is_eligible(&baton, &folders, &readonly));
	}

	#[test]
	fn folder_guard_without_context_fails_closed() {
		let folders = MemFolders::new();
		let action = Action::builder("del").folder("delete").build();

		// No folder id at all.
		let baton = Baton::new(vec![json!({"id": "1"})]);
		assert!(!is_eligible(&baton, &folders, &action));

		// Folder id known but not resolved by the provider.
		let baton = Baton::new(vec![json!({"id": "1", "folder_id": "7"})]);
		assert!(!is_eligible(&baton, &folders, &action));
	}
}
