//! Capability/upsell gate.
//!
//! The gate answers whether a capability set is satisfied by the current
//! grant, and whether an unsatisfied set could plausibly be unlocked via an
//! upsell flow. The trait seam keeps the dispatch pipeline testable against
//! a fixed grant; [`StaticGate`] is the stock implementation.

use std::collections::BTreeSet;

use parking_lot::Mutex;

use crate::capability::CapabilitySet;

/// Descriptor handed to the upsell flow when dispatch finds nothing granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsellPrompt {
	/// The extension point whose invocation was blocked.
	pub point: String,
	/// Capability names missing from the grant, deduplicated and sorted.
	pub missing: Vec<String>,
}

/// Answers capability questions for the current account grant.
pub trait CapabilityGate {
	/// True when every capability in `set` is granted. Empty sets are
	/// always satisfied.
	fn has(&self, set: &CapabilitySet) -> bool;

	/// True when `set` is unsatisfied but the whole gap could be unlocked
	/// via upsell. Must be `false` for the empty set.
	fn enabled(&self, set: &CapabilitySet) -> bool;

	/// True when an action requiring `set` should be shown at all:
	/// satisfied, or worth prompting an upgrade for.
	fn visible(&self, set: &CapabilitySet) -> bool {
		self.has(set) || self.enabled(set)
	}

	/// True when at least one of `sets` is satisfied.
	fn any(&self, sets: &[CapabilitySet]) -> bool {
		sets.iter().any(|set| self.has(set))
	}

	/// Capability names missing across all of `sets`, sorted and deduped.
	fn missing(&self, sets: &[CapabilitySet]) -> Vec<String>;

	/// Fires the upsell prompt event.
	fn trigger(&self, prompt: UpsellPrompt);
}

/// Gate over a fixed grant, the normal runtime implementation.
///
/// Prompts are recorded so callers (and tests) can observe what fired.
#[derive(Debug, Default)]
pub struct StaticGate {
	granted: BTreeSet<String>,
	upsellable: BTreeSet<String>,
	prompts: Mutex<Vec<UpsellPrompt>>,
}

impl StaticGate {
	/// Creates a gate with nothing granted.
	pub fn new() -> Self {
		Self::default()
	}

	/// Grants a capability.
	pub fn grant(mut self, name: impl Into<String>) -> Self {
		self.granted.insert(name.into());
		self
	}

	/// Marks a capability as purchasable via upsell.
	pub fn upsell(mut self, name: impl Into<String>) -> Self {
		self.upsellable.insert(name.into());
		self
	}

	/// Creates a gate from granted and upsellable name lists.
	pub fn from_lists<I, J>(granted: I, upsellable: J) -> Self
	where
		I: IntoIterator<Item = String>,
		J: IntoIterator<Item = String>,
	{
		Self {
			granted: granted.into_iter().collect(),
			upsellable: upsellable.into_iter().collect(),
			prompts: Mutex::new(Vec::new()),
		}
	}

	/// Prompts fired so far, oldest first.
	pub fn prompts(&self) -> Vec<UpsellPrompt> {
		self.prompts.lock().clone()
	}
}

impl CapabilityGate for StaticGate {
	fn has(&self, set: &CapabilitySet) -> bool {
		set.iter().all(|name| self.granted.contains(name))
	}

	fn enabled(&self, set: &CapabilitySet) -> bool {
		if set.is_empty() || self.has(set) {
			return false;
		}
		set.iter()
			.filter(|name| !self.granted.contains(*name))
			.all(|name| self.upsellable.contains(name))
	}

	fn missing(&self, sets: &[CapabilitySet]) -> Vec<String> {
		let mut missing: Vec<String> = sets
			.iter()
			.flat_map(CapabilitySet::iter)
			.filter(|name| !self.granted.contains(*name))
			.map(str::to_string)
			.collect();
		missing.sort_unstable();
		missing.dedup();
		missing
	}

	fn trigger(&self, prompt: UpsellPrompt) {
		tracing::info!(point = %prompt.point, missing = ?prompt.missing, "upsell prompt");
		self.prompts.lock().push(prompt);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_set_is_satisfied_never_upsellable() {
		let gate = StaticGate::new().upsell("infostore");
		let empty = CapabilitySet::empty();
		assert!(gate.has(&empty));
		assert!(!gate.enabled(&empty));
		assert!(gate.visible(&empty));
	}

	#[test]
	fn enabled_requires_full_gap_coverage() {
		let gate = StaticGate::new().grant("mail").upsell("infostore");
		assert!(gate.enabled(&CapabilitySet::parse("mail infostore")));
		// "calendar" is neither granted nor purchasable.
		assert!(!gate.enabled(&CapabilitySet::parse("infostore calendar")));
	}

	#[test]
	fn visible_covers_granted_and_promptable() {
		let gate = StaticGate::new().grant("mail").upsell("infostore");
		assert!(gate.visible(&CapabilitySet::parse("mail")));
		assert!(gate.visible(&CapabilitySet::parse("infostore")));
		assert!(!gate.visible(&CapabilitySet::parse("calendar")));
	}

	#[test]
	fn missing_is_sorted_and_deduped() {
		let gate = StaticGate::new().grant("mail");
		let sets = [CapabilitySet::parse("mail infostore"), CapabilitySet::parse("calendar infostore")];
		assert_eq!(gate.missing(&sets), vec!["calendar".to_string(), "infostore".to_string()]);
	}
}
