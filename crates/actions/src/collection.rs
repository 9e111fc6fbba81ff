//! Derived facts about a selection.
//!
//! A [`Collection`] summarizes what the selected items have in common:
//! cardinality class, whether the entries are items or folder references,
//! folder homogeneity, and (after async resolution) the rights shared by
//! every containing folder. Guards written as `collection: "some && delete"`
//! are evaluated over these facts.
//!
//! Resolution must settle before an eligibility predicate reads the
//! collection; an unresolved collection fails closed.

use std::collections::BTreeSet;

use serde_json::Value;
use switchboard_expr::Guard;

use crate::folder::{FolderProvider, FolderRights};

/// Fact names answered by the collection scope.
///
/// Static facts: `none`, `one`, `some`, `multiple`, `items`, `folders`,
/// `one-folder`. Resolution adds `resolved` plus the shared-rights facts
/// `modify`, `delete`, `read-only`.
#[derive(Debug, Clone, Default)]
pub struct Collection {
	resolved: bool,
	facts: BTreeSet<&'static str>,
	folder_ids: Vec<String>,
}

/// Folder id carried by an entry, if any. Accepts string or numeric ids.
fn entry_folder_id(entry: &Value) -> Option<String> {
	match entry.get("folder_id") {
		Some(Value::String(s)) => Some(s.clone()),
		Some(Value::Number(n)) => Some(n.to_string()),
		_ => None,
	}
}

impl Collection {
	/// Computes the static facts for a selection.
	pub fn of(data: &[Value]) -> Self {
		let mut facts = BTreeSet::new();

		match data.len() {
			0 => {
				facts.insert("none");
			}
			1 => {
				facts.insert("one");
				facts.insert("some");
			}
			_ => {
				facts.insert("some");
				facts.insert("multiple");
			}
		}

		if !data.is_empty() {
			// Entries with an "id" are items; entries without one are
			// folder references.
			if data.iter().all(|entry| entry.get("id").is_some()) {
				facts.insert("items");
			}
			if data.iter().all(|entry| entry.get("id").is_none()) {
				facts.insert("folders");
			}
		}

		let mut folder_ids: Vec<String> = data.iter().filter_map(entry_folder_id).collect();
		if folder_ids.len() == data.len() && !folder_ids.is_empty() && folder_ids.iter().all(|id| id == &folder_ids[0]) {
			facts.insert("one-folder");
		}
		folder_ids.sort_unstable();
		folder_ids.dedup();

		Self {
			resolved: false,
			facts,
			folder_ids,
		}
	}

	/// True once [`resolve`](Self::resolve) has settled.
	pub fn is_resolved(&self) -> bool {
		self.resolved
	}

	/// Resolves folder-derived facts. Idempotent.
	///
	/// The shared-rights facts hold only when every containing folder was
	/// found and grants the bit; a missing folder fails closed.
	pub async fn resolve(&mut self, folders: &dyn FolderProvider) {
		if self.resolved {
			return;
		}

		let mut shared = FolderRights::all();
		let mut complete = !self.folder_ids.is_empty();
		for id in &self.folder_ids {
			match folders.fetch(id).await {
				Some(folder) => shared &= folder.rights,
				None => {
					tracing::warn!(folder = %id, "folder not resolvable, dropping shared rights");
					complete = false;
				}
			}
		}

		if complete && shared.contains(FolderRights::WRITE) {
			self.facts.insert("modify");
		} else {
			self.facts.insert("read-only");
		}
		if complete && shared.contains(FolderRights::DELETE) {
			self.facts.insert("delete");
		}

		self.facts.insert("resolved");
		self.resolved = true;
	}

	/// Answers a single fact name.
	pub fn fact(&self, name: &str) -> bool {
		self.facts.contains(name)
	}

	/// Evaluates a compiled collection guard over the facts.
	///
	/// Fails closed (with a diagnostic) while unresolved: eligibility must
	/// not read facts that have not settled yet.
	pub fn check(&self, guard: &Guard) -> bool {
		if !self.resolved {
			tracing::warn!(guard = %guard.source(), "collection guard evaluated before resolution");
			return false;
		}
		let facts = &self.facts;
		guard.check(&|name: &str, qualifier: Option<&str>| qualifier.is_none() && facts.contains(name))
	}

	/// Parses and evaluates an expression over the facts, for callers that
	/// hold a string rather than a compiled guard.
	pub fn matches(&self, expr: &str) -> bool {
		self.check(&Guard::new(expr))
	}

	/// Distinct folder ids referenced by the selection.
	pub fn folder_ids(&self) -> &[String] {
		&self.folder_ids
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::folder::{Folder, MemFolders};

	#[test]
	fn cardinality_facts() {
		assert!(Collection::of(&[]).fact("none"));

		let one = Collection::of(&[json!({"id": "1", "folder_id": "2"})]);
		assert!(one.fact("one"));
		assert!(one.fact("some"));
		assert!(!one.fact("multiple"));

		let many = Collection::of(&[json!({"id": "1"}), json!({"id": "2"})]);
		assert!(many.fact("multiple"));
		assert!(many.fact("some"));
		assert!(!many.fact("one"));
	}

	#[test]
	fn item_and_folder_classes() {
		let items = Collection::of(&[json!({"id": "1", "folder_id": "2"})]);
		assert!(items.fact("items"));
		assert!(!items.fact("folders"));

		let folders = Collection::of(&[json!({"folder": "2"})]);
		assert!(folders.fact("folders"));

		let mixed = Collection::of(&[json!({"id": "1"}), json!({"folder": "2"})]);
		assert!(!mixed.fact("items"));
		assert!(!mixed.fact("folders"));
	}

	#[test]
	fn one_folder_requires_agreement() {
		let same = Collection::of(&[
			json!({"id": "1", "folder_id": "2"}),
			json!({"id": "3", "folder_id": "2"}),
		]);
		assert!(same.fact("one-folder"));

		let split = Collection::of(&[
			json!({"id": "1", "folder_id": "2"}),
			json!({"id": "3", "folder_id": "9"}),
		]);
		assert!(!split.fact("one-folder"));
	}

	#[tokio::test]
	async fn unresolved_guard_fails_closed() {
		let coll = Collection::of(&[json!({"id": "1"})]);
		assert!(!coll.check(&Guard::new("one")));
	}

	#[tokio::test]
	async fn resolution_intersects_rights() {
		let folders = MemFolders::new();
		folders.insert(Folder::new("2", "mail", FolderRights::READ | FolderRights::WRITE | FolderRights::DELETE));
		folders.insert(Folder::new("9", "mail", FolderRights::READ | FolderRights::DELETE));

		let mut coll = Collection::of(&[
			json!({"id": "1", "folder_id": "2"}),
			json!({"id": "3", "folder_id": "9"}),
		]);
		coll.resolve(&folders).await;

		assert!(coll.is_resolved());
		assert!(coll.fact("delete"));
		assert!(!coll.fact("modify"));
		assert!(coll.fact("read-only"));
		assert!(coll.matches("multiple && delete && !modify"));
	}

	#[tokio::test]
	async fn missing_folder_drops_rights() {
		let folders = MemFolders::new();
		let mut coll = Collection::of(&[json!({"id": "1", "folder_id": "2"})]);
		coll.resolve(&folders).await;
		assert!(!coll.fact("delete"));
		assert!(coll.fact("read-only"));
	}
}
