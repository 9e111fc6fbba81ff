//! Folder permission model.
//!
//! `folder` guards on actions are evaluated against the folder containing
//! the selection: bare tokens map to permission bits (`delete`, `create`),
//! `is:<module>` matches the folder's content module. The provider seam has
//! a sync cache lookup for the eligibility filter (which must not suspend)
//! and an async fetch used while resolving a collection.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use switchboard_expr::Scope;
use switchboard_primitives::BoxFutureLocal;

bitflags::bitflags! {
	/// Permission bits granted on a folder.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct FolderRights: u32 {
		/// Read items in the folder.
		const READ = 1 << 0;
		/// Create items in the folder.
		const CREATE = 1 << 1;
		/// Modify items in the folder.
		const WRITE = 1 << 2;
		/// Delete items in the folder.
		const DELETE = 1 << 3;
		/// Rename the folder itself.
		const RENAME = 1 << 4;
		/// Administer permissions.
		const ADMIN = 1 << 5;
	}
}

/// A resolved folder record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
	/// Backend folder identifier.
	pub id: String,
	/// Content module ("mail", "contacts", "infostore", ...).
	pub module: String,
	/// Granted permission bits.
	pub rights: FolderRights,
}

impl Folder {
	/// Creates a folder record.
	pub fn new(id: impl Into<String>, module: impl Into<String>, rights: FolderRights) -> Self {
		Self {
			id: id.into(),
			module: module.into(),
			rights,
		}
	}

	/// Answers a permission name against the granted bits.
	///
	/// Unknown names fail closed.
	pub fn can(&self, name: &str) -> bool {
		let bit = match name {
			"read" => FolderRights::READ,
			"create" => FolderRights::CREATE,
			"write" | "modify" => FolderRights::WRITE,
			"delete" => FolderRights::DELETE,
			"rename" => FolderRights::RENAME,
			"admin" => FolderRights::ADMIN,
			other => {
				tracing::debug!(folder = %self.id, permission = other, "unknown folder permission name");
				return false;
			}
		};
		self.rights.contains(bit)
	}

	/// Guard scope over this folder: bare tokens are permission names,
	/// `is:<module>` matches the content module.
	pub fn scope(&self) -> impl Scope + '_ {
		move |name: &str, qualifier: Option<&str>| match (name, qualifier) {
			("is", Some(module)) => self.module == module,
			(_, Some(_)) => false,
			(name, None) => self.can(name),
		}
	}
}

/// Source of folder records for eligibility checks and collection resolution.
pub trait FolderProvider {
	/// Sync lookup against already-resolved folders.
	fn get(&self, id: &str) -> Option<Arc<Folder>>;

	/// Resolves a folder, fetching it if necessary.
	fn fetch<'a>(&'a self, id: &'a str) -> BoxFutureLocal<'a, Option<Arc<Folder>>>;
}

/// In-memory provider backed by a map, used by tests and embedders that
/// sync folders out of band.
#[derive(Debug, Default)]
pub struct MemFolders {
	map: RwLock<HashMap<String, Arc<Folder>>>,
}

impl MemFolders {
	/// Creates an empty provider.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces a folder record.
	pub fn insert(&self, folder: Folder) {
		self.map.write().insert(folder.id.clone(), Arc::new(folder));
	}
}

impl FolderProvider for MemFolders {
	fn get(&self, id: &str) -> Option<Arc<Folder>> {
		self.map.read().get(id).cloned()
	}

	fn fetch<'a>(&'a self, id: &'a str) -> BoxFutureLocal<'a, Option<Arc<Folder>>> {
		Box::pin(std::future::ready(self.get(id)))
	}
}
