//! Named, ordered extension points.
//!
//! A [`Registry`] maps point ids to ordered entry lists. Order is ascending
//! declared priority with registration sequence as the stable tiebreak, so
//! a point walks the same way every time regardless of which async check
//! settles first. Listing snapshots the point under the lock and releases
//! it before returning; the lock is never held across an await.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

/// Implemented by everything a point can hold (actions, menu links).
pub trait PointEntry {
	/// Identifier, unique within one point.
	fn id(&self) -> &str;
	/// Walk order: lower fires/renders first.
	fn priority(&self) -> i16;
}

struct PointData<T> {
	next_seq: u64,
	// Kept sorted by (priority, seq).
	entries: Vec<(i16, u64, Arc<T>)>,
}

impl<T> Default for PointData<T> {
	fn default() -> Self {
		Self {
			next_seq: 0,
			entries: Vec::new(),
		}
	}
}

/// Registry of named extension points.
pub struct Registry<T> {
	points: RwLock<IndexMap<String, PointData<T>>>,
}

impl<T> Default for Registry<T> {
	fn default() -> Self {
		Self {
			points: RwLock::new(IndexMap::new()),
		}
	}
}

impl<T: PointEntry> Registry<T> {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers an entry on a point.
	///
	/// A duplicate id replaces the previous registration (the new priority
	/// and position apply).
	pub fn extend(&self, point: &str, entry: T) -> Arc<T> {
		let entry = Arc::new(entry);
		let mut points = self.points.write();
		let data = points.entry(point.to_string()).or_default();

		if let Some(pos) = data.entries.iter().position(|(_, _, e)| e.id() == entry.id()) {
			tracing::debug!(point, id = entry.id(), "replacing extension");
			data.entries.remove(pos);
		}

		let seq = data.next_seq;
		data.next_seq += 1;
		let key = (entry.priority(), seq);
		let pos = data.entries.partition_point(|(p, s, _)| (*p, *s) <= key);
		data.entries.insert(pos, (entry.priority(), seq, Arc::clone(&entry)));
		entry
	}

	/// Snapshot of a point's entries in walk order.
	pub fn list(&self, point: &str) -> Vec<Arc<T>> {
		self.points
			.read()
			.get(point)
			.map(|data| data.entries.iter().map(|(_, _, e)| Arc::clone(e)).collect())
			.unwrap_or_default()
	}

	/// Projects a field across a point's entries, in walk order.
	pub fn pluck<U>(&self, point: &str, f: impl Fn(&T) -> U) -> Vec<U> {
		self.points
			.read()
			.get(point)
			.map(|data| data.entries.iter().map(|(_, _, e)| f(e)).collect())
			.unwrap_or_default()
	}

	/// Number of entries registered on a point.
	pub fn len(&self, point: &str) -> usize {
		self.points.read().get(point).map_or(0, |data| data.entries.len())
	}

	/// True when the point has no entries.
	pub fn is_empty(&self, point: &str) -> bool {
		self.len(point) == 0
	}
}
