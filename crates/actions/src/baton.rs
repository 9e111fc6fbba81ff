//! Per-invocation context.
//!
//! A [`Baton`] is created fresh for one user gesture, owned exclusively by
//! that invocation's call chain, and discarded when the handler resolves or
//! the menu closes. It carries the selected items, the derived
//! [`Collection`], and the transient flags handlers use to steer dispatch
//! (propagation stop, default suppression, per-pair disables).

use std::cell::Cell;
use std::collections::HashSet;

use serde_json::Value;
use switchboard_expr::Scope;

use crate::collection::Collection;

/// Mutable context threaded through one invocation.
///
/// Deliberately not `Clone`: a baton must not be shared between two gating
/// pipelines. The steering flags are `Cell`s because handlers and matchers
/// only ever see `&Baton` yet may claim exclusivity mid-walk.
#[derive(Debug, Default)]
pub struct Baton {
	data: Vec<Value>,
	collection: Collection,
	folder_id: Option<String>,
	propagation_stopped: Cell<bool>,
	default_prevented: Cell<bool>,
	disabled: HashSet<(String, String)>,
}

impl Baton {
	/// Creates a baton around a selection.
	pub fn new(data: Vec<Value>) -> Self {
		let collection = Collection::of(&data);
		// A homogeneous selection pins the baton's folder automatically.
		let folder_id = match collection.folder_ids() {
			[only] => Some(only.clone()),
			_ => None,
		};
		Self {
			data,
			collection,
			folder_id,
			propagation_stopped: Cell::new(false),
			default_prevented: Cell::new(false),
			disabled: HashSet::new(),
		}
	}

	/// Overrides the folder the invocation acts in.
	pub fn with_folder(mut self, id: impl Into<String>) -> Self {
		self.folder_id = Some(id.into());
		self
	}

	/// The selected items, in selection order.
	pub fn data(&self) -> &[Value] {
		&self.data
	}

	/// First selected item, if any.
	pub fn first(&self) -> Option<&Value> {
		self.data.first()
	}

	/// The derived collection facts.
	pub fn collection(&self) -> &Collection {
		&self.collection
	}

	/// Mutable access for resolution.
	pub fn collection_mut(&mut self) -> &mut Collection {
		&mut self.collection
	}

	/// Folder this invocation acts in, if known.
	pub fn folder_id(&self) -> Option<&str> {
		self.folder_id.as_deref()
	}

	/// Claims exclusivity: later actions in this invocation are skipped.
	pub fn stop_propagation(&self) {
		self.propagation_stopped.set(true);
	}

	/// True once a prior action claimed exclusivity.
	pub fn is_propagation_stopped(&self) -> bool {
		self.propagation_stopped.get()
	}

	/// Suppresses the synthetic default action for this invocation.
	pub fn prevent_default(&self) {
		self.default_prevented.set(true);
	}

	/// True when the default action is suppressed.
	pub fn is_default_prevented(&self) -> bool {
		self.default_prevented.get()
	}

	/// Disables one specific (point, action) pair for this invocation.
	pub fn disable(&mut self, point: impl Into<String>, action: impl Into<String>) {
		self.disabled.insert((point.into(), action.into()));
	}

	/// True when the caller disabled this (point, action) pair.
	pub fn is_disabled(&self, point: &str, action: &str) -> bool {
		self.disabled.contains(&(point.to_string(), action.to_string()))
	}
}

impl From<Value> for Baton {
	fn from(item: Value) -> Self {
		Self::new(vec![item])
	}
}

impl From<Vec<Value>> for Baton {
	fn from(data: Vec<Value>) -> Self {
		Self::new(data)
	}
}

/// JS-like truthiness over item attributes: null, false, `""`, and 0 are
/// falsy; everything else (including empty arrays/objects) is truthy.
pub(crate) fn truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64() != Some(0.0),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}

/// Guard scope over one item's attributes: a bare token tests attribute
/// presence and truthiness, `attr:value` compares the attribute's string
/// form.
pub fn item_scope(item: &Value) -> impl Scope + '_ {
	move |name: &str, qualifier: Option<&str>| {
		let Some(attr) = item.get(name) else {
			return false;
		};
		match qualifier {
			None => truthy(attr),
			Some(expected) => match attr {
				Value::String(s) => s == expected,
				Value::Number(n) => n.to_string() == expected,
				Value::Bool(b) => b.to_string() == expected,
				_ => false,
			},
		}
	}
}
