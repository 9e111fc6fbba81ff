//! Action records.
//!
//! An [`Action`] is an immutable registration record: identity, priority,
//! gating metadata (capabilities, device, toggle, guards), an optional
//! dynamic [`Matcher`], and a [`Handler`]. Feature modules build them with
//! [`ActionBuilder`] at module setup and register them on extension points;
//! after that they are only read.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use switchboard_expr::Guard;
use switchboard_primitives::BoxFutureLocal;

use crate::baton::Baton;
use crate::capability::CapabilitySet;
use crate::collection::Collection;
use crate::error::{HandlerError, MatchError};
use crate::point::PointEntry;

/// Single-item handler shape: receives the whole baton.
pub type SingleFn = dyn Fn(&Baton) -> Result<(), HandlerError>;
/// Multi-item handler shape: receives the items plus the baton.
pub type MultiFn = dyn Fn(&[Value], &Baton) -> Result<(), HandlerError>;

/// What an action does once dispatched.
#[derive(Clone)]
pub enum Handler {
	/// Plain function over the baton.
	Single(Arc<SingleFn>),
	/// Function over `(items, baton)` for bulk operations.
	Multi(Arc<MultiFn>),
	/// Deferred reference resolved through the module registry at dispatch
	/// time.
	Module(String),
}

impl fmt::Debug for Handler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Single(_) => f.write_str("Handler::Single"),
			Self::Multi(_) => f.write_str("Handler::Multi"),
			Self::Module(name) => write!(f, "Handler::Module({name})"),
		}
	}
}

/// Arguments handed to a deprecated 3-arg matcher.
///
/// Legacy registrations predate the baton carrying everything; they keep
/// working through [`Matcher::from_legacy`] only.
pub struct LegacyMatch<'a> {
	pub baton: &'a Baton,
	pub collection: &'a Collection,
	pub data: &'a [Value],
	/// Id of the action being checked.
	pub action: &'a str,
}

type SyncMatchFn = dyn Fn(&Baton) -> Result<bool, MatchError>;
type FutureMatchFn = dyn for<'a> Fn(&'a Baton) -> BoxFutureLocal<'a, Result<bool, MatchError>>;
type LegacyMatchFn = dyn for<'a> Fn(LegacyMatch<'a>) -> Result<bool, MatchError>;

/// Per-action dynamic eligibility check.
///
/// Evaluated only after the static filters pass. An `Err` means "no match",
/// never a pipeline error.
#[derive(Clone)]
pub enum Matcher {
	/// Synchronous check.
	Sync(Arc<SyncMatchFn>),
	/// Asynchronous check (may await I/O).
	Future(Arc<FutureMatchFn>),
	/// Deprecated 3-arg shape, kept behind the adapter boundary.
	Legacy(Arc<LegacyMatchFn>),
}

impl Matcher {
	/// Infallible synchronous matcher.
	pub fn new(f: impl Fn(&Baton) -> bool + 'static) -> Self {
		Self::Sync(Arc::new(move |baton| Ok(f(baton))))
	}

	/// Fallible synchronous matcher.
	pub fn fallible(f: impl Fn(&Baton) -> Result<bool, MatchError> + 'static) -> Self {
		Self::Sync(Arc::new(f))
	}

	/// Asynchronous matcher.
	pub fn future(f: impl for<'a> Fn(&'a Baton) -> BoxFutureLocal<'a, Result<bool, MatchError>> + 'static) -> Self {
		Self::Future(Arc::new(f))
	}

	/// Adapter for deprecated 3-arg registrations. New code uses the
	/// baton-shaped constructors above.
	pub fn from_legacy(f: impl for<'a> Fn(LegacyMatch<'a>) -> Result<bool, MatchError> + 'static) -> Self {
		Self::Legacy(Arc::new(f))
	}

	/// Runs the matcher. Failures log and answer `false`.
	pub async fn matches(&self, baton: &Baton, action: &str) -> bool {
		let result = match self {
			Self::Sync(f) => f(baton),
			Self::Future(f) => f(baton).await,
			Self::Legacy(f) => f(LegacyMatch {
				baton,
				collection: baton.collection(),
				data: baton.data(),
				action,
			}),
		};
		match result {
			Ok(matched) => matched,
			Err(err) => {
				tracing::debug!(action, error = %err, "matcher rejected, treating as no match");
				false
			}
		}
	}
}

impl fmt::Debug for Matcher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Sync(_) => f.write_str("Matcher::Sync"),
			Self::Future(_) => f.write_str("Matcher::Future"),
			Self::Legacy(_) => f.write_str("Matcher::Legacy"),
		}
	}
}

/// An immutable action registration.
#[derive(Debug, Clone)]
pub struct Action {
	id: String,
	priority: i16,
	capabilities: CapabilitySet,
	toggle: Option<bool>,
	device: Option<Guard>,
	every: Option<Guard>,
	collection: Option<Guard>,
	folder: Option<Guard>,
	matcher: Option<Matcher>,
	handler: Handler,
}

impl Action {
	/// Starts building an action with the given id.
	pub fn builder(id: impl Into<String>) -> ActionBuilder {
		ActionBuilder::new(id)
	}

	/// Action identifier, unique per point.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Walk order: lower fires first.
	pub fn priority(&self) -> i16 {
		self.priority
	}

	/// Declared capability requirement.
	pub fn capabilities(&self) -> &CapabilitySet {
		&self.capabilities
	}

	/// Feature switch captured at registration.
	pub fn toggle(&self) -> Option<bool> {
		self.toggle
	}

	/// Device guard, if declared.
	pub fn device_guard(&self) -> Option<&Guard> {
		self.device.as_ref()
	}

	/// `every` guard over each selected item, if declared.
	pub fn every_guard(&self) -> Option<&Guard> {
		self.every.as_ref()
	}

	/// Collection-fact guard, if declared.
	pub fn collection_guard(&self) -> Option<&Guard> {
		self.collection.as_ref()
	}

	/// Folder-permission guard, if declared.
	pub fn folder_guard(&self) -> Option<&Guard> {
		self.folder.as_ref()
	}

	/// Dynamic matcher, if declared.
	pub fn matcher(&self) -> Option<&Matcher> {
		self.matcher.as_ref()
	}

	/// The handler to dispatch.
	pub fn handler(&self) -> &Handler {
		&self.handler
	}
}

impl PointEntry for Action {
	fn id(&self) -> &str {
		&self.id
	}

	fn priority(&self) -> i16 {
		self.priority
	}
}

/// Builder for [`Action`]. Guards compile here, at registration, so a typo
/// in a declaration poisons only that predicate (fail closed), never the
/// invocation.
pub struct ActionBuilder {
	id: String,
	priority: i16,
	capabilities: CapabilitySet,
	toggle: Option<bool>,
	device: Option<Guard>,
	every: Option<Guard>,
	collection: Option<Guard>,
	folder: Option<Guard>,
	matcher: Option<Matcher>,
	handler: Handler,
}

impl ActionBuilder {
	/// Starts a builder; the default handler is a no-op single-item fn.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			priority: 0,
			capabilities: CapabilitySet::empty(),
			toggle: None,
			device: None,
			every: None,
			collection: None,
			folder: None,
			matcher: None,
			handler: Handler::Single(Arc::new(|_| Ok(()))),
		}
	}

	/// Sets the walk priority (lower fires first).
	pub fn priority(mut self, priority: i16) -> Self {
		self.priority = priority;
		self
	}

	/// Declares required capabilities, space separated.
	pub fn capabilities(mut self, decl: &str) -> Self {
		self.capabilities = CapabilitySet::parse(decl);
		self
	}

	/// Declares a feature toggle value.
	pub fn toggle(mut self, enabled: bool) -> Self {
		self.toggle = Some(enabled);
		self
	}

	/// Declares a device guard expression.
	pub fn device(mut self, expr: &str) -> Self {
		self.device = Some(Guard::new(expr));
		self
	}

	/// Declares an `every` guard checked against each selected item.
	pub fn every(mut self, expr: &str) -> Self {
		self.every = Some(Guard::new(expr));
		self
	}

	/// Declares a collection-fact guard.
	pub fn collection(mut self, expr: &str) -> Self {
		self.collection = Some(Guard::new(expr));
		self
	}

	/// Declares a folder-permission guard.
	pub fn folder(mut self, expr: &str) -> Self {
		self.folder = Some(Guard::new(expr));
		self
	}

	/// Attaches a dynamic matcher.
	pub fn matcher(mut self, matcher: Matcher) -> Self {
		self.matcher = Some(matcher);
		self
	}

	/// Single-item handler.
	pub fn handles(mut self, f: impl Fn(&Baton) -> Result<(), HandlerError> + 'static) -> Self {
		self.handler = Handler::Single(Arc::new(f));
		self
	}

	/// Multi-item handler.
	pub fn handles_all(mut self, f: impl Fn(&[Value], &Baton) -> Result<(), HandlerError> + 'static) -> Self {
		self.handler = Handler::Multi(Arc::new(f));
		self
	}

	/// Deferred handler, resolved by name through the module registry.
	pub fn handles_module(mut self, name: impl Into<String>) -> Self {
		self.handler = Handler::Module(name.into());
		self
	}

	/// Finishes the record.
	pub fn build(self) -> Action {
		Action {
			id: self.id,
			priority: self.priority,
			capabilities: self.capabilities,
			toggle: self.toggle,
			device: self.device,
			every: self.every,
			collection: self.collection,
			folder: self.folder,
			matcher: self.matcher,
			handler: self.handler,
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[tokio::test]
	async fn matcher_error_is_no_match() {
		let baton = Baton::new(vec![]);
		let matcher = Matcher::fallible(|_| Err(MatchError::new("backend said no")));
		assert!(!matcher.matches(&baton, "demo").await);
	}

	#[tokio::test]
	async fn future_matcher_resolves() {
		let baton = Baton::new(vec![json!({"id": "1"})]);
		let matcher = Matcher::future(|baton| {
			let single = baton.data().len() == 1;
			Box::pin(async move { Ok(single) })
		});
		assert!(matcher.matches(&baton, "demo").await);
	}

	#[tokio::test]
	async fn legacy_adapter_sees_all_arguments() {
		let baton = Baton::new(vec![json!({"id": "1"})]);
		let matcher = Matcher::from_legacy(|legacy: LegacyMatch<'_>| {
			Ok(legacy.action == "demo" && legacy.data.len() == 1 && !legacy.collection.is_resolved())
		});
		assert!(matcher.matches(&baton, "demo").await);
	}
}
