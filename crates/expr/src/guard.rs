//! Fail-closed predicate wrapper.

use crate::ast::Expr;
use crate::eval::Scope;
use crate::parser::{ParseError, parse};

/// A guard expression compiled once at registration time.
///
/// Guard sources come from action declarations, which are data, not code —
/// a typo there must never break an invocation. [`Guard::new`] therefore
/// never fails: a malformed source logs a diagnostic and poisons the guard,
/// and a poisoned guard answers `false` from every [`check`](Self::check).
///
/// Use [`Guard::parse`] where the caller wants to surface the error instead
/// (e.g. validating declarations in tests).
#[derive(Debug, Clone)]
pub struct Guard {
	source: String,
	compiled: Option<Expr>,
}

impl Guard {
	/// Compiles a guard, poisoning it on parse failure.
	pub fn new(source: impl Into<String>) -> Self {
		let source = source.into();
		let compiled = match parse(&source) {
			Ok(expr) => Some(expr),
			Err(err) => {
				tracing::warn!(source = %source, error = %err, "malformed guard expression, failing closed");
				None
			}
		};
		Self { source, compiled }
	}

	/// Compiles a guard, returning the parse error instead of poisoning.
	pub fn parse(source: impl Into<String>) -> Result<Self, ParseError> {
		let source = source.into();
		let compiled = parse(&source)?;
		Ok(Self {
			source,
			compiled: Some(compiled),
		})
	}

	/// The original expression source.
	pub fn source(&self) -> &str {
		&self.source
	}

	/// True when the source failed to parse.
	pub fn is_poisoned(&self) -> bool {
		self.compiled.is_none()
	}

	/// Evaluates the guard against a scope. Poisoned guards answer `false`.
	pub fn check(&self, scope: &dyn Scope) -> bool {
		match &self.compiled {
			Some(expr) => expr.eval(scope),
			None => {
				tracing::debug!(source = %self.source, "skipping poisoned guard");
				false
			}
		}
	}
}
