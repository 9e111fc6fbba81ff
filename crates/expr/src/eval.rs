//! Scope lookup and expression evaluation.

use crate::ast::Expr;

/// Answers guard tokens for one evaluation context.
///
/// Implementations exist per predicate kind: item attributes for `every`
/// guards, collection facts, folder permissions, device facts. Closures of
/// the matching shape implement the trait directly.
pub trait Scope {
	/// Tests a single token against this context.
	fn test(&self, name: &str, qualifier: Option<&str>) -> bool;
}

impl<F> Scope for F
where
	F: Fn(&str, Option<&str>) -> bool,
{
	fn test(&self, name: &str, qualifier: Option<&str>) -> bool {
		self(name, qualifier)
	}
}

impl Expr {
	/// Evaluates the expression against a scope.
	///
	/// `&&` and `||` short-circuit left to right.
	pub fn eval(&self, scope: &dyn Scope) -> bool {
		match self {
			Self::Literal(value) => *value,
			Self::Token { name, qualifier } => scope.test(name, qualifier.as_deref()),
			Self::Not(inner) => !inner.eval(scope),
			Self::And(lhs, rhs) => lhs.eval(scope) && rhs.eval(scope),
			Self::Or(lhs, rhs) => lhs.eval(scope) || rhs.eval(scope),
		}
	}
}
