//! Expression tree produced by the parser.

/// A parsed guard expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
	/// `true` or `false`.
	Literal(bool),
	/// A bare token, optionally qualified: `flags` or `content_type:task`.
	Token {
		name: String,
		qualifier: Option<String>,
	},
	/// `!expr`
	Not(Box<Expr>),
	/// `lhs && rhs`
	And(Box<Expr>, Box<Expr>),
	/// `lhs || rhs`
	Or(Box<Expr>, Box<Expr>),
}

impl Expr {
	/// Creates an unqualified token node.
	pub fn token(name: impl Into<String>) -> Self {
		Self::Token {
			name: name.into(),
			qualifier: None,
		}
	}

	/// Creates a qualified token node.
	pub fn qualified(name: impl Into<String>, qualifier: impl Into<String>) -> Self {
		Self::Token {
			name: name.into(),
			qualifier: Some(qualifier.into()),
		}
	}
}
