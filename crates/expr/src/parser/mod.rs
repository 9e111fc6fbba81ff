//! Recursive descent parser for guard expressions.
//!
//! See the crate docs for the grammar. Errors carry the byte offset of the
//! offending input so registration-time diagnostics can point at the exact
//! spot in the declared expression.

use std::str::FromStr;

use crate::ast::Expr;

#[cfg(test)]
mod tests;

/// Represents an error that occurred during parsing.
#[derive(Debug, PartialEq, Clone)]
pub struct ParseError {
	/// Human-readable description of the parse error.
	pub message: String,
	/// Byte offset in the input where the error occurred.
	pub position: usize,
}

impl std::fmt::Display for ParseError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "parse error at position {}: {}", self.position, self.message)
	}
}

impl std::error::Error for ParseError {}

/// Maintains the parser's state for recursive descent parsing.
struct Parser<'a> {
	/// The input string being parsed.
	input: &'a str,
	/// Current byte position in the input.
	position: usize,
}

impl<'a> Parser<'a> {
	/// Creates a new `Parser` from the given input string.
	fn new(input: &'a str) -> Self {
		Self { input, position: 0 }
	}

	/// Peeks at the next character without consuming it.
	fn peek(&self) -> Option<char> {
		self.input.chars().next()
	}

	/// Consumes and returns the next character, advancing the parser.
	fn next(&mut self) -> Option<char> {
		if let Some(ch) = self.peek() {
			self.position += ch.len_utf8();
			self.input = &self.input[ch.len_utf8()..];

			Some(ch)
		} else {
			None
		}
	}

	/// Consumes whitespace between tokens.
	fn skip_ws(&mut self) {
		while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
			self.next();
		}
	}

	/// Returns `true` if the parser has consumed all input.
	fn is_end(&self) -> bool {
		self.input.is_empty()
	}

	/// Consumes the next character if it matches the expected one.
	///
	/// # Errors
	///
	/// Returns a [`ParseError`] if the character doesn't match or if input is exhausted.
	fn take(&mut self, expected: char) -> Result<(), ParseError> {
		match self.next() {
			Some(ch) if ch == expected => Ok(()),
			Some(ch) => Err(ParseError {
				message: format!("expected '{expected}', found '{ch}'"),
				position: self.position - ch.len_utf8(),
			}),
			None => Err(ParseError {
				message: format!("expected '{expected}', found end of input"),
				position: self.position,
			}),
		}
	}

	/// Consumes the given literal if the input starts with it.
	fn eat(&mut self, literal: &str) -> bool {
		if let Some(rest) = self.input.strip_prefix(literal) {
			self.position += literal.len();
			self.input = rest;
			true
		} else {
			false
		}
	}

	/// Consumes and returns characters that satisfy a predicate.
	fn take_while<F>(&mut self, predicate: F) -> String
	where
		F: Fn(char) -> bool,
	{
		let mut result = String::new();

		while let Some(ch) = self.peek() {
			if predicate(ch) {
				result.push(ch);
				self.next();
			} else {
				break;
			}
		}

		result
	}

	/// Creates a [`ParseError`] with the current parser position.
	fn error(&self, message: String) -> ParseError {
		ParseError {
			message,
			position: self.position,
		}
	}
}

/// Parses a guard expression string.
///
/// # Errors
///
/// Returns a [`ParseError`] if the input does not match the grammar or has
/// trailing characters past a complete expression.
///
/// # Examples
///
/// ```
/// use switchboard_expr::{Expr, parse};
///
/// let expr = parse("delete && !is:trash").unwrap();
/// assert_eq!(
/// 	expr,
/// 	Expr::And(
/// 		Box::new(Expr::token("delete")),
/// 		Box::new(Expr::Not(Box::new(Expr::qualified("is", "trash")))),
/// 	)
/// );
/// ```
pub fn parse(s: &str) -> Result<Expr, ParseError> {
	let mut parser = Parser::new(s);
	let expr = parse_or(&mut parser)?;

	parser.skip_ws();
	if !parser.is_end() {
		return Err(parser.error(format!("expected end of input, found: {}", parser.peek().unwrap())));
	}

	Ok(expr)
}

/// Grammar: `or = and ( "||" and )*`
fn parse_or(parser: &mut Parser) -> Result<Expr, ParseError> {
	let mut lhs = parse_and(parser)?;

	loop {
		parser.skip_ws();
		if !parser.eat("||") {
			return Ok(lhs);
		}
		let rhs = parse_and(parser)?;
		lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
	}
}

/// Grammar: `and = unary ( "&&" unary )*`
fn parse_and(parser: &mut Parser) -> Result<Expr, ParseError> {
	let mut lhs = parse_unary(parser)?;

	loop {
		parser.skip_ws();
		if !parser.eat("&&") {
			return Ok(lhs);
		}
		let rhs = parse_unary(parser)?;
		lhs = Expr::And(Box::new(lhs), Box::new(rhs));
	}
}

/// Grammar: `unary = "!" unary | primary`
fn parse_unary(parser: &mut Parser) -> Result<Expr, ParseError> {
	parser.skip_ws();
	if parser.eat("!") {
		let inner = parse_unary(parser)?;
		return Ok(Expr::Not(Box::new(inner)));
	}

	parse_primary(parser)
}

/// Grammar: `primary = "(" expr ")" | "true" | "false" | token`
fn parse_primary(parser: &mut Parser) -> Result<Expr, ParseError> {
	parser.skip_ws();
	if parser.eat("(") {
		let inner = parse_or(parser)?;
		parser.skip_ws();
		parser.take(')')?;
		return Ok(inner);
	}

	parse_token(parser)
}

/// Grammar: `token = ident ( ":" qualifier )?`
///
/// The reserved words `true` and `false` parse as literals instead.
fn parse_token(parser: &mut Parser) -> Result<Expr, ParseError> {
	if !matches!(parser.peek(), Some(ch) if is_ident_start(ch)) {
		return Err(parser.error("expected an identifier".to_string()));
	}

	let name = parser.take_while(is_ident_char);
	match name.as_str() {
		"true" => return Ok(Expr::Literal(true)),
		"false" => return Ok(Expr::Literal(false)),
		_ => {}
	}

	if !parser.eat(":") {
		return Ok(Expr::token(name));
	}

	if !matches!(parser.peek(), Some(ch) if is_ident_start(ch)) {
		return Err(parser.error(format!("expected a qualifier after '{name}:'")));
	}
	let qualifier = parser.take_while(is_ident_char);

	Ok(Expr::qualified(name, qualifier))
}

fn is_ident_start(ch: char) -> bool {
	ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_char(ch: char) -> bool {
	ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.' | '/')
}

impl FromStr for Expr {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse(s)
	}
}
