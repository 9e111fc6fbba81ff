//! # Guard expressions
//!
//! Enablement predicates on actions ("every item has a subject", "the folder
//! grants delete") are declared as small boolean expressions over named
//! tokens. This crate parses those expressions into an AST and evaluates
//! them against a [`Scope`], which answers each token for the context at
//! hand (item attributes, collection facts, folder permissions, device
//! class).
//!
//! The expression strings come from action declarations, so a bad string
//! must never take down an invocation: [`Guard`] compiles once at
//! registration and fails closed — a malformed source logs a diagnostic and
//! the guard answers `false` forever after.
//!
//! ## Supported Syntax
//!
//! ```text
//! expr    = or
//! or      = and ( "||" and )*
//! and     = unary ( "&&" unary )*
//! unary   = "!" unary | primary
//! primary = "(" expr ")" | "true" | "false" | token
//! token   = ident ( ":" qualifier )?
//! ident   = (alpha | "_") (alnum | "_" | "-" | "." | "/")*
//! ```
//!
//! Identifiers allow `.`, `/` and `-` interior characters so attribute
//! names and extension point ids are expressible without quoting.

mod ast;
mod eval;
mod guard;
pub mod parser;

pub use ast::Expr;
pub use eval::Scope;
pub use guard::Guard;
pub use parser::{ParseError, parse};
