use super::*;

fn token(name: &str) -> Expr {
	Expr::token(name)
}

#[test]
fn single_token() {
	assert_eq!(parse("delete"), Ok(token("delete")));
}

#[test]
fn token_with_interior_punctuation() {
	assert_eq!(parse("io.ox/mail"), Ok(token("io.ox/mail")));
	assert_eq!(parse("content-type"), Ok(token("content-type")));
	assert_eq!(parse("folder_id"), Ok(token("folder_id")));
}

#[test]
fn qualified_token() {
	assert_eq!(parse("is:mail"), Ok(Expr::qualified("is", "mail")));
}

#[test]
fn literals_are_reserved() {
	assert_eq!(parse("true"), Ok(Expr::Literal(true)));
	assert_eq!(parse("false"), Ok(Expr::Literal(false)));
}

#[test]
fn precedence_and_binds_tighter_than_or() {
	// a || b && c  ==  a || (b && c)
	assert_eq!(
		parse("a || b && c"),
		Ok(Expr::Or(
			Box::new(token("a")),
			Box::new(Expr::And(Box::new(token("b")), Box::new(token("c")))),
		))
	);
}

#[test]
fn parentheses_override_precedence() {
	assert_eq!(
		parse("(a || b) && c"),
		Ok(Expr::And(
			Box::new(Expr::Or(Box::new(token("a")), Box::new(token("b")))),
			Box::new(token("c")),
		))
	);
}

#[test]
fn negation_nests() {
	assert_eq!(
		parse("!!a"),
		Ok(Expr::Not(Box::new(Expr::Not(Box::new(token("a"))))))
	);
	assert_eq!(
		parse("!(a && b)"),
		Ok(Expr::Not(Box::new(Expr::And(
			Box::new(token("a")),
			Box::new(token("b")),
		))))
	);
}

#[test]
fn whitespace_is_tolerated() {
	assert_eq!(parse("  a  &&\t!b "), parse("a&&!b"));
}

#[test]
fn rejects_empty_input() {
	let err = parse("").unwrap_err();
	assert_eq!(err.position, 0);
}

#[test]
fn rejects_trailing_garbage() {
	let err = parse("a b").unwrap_err();
	assert_eq!(err.position, 2);
}

#[test]
fn rejects_dangling_operator() {
	assert!(parse("a &&").is_err());
	assert!(parse("|| a").is_err());
}

#[test]
fn rejects_unbalanced_parens() {
	assert!(parse("(a && b").is_err());
}

#[test]
fn rejects_missing_qualifier() {
	assert!(parse("is:").is_err());
	assert!(parse("is: ").is_err());
}

#[test]
fn rejects_leading_digit_ident() {
	assert!(parse("1read").is_err());
}

#[test]
fn error_position_points_at_offender() {
	let err = parse("a && &&").unwrap_err();
	assert_eq!(err.position, 5);
}
