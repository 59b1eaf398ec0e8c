//! Path-pattern tokenizer.
//!
//! Scans a pattern string left to right with a priority-ordered grammar:
//! a backslash escape, then a `:name` parameter with an optional `(...)`
//! sub-pattern, then an anonymous `(...)` group, each with an optional
//! `+`/`*`/`?` modifier. Text matched by none of the three accumulates as
//! literal. The grammar is deliberately permissive: malformed parameter
//! syntax (an unmatched parenthesis, a stray modifier, a bare `:`) falls
//! through to literal text instead of failing.

use crate::escape::{escape_char, escape_group};
use crate::token::{Key, KeyName, Token};

/// Default path segment separator.
pub const DEFAULT_DELIMITER: char = '/';

/// Options controlling tokenization.
#[derive(Debug, Clone)]
pub struct ParseOptions {
	/// Default separator used when a parameter has no explicit prefix.
	pub delimiter: char,
	/// Restricts which characters may be consumed as a parameter prefix.
	/// `None` allows any character.
	pub whitelist: Option<Vec<char>>,
}

impl Default for ParseOptions {
	fn default() -> Self {
		Self {
			delimiter: DEFAULT_DELIMITER,
			whitelist: None,
		}
	}
}

/// A parameter construct recognized by the scanner.
struct Parameter {
	name: Option<String>,
	pattern: Option<String>,
	modifier: Option<char>,
	/// Characters consumed from the input.
	len: usize,
}

fn is_word(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_'
}

/// Scans a backslash escape at `start`. Requires a character after the
/// backslash; a trailing lone backslash stays literal.
fn scan_escape(chars: &[char], start: usize) -> Option<(char, usize)> {
	if chars.get(start) == Some(&'\\') {
		chars.get(start + 1).map(|&escaped| (escaped, 2))
	} else {
		None
	}
}

/// Scans a parenthesized sub-pattern at `start`: one or more of a backslash
/// pair or a character other than `\`, `(`, `)`, then a closing paren. The
/// captured text keeps its backslash pairs. Returns the content and the
/// consumed length including both parens, or `None` when the group is
/// malformed (which leaves the text to be treated as literal).
fn scan_group(chars: &[char], start: usize) -> Option<(String, usize)> {
	if chars.get(start) != Some(&'(') {
		return None;
	}
	let mut pos = start + 1;
	let mut content = String::new();
	loop {
		match chars.get(pos) {
			Some('\\') => {
				let &escaped = chars.get(pos + 1)?;
				content.push('\\');
				content.push(escaped);
				pos += 2;
			}
			Some('(') | Some(')') | None => break,
			Some(&c) => {
				content.push(c);
				pos += 1;
			}
		}
	}
	if content.is_empty() || chars.get(pos) != Some(&')') {
		return None;
	}
	Some((content, pos + 1 - start))
}

fn scan_modifier(chars: &[char], pos: usize) -> Option<char> {
	match chars.get(pos) {
		Some(&c @ ('+' | '*' | '?')) => Some(c),
		_ => None,
	}
}

/// Scans a `:name`, `:name(...)`, or `(...)` construct at `start`, with an
/// optional trailing modifier. Alternatives are tried in priority order;
/// a `:` not followed by a word character matches nothing.
fn scan_parameter(chars: &[char], start: usize) -> Option<Parameter> {
	if chars.get(start) == Some(&':') {
		let mut pos = start + 1;
		let name_start = pos;
		while pos < chars.len() && is_word(chars[pos]) {
			pos += 1;
		}
		if pos > name_start {
			let name: String = chars[name_start..pos].iter().collect();
			let pattern = match scan_group(chars, pos) {
				Some((group, len)) => {
					pos += len;
					Some(group)
				}
				None => None,
			};
			let modifier = scan_modifier(chars, pos);
			if modifier.is_some() {
				pos += 1;
			}
			return Some(Parameter {
				name: Some(name),
				pattern,
				modifier,
				len: pos - start,
			});
		}
	}

	let (group, mut len) = scan_group(chars, start)?;
	let modifier = scan_modifier(chars, start + len);
	if modifier.is_some() {
		len += 1;
	}
	Some(Parameter {
		name: None,
		pattern: Some(group),
		modifier,
		len,
	})
}

/// Parses a path pattern into an ordered token sequence.
///
/// # Examples
///
/// ```
/// use pathexp::{parse, Key, KeyName, ParseOptions, Token};
///
/// let tokens = parse("/user/:id", &ParseOptions::default());
/// assert_eq!(tokens[0], Token::Static("/user".to_string()));
/// assert_eq!(
/// 	tokens[1],
/// 	Token::Key(Key {
/// 		name: KeyName::Name("id".to_string()),
/// 		prefix: Some('/'),
/// 		delimiter: Some('/'),
/// 		optional: false,
/// 		repeat: false,
/// 		pattern: "[^\\/]+?".to_string(),
/// 	})
/// );
/// ```
pub fn parse(pattern: &str, options: &ParseOptions) -> Vec<Token> {
	let default_delimiter = options.delimiter;
	let whitelist = options.whitelist.as_deref();
	let chars: Vec<char> = pattern.chars().collect();

	let mut tokens = Vec::new();
	let mut next_index = 0usize;
	let mut literal = String::new();
	// One-shot suppression: set by an escape sequence, cleared only when a
	// literal token is actually flushed. While set, the preceding character
	// is never adopted as a parameter prefix.
	let mut literal_escaped = false;
	let mut pos = 0usize;

	while pos < chars.len() {
		if let Some((escaped, len)) = scan_escape(&chars, pos) {
			literal.push(escaped);
			literal_escaped = true;
			pos += len;
			continue;
		}

		if let Some(parameter) = scan_parameter(&chars, pos) {
			let mut prefix = None;
			if !literal_escaped {
				if let Some(last) = literal.chars().last() {
					let eligible = whitelist.is_none_or(|w| w.contains(&last));
					if eligible {
						literal.pop();
						prefix = Some(last);
					}
				}
			}

			if !literal.is_empty() {
				tokens.push(Token::Static(std::mem::take(&mut literal)));
				literal_escaped = false;
			}

			let repeat = matches!(parameter.modifier, Some('+') | Some('*'));
			let optional = matches!(parameter.modifier, Some('?') | Some('*'));
			let delimiter = prefix.unwrap_or(default_delimiter);
			let token_pattern = match parameter.pattern {
				Some(group) => escape_group(&group),
				None => {
					let mut excluded = escape_char(delimiter);
					if delimiter != default_delimiter {
						excluded.push_str(&escape_char(default_delimiter));
					}
					format!("[^{}]+?", excluded)
				}
			};
			let name = match parameter.name {
				Some(name) => KeyName::Name(name),
				None => {
					let index = next_index;
					next_index += 1;
					KeyName::Index(index)
				}
			};

			tokens.push(Token::Key(Key {
				name,
				prefix,
				delimiter: Some(delimiter),
				optional,
				repeat,
				pattern: token_pattern,
			}));
			pos += parameter.len;
			continue;
		}

		literal.push(chars[pos]);
		pos += 1;
	}

	if !literal.is_empty() {
		tokens.push(Token::Static(literal));
	}

	tokens
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn named(name: &str) -> KeyName {
		KeyName::Name(name.to_string())
	}

	#[test]
	fn test_plain_literal() {
		let tokens = parse("/user/list", &ParseOptions::default());
		assert_eq!(tokens, vec![Token::Static("/user/list".to_string())]);
	}

	#[test]
	fn test_named_parameter_adopts_prefix() {
		let tokens = parse("/user/:id", &ParseOptions::default());
		assert_eq!(tokens.len(), 2);
		assert_eq!(tokens[0], Token::Static("/user".to_string()));
		let Token::Key(key) = &tokens[1] else {
			panic!("expected a parameter token");
		};
		assert_eq!(key.name, named("id"));
		assert_eq!(key.prefix, Some('/'));
		assert_eq!(key.delimiter, Some('/'));
		assert_eq!(key.pattern, "[^\\/]+?");
		assert!(!key.optional);
		assert!(!key.repeat);
	}

	#[rstest]
	#[case('?', true, false)]
	#[case('+', false, true)]
	#[case('*', true, true)]
	fn test_modifiers(#[case] modifier: char, #[case] optional: bool, #[case] repeat: bool) {
		let pattern = format!("/:id{}", modifier);
		let tokens = parse(&pattern, &ParseOptions::default());
		let Token::Key(key) = &tokens[0] else {
			panic!("expected a parameter token");
		};
		assert_eq!(key.optional, optional);
		assert_eq!(key.repeat, repeat);
	}

	#[test]
	fn test_custom_sub_pattern() {
		let tokens = parse("/:id(\\d+)", &ParseOptions::default());
		let Token::Key(key) = &tokens[0] else {
			panic!("expected a parameter token");
		};
		assert_eq!(key.pattern, "\\d+");
	}

	#[test]
	fn test_custom_sub_pattern_is_group_escaped() {
		let tokens = parse("/:path(a/b)", &ParseOptions::default());
		let Token::Key(key) = &tokens[0] else {
			panic!("expected a parameter token");
		};
		assert_eq!(key.pattern, "a\\/b");
	}

	#[test]
	fn test_anonymous_groups_get_sequential_indices() {
		let tokens = parse("/(\\d+)/(\\w+)/:name", &ParseOptions::default());
		let names: Vec<&KeyName> = tokens
			.iter()
			.filter_map(|t| match t {
				Token::Key(key) => Some(&key.name),
				Token::Static(_) => None,
			})
			.collect();
		assert_eq!(
			names,
			vec![&KeyName::Index(0), &KeyName::Index(1), &named("name")]
		);
	}

	#[test]
	fn test_escape_emits_only_the_escaped_character() {
		let tokens = parse("/\\:foo", &ParseOptions::default());
		assert_eq!(tokens, vec![Token::Static("/:foo".to_string())]);
	}

	#[test]
	fn test_escape_suppresses_prefix_adoption() {
		let tokens = parse("/a\\/:id", &ParseOptions::default());
		assert_eq!(tokens[0], Token::Static("/a/".to_string()));
		let Token::Key(key) = &tokens[1] else {
			panic!("expected a parameter token");
		};
		assert_eq!(key.prefix, None);
		assert_eq!(key.delimiter, Some('/'));
	}

	#[test]
	fn test_suppression_clears_after_literal_flush() {
		// The escape affects only the literal run it lands in; a later
		// parameter adopts its prefix normally.
		let tokens = parse("/a\\b/:x/:y", &ParseOptions::default());
		let Token::Key(first) = &tokens[1] else {
			panic!("expected a parameter token");
		};
		let Token::Key(second) = &tokens[2] else {
			panic!("expected a parameter token");
		};
		assert_eq!(first.prefix, None);
		assert_eq!(second.prefix, Some('/'));
	}

	#[test]
	fn test_whitelist_restricts_prefix() {
		let options = ParseOptions {
			whitelist: Some(vec!['/']),
			..ParseOptions::default()
		};
		let tokens = parse("/user-:id", &options);
		assert_eq!(tokens[0], Token::Static("/user-".to_string()));
		let Token::Key(key) = &tokens[1] else {
			panic!("expected a parameter token");
		};
		assert_eq!(key.prefix, None);
		assert_eq!(key.delimiter, Some('/'));
	}

	#[test]
	fn test_any_character_is_a_prefix_without_whitelist() {
		let tokens = parse("/user-:id", &ParseOptions::default());
		assert_eq!(tokens[0], Token::Static("/user".to_string()));
		let Token::Key(key) = &tokens[1] else {
			panic!("expected a parameter token");
		};
		assert_eq!(key.prefix, Some('-'));
		assert_eq!(key.delimiter, Some('-'));
		// Excludes both the token delimiter and the global default.
		assert_eq!(key.pattern, "[^-\\/]+?");
	}

	#[test]
	fn test_unmatched_parenthesis_stays_literal() {
		let tokens = parse("/:foo(abc", &ParseOptions::default());
		assert_eq!(tokens.len(), 2);
		let Token::Key(key) = &tokens[0] else {
			panic!("expected a parameter token");
		};
		assert_eq!(key.name, named("foo"));
		assert_eq!(key.pattern, "[^\\/]+?");
		assert_eq!(tokens[1], Token::Static("(abc".to_string()));
	}

	#[test]
	fn test_bare_colon_stays_literal() {
		let tokens = parse("/a:/b", &ParseOptions::default());
		assert_eq!(tokens, vec![Token::Static("/a:/b".to_string())]);
	}

	#[test]
	fn test_trailing_backslash_stays_literal() {
		let tokens = parse("/a\\", &ParseOptions::default());
		assert_eq!(tokens, vec![Token::Static("/a\\".to_string())]);
	}

	#[test]
	fn test_custom_delimiter() {
		let options = ParseOptions {
			delimiter: '.',
			..ParseOptions::default()
		};
		let tokens = parse(":domain.:tld", &options);
		let Token::Key(domain) = &tokens[0] else {
			panic!("expected a parameter token");
		};
		assert_eq!(domain.prefix, None);
		assert_eq!(domain.delimiter, Some('.'));
		assert_eq!(domain.pattern, "[^\\.]+?");
		let Token::Key(tld) = &tokens[1] else {
			panic!("expected a parameter token");
		};
		assert_eq!(tld.prefix, Some('.'));
	}

	#[test]
	fn test_token_order_matches_scan_order() {
		let tokens = parse("/a/:b/c/(\\d+)", &ParseOptions::default());
		let rendered: Vec<String> = tokens
			.iter()
			.map(|t| match t {
				Token::Static(s) => format!("lit:{}", s),
				Token::Key(k) => format!("key:{}", k.name),
			})
			.collect();
		assert_eq!(rendered, vec!["lit:/a", "key:b", "lit:/c", "key:0"]);
	}
}
