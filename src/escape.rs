//! Escaping helpers for embedding text in synthesized regex source.
//!
//! Two related but distinct contexts: verbatim literal text (every regex
//! metacharacter escaped) and user-supplied group text (only the characters
//! that would break out of a parenthesized group or collide with the scanner
//! grammar).

/// Escapes a string for verbatim matching inside regex source.
pub(crate) fn escape_string(value: &str) -> String {
	let mut out = String::with_capacity(value.len());
	for c in value.chars() {
		match c {
			'.' | '+' | '*' | '?' | '=' | '^' | '!' | ':' | '$' | '{' | '}' | '(' | ')'
			| '[' | ']' | '|' | '/' | '\\' => {
				out.push('\\');
				out.push(c);
			}
			_ => out.push(c),
		}
	}
	out
}

/// Escapes a single character for verbatim matching inside regex source.
pub(crate) fn escape_char(c: char) -> String {
	escape_string(c.encode_utf8(&mut [0u8; 4]))
}

/// Escapes custom sub-pattern text for safe embedding in a capture group.
///
/// The text is already regex source written by the pattern author, so only
/// the characters that would terminate the group or be re-parsed by the
/// tokenizer are escaped.
pub(crate) fn escape_group(group: &str) -> String {
	let mut out = String::with_capacity(group.len());
	for c in group.chars() {
		match c {
			'=' | '!' | ':' | '$' | '/' | '(' | ')' => {
				out.push('\\');
				out.push(c);
			}
			_ => out.push(c),
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_escape_string_metacharacters() {
		assert_eq!(escape_string("/user"), "\\/user");
		assert_eq!(escape_string("a.b"), "a\\.b");
		assert_eq!(escape_string("{}()[]"), "\\{\\}\\(\\)\\[\\]");
		assert_eq!(escape_string("plain"), "plain");
	}

	#[test]
	fn test_escape_char() {
		assert_eq!(escape_char('/'), "\\/");
		assert_eq!(escape_char('-'), "-");
	}

	#[test]
	fn test_escape_group_leaves_regex_syntax() {
		assert_eq!(escape_group("\\d+"), "\\d+");
		assert_eq!(escape_group("[a-z]{2}"), "[a-z]{2}");
		assert_eq!(escape_group("a/b"), "a\\/b");
		assert_eq!(escape_group("x=1"), "x\\=1");
	}
}
