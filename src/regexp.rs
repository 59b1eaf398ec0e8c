//! Regex synthesis: turn a token sequence (or a pre-built regex, or a list
//! of patterns) into one matching regex plus capture-group key descriptors.
//!
//! Boundary semantics (optional trailing delimiter, non-consuming end
//! assertions, custom terminator sets) are expressed with lookaheads, so the
//! synthesized matcher uses the `fancy-regex` engine.

use std::collections::HashMap;

use fancy_regex::{Regex, RegexBuilder};
use tracing::{debug, trace};

use crate::error::PatternError;
use crate::escape::{escape_char, escape_string};
use crate::parse::{DEFAULT_DELIMITER, ParseOptions, parse};
use crate::token::{Key, KeyName, Token};

/// Options controlling regex synthesis.
#[derive(Debug, Clone)]
pub struct RegexpOptions {
	/// Segment separator; used for default parameter patterns and trailing
	/// delimiter handling.
	pub delimiter: char,
	/// When `true`, no optional trailing delimiter is allowed.
	pub strict: bool,
	/// Anchor the match at the start of the subject.
	pub start: bool,
	/// Require the match to reach the end of the subject (or a terminator).
	pub end: bool,
	/// Terminator sequences that may end a match in place of end-of-input.
	pub ends_with: Vec<String>,
	/// Case-sensitive matching. Matching is case-insensitive by default.
	pub sensitive: bool,
	/// Prefix whitelist forwarded to the tokenizer when the source is a
	/// string pattern.
	pub whitelist: Option<Vec<char>>,
}

impl Default for RegexpOptions {
	fn default() -> Self {
		Self {
			delimiter: DEFAULT_DELIMITER,
			strict: false,
			start: true,
			end: true,
			ends_with: Vec::new(),
			sensitive: false,
			whitelist: None,
		}
	}
}

/// A matcher source accepted by [`path_to_regexp`]: a string pattern, an
/// already-built regex, or a list of either.
#[derive(Debug, Clone)]
pub enum Path {
	/// A path-pattern string to tokenize and synthesize.
	Pattern(String),
	/// A pre-built regex used as-is; only positional keys are derived.
	Regexp(Regex),
	/// Multiple sources OR-combined into one matcher.
	List(Vec<Path>),
}

impl From<&str> for Path {
	fn from(pattern: &str) -> Self {
		Self::Pattern(pattern.to_string())
	}
}

impl From<String> for Path {
	fn from(pattern: String) -> Self {
		Self::Pattern(pattern)
	}
}

impl From<Regex> for Path {
	fn from(regex: Regex) -> Self {
		Self::Regexp(regex)
	}
}

impl From<Vec<Path>> for Path {
	fn from(paths: Vec<Path>) -> Self {
		Self::List(paths)
	}
}

impl From<Vec<&str>> for Path {
	fn from(patterns: Vec<&str>) -> Self {
		Self::List(patterns.into_iter().map(Path::from).collect())
	}
}

fn build_regex(source: &str, options: &RegexpOptions) -> Result<Regex, PatternError> {
	trace!(source, "compiling synthesized matcher");
	let regex = RegexBuilder::new(source)
		.case_insensitive(!options.sensitive)
		.build()?;
	Ok(regex)
}

/// Synthesizes a regex from a token sequence.
///
/// Walks tokens in order: literals are escaped verbatim; each parameter
/// becomes one capture group (repeating parameters expand to a
/// delimiter-joined repetition), and its key descriptor is appended to
/// `keys` in capture-group order. Anchoring and trailing behavior follow
/// `options.start`, `options.end`, `options.strict`, and `options.ends_with`.
///
/// # Examples
///
/// ```
/// use pathexp::{ParseOptions, RegexpOptions, parse, tokens_to_regexp};
///
/// let tokens = parse("/user/:id", &ParseOptions::default());
/// let mut keys = Vec::new();
/// let regex = tokens_to_regexp(&tokens, Some(&mut keys), &RegexpOptions::default()).unwrap();
/// assert!(regex.is_match("/user/42").unwrap());
/// assert_eq!(keys.len(), 1);
/// ```
pub fn tokens_to_regexp(
	tokens: &[Token],
	mut keys: Option<&mut Vec<Key>>,
	options: &RegexpOptions,
) -> Result<Regex, PatternError> {
	let delimiter = escape_char(options.delimiter);
	let ends_with = options
		.ends_with
		.iter()
		.map(|terminator| escape_string(terminator))
		.chain(std::iter::once("$".to_string()))
		.collect::<Vec<_>>()
		.join("|");

	let mut route = if options.start {
		String::from("^")
	} else {
		String::new()
	};

	for token in tokens {
		match token {
			Token::Static(text) => route.push_str(&escape_string(text)),
			Token::Key(key) => {
				let capture = if key.repeat {
					let separator = escape_char(key.delimiter.unwrap_or(options.delimiter));
					format!("(?:{})(?:{}(?:{}))*", key.pattern, separator, key.pattern)
				} else {
					key.pattern.clone()
				};

				if let Some(keys) = keys.as_deref_mut() {
					keys.push(key.clone());
				}

				if key.optional {
					match key.prefix {
						Some(prefix) => {
							route.push_str(&format!("(?:{}({}))?", escape_char(prefix), capture));
						}
						None => route.push_str(&format!("({})?", capture)),
					}
				} else {
					if let Some(prefix) = key.prefix {
						route.push_str(&escape_char(prefix));
					}
					route.push_str(&format!("({})", capture));
				}
			}
		}
	}

	if options.end {
		if !options.strict {
			route.push_str(&format!("(?:{})?", delimiter));
		}
		if ends_with == "$" {
			route.push('$');
		} else {
			route.push_str(&format!("(?={})", ends_with));
		}
	} else {
		// When the pattern already ends in the delimiter the boundary is
		// unambiguous; otherwise require a delimiter or terminator ahead so
		// `/user` cannot match inside `/username`.
		let end_delimited = match tokens.last() {
			Some(Token::Static(text)) => text.ends_with(options.delimiter),
			Some(Token::Key(_)) => false,
			None => true,
		};
		if !options.strict {
			route.push_str(&format!("(?:{}(?={}))?", delimiter, ends_with));
		}
		if !end_delimited {
			route.push_str(&format!("(?={}|{})", delimiter, ends_with));
		}
	}

	build_regex(&route, options)
}

/// Derives positional key descriptors from a pre-built regex: one key per
/// capturing group, in left-to-right order. A capturing group is any `(` not
/// immediately followed by `?`; escaped parens are counted too, for
/// compatibility with the reference behavior.
fn regexp_to_regexp(regex: &Regex, keys: Option<&mut Vec<Key>>) -> Regex {
	if let Some(keys) = keys {
		let source = regex.as_str().as_bytes();
		let mut index = 0;
		for (i, &byte) in source.iter().enumerate() {
			if byte == b'(' && source.get(i + 1) != Some(&b'?') {
				keys.push(Key {
					name: KeyName::Index(index),
					prefix: None,
					delimiter: None,
					optional: false,
					repeat: false,
					pattern: String::new(),
				});
				index += 1;
			}
		}
	}
	regex.clone()
}

/// Synthesizes each element independently, then OR-combines the resulting
/// sources inside one non-capturing group sharing one flag set.
fn array_to_regexp(
	paths: &[Path],
	mut keys: Option<&mut Vec<Key>>,
	options: &RegexpOptions,
) -> Result<Regex, PatternError> {
	let mut parts = Vec::with_capacity(paths.len());
	for path in paths {
		let regex = path_to_regexp(path, keys.as_deref_mut(), options)?;
		parts.push(regex.as_str().to_string());
	}
	build_regex(&format!("(?:{})", parts.join("|")), options)
}

fn string_to_regexp(
	pattern: &str,
	keys: Option<&mut Vec<Key>>,
	options: &RegexpOptions,
) -> Result<Regex, PatternError> {
	let parse_options = ParseOptions {
		delimiter: options.delimiter,
		whitelist: options.whitelist.clone(),
	};
	tokens_to_regexp(&parse(pattern, &parse_options), keys, options)
}

/// Builds one matching regex from a path source, appending one key
/// descriptor per capture group to `keys` when supplied.
///
/// Dispatches on the source variant: a pre-built regex passes through with
/// positional keys derived from its source; a list synthesizes every element
/// recursively and OR-combines them; a string pattern is tokenized and
/// synthesized.
pub fn path_to_regexp(
	path: &Path,
	keys: Option<&mut Vec<Key>>,
	options: &RegexpOptions,
) -> Result<Regex, PatternError> {
	match path {
		Path::Regexp(regex) => Ok(regexp_to_regexp(regex, keys)),
		Path::List(paths) => array_to_regexp(paths, keys, options),
		Path::Pattern(pattern) => string_to_regexp(pattern, keys, options),
	}
}

/// A compiled matcher: the synthesized regex plus its capture-group keys,
/// immutable after construction and freely shareable across threads.
#[derive(Debug, Clone)]
pub struct PathRegexp {
	regex: Regex,
	keys: Vec<Key>,
}

impl PathRegexp {
	/// Builds a matcher from any path source.
	///
	/// # Examples
	///
	/// ```
	/// use pathexp::{PathRegexp, RegexpOptions};
	///
	/// let matcher = PathRegexp::new("/user/:id", &RegexpOptions::default()).unwrap();
	/// assert!(matcher.is_match("/user/42"));
	///
	/// let params = matcher.params("/user/42").unwrap();
	/// assert_eq!(params.get("id"), Some(&"42".to_string()));
	/// ```
	pub fn new(path: impl Into<Path>, options: &RegexpOptions) -> Result<Self, PatternError> {
		let path = path.into();
		let mut keys = Vec::new();
		let regex = path_to_regexp(&path, Some(&mut keys), options)?;
		debug!(source = regex.as_str(), keys = keys.len(), "built path matcher");
		Ok(Self { regex, keys })
	}

	/// The synthesized regex.
	pub fn regex(&self) -> &Regex {
		&self.regex
	}

	/// Key descriptors in capture-group order.
	pub fn keys(&self) -> &[Key] {
		&self.keys
	}

	/// Tests a subject string against the matcher.
	pub fn is_match(&self, subject: &str) -> bool {
		self.regex.is_match(subject).unwrap_or(false)
	}

	/// Captured values in key order, or `None` when the subject does not
	/// match. Optional parameters that did not participate are `None`.
	pub fn captures(&self, subject: &str) -> Option<Vec<Option<String>>> {
		let captures = self.regex.captures(subject).ok()??;
		Some(
			(1..captures.len())
				.map(|i| captures.get(i).map(|m| m.as_str().to_string()))
				.collect(),
		)
	}

	/// Captured values keyed by parameter name (positional keys use their
	/// decimal index), or `None` when the subject does not match.
	pub fn params(&self, subject: &str) -> Option<HashMap<String, String>> {
		let captures = self.regex.captures(subject).ok()??;
		let mut params = HashMap::new();
		for (i, key) in self.keys.iter().enumerate() {
			if let Some(capture) = captures.get(i + 1) {
				params.insert(key.name.to_string(), capture.as_str().to_string());
			}
		}
		Some(params)
	}
}
