//! Token and key metadata types shared by the tokenizer, the regex
//! synthesizer, and the path renderer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a captured parameter: an identifier for `:name` parameters, or a
/// zero-based ordinal for anonymous `(...)` groups and keys derived from a
/// pre-built regex.
///
/// Serializes untagged, so named keys round-trip as strings and positional
/// keys as numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyName {
	/// Zero-based ordinal of an anonymous capture.
	Index(usize),
	/// Identifier of a named parameter.
	Name(String),
}

impl fmt::Display for KeyName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Index(index) => write!(f, "{}", index),
			Self::Name(name) => f.write_str(name),
		}
	}
}

impl From<&str> for KeyName {
	fn from(name: &str) -> Self {
		Self::Name(name.to_string())
	}
}

impl From<usize> for KeyName {
	fn from(index: usize) -> Self {
		Self::Index(index)
	}
}

/// Matching metadata for one parameter, aligned with one capture group of the
/// synthesized regex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
	/// Parameter name, used as the record key during rendering.
	pub name: KeyName,
	/// Delimiter character consumed immediately before the parameter value,
	/// if the pattern had one.
	pub prefix: Option<char>,
	/// Separator between repeated occurrences. Always present for parsed
	/// tokens (the prefix, or the pattern-global delimiter); `None` only for
	/// keys derived from a pre-built regex.
	pub delimiter: Option<char>,
	/// The parameter, and its prefix, may be entirely absent.
	pub optional: bool,
	/// The parameter may occur more than once, joined by `delimiter`.
	pub repeat: bool,
	/// Regex fragment constraining acceptable values. Empty for keys derived
	/// from a pre-built regex.
	pub pattern: String,
}

impl Key {
	/// Human-readable description of the value shape this key expects,
	/// used in render error messages.
	pub(crate) fn expected_shape(&self) -> &'static str {
		if self.repeat { "an array" } else { "a string" }
	}
}

/// One parsed unit of a path pattern.
///
/// Serializes untagged: literal fragments as plain strings, parameters as
/// key-descriptor objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Token {
	/// Literal text emitted verbatim when rendering and escaped when matched.
	Static(String),
	/// A named or positional parameter.
	Key(Key),
}
