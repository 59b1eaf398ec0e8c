//! Error types for matcher construction and path rendering.

use crate::token::KeyName;
use thiserror::Error;

/// Construction-time failure: a token's pattern fragment (or the assembled
/// matcher source) is not valid regex.
#[derive(Debug, Error)]
pub enum PatternError {
	/// A per-parameter validation pattern failed to compile.
	#[error("invalid parameter pattern: {0}")]
	Validation(#[from] regex::Error),
	/// The synthesized matcher source failed to compile.
	#[error("invalid matcher pattern: {0}")]
	Matcher(Box<fancy_regex::Error>),
}

impl From<fancy_regex::Error> for PatternError {
	fn from(err: fancy_regex::Error) -> Self {
		Self::Matcher(Box::new(err))
	}
}

/// Render-time validation failure. Always fatal to the individual render
/// call; the message names the offending parameter and, where applicable,
/// the expected pattern or value shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
	/// An array was supplied for a parameter that does not repeat.
	#[error("expected \"{name}\" to not repeat, but got an array")]
	UnexpectedArray {
		/// The offending parameter.
		name: KeyName,
	},
	/// An empty array was supplied for a required repeating parameter.
	#[error("expected \"{name}\" to not be empty")]
	EmptyArray {
		/// The offending parameter.
		name: KeyName,
	},
	/// An array element did not match the parameter's pattern.
	#[error("expected all \"{name}\" to match \"{pattern}\"")]
	ElementMismatch {
		/// The offending parameter.
		name: KeyName,
		/// The pattern every element must match.
		pattern: String,
	},
	/// A scalar value did not match the parameter's pattern.
	#[error("expected \"{name}\" to match \"{pattern}\", but got \"{value}\"")]
	Mismatch {
		/// The offending parameter.
		name: KeyName,
		/// The pattern the value must match.
		pattern: String,
		/// The encoded segment that failed validation.
		value: String,
	},
	/// No value was supplied for a required parameter.
	#[error("expected \"{name}\" to be {expected}")]
	Missing {
		/// The offending parameter.
		name: KeyName,
		/// `"an array"` for repeating parameters, `"a string"` otherwise.
		expected: &'static str,
	},
}
