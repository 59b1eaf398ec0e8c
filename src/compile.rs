//! Reverse operation: compile a token sequence into a function that renders
//! a concrete path from named values, validating and encoding each segment.

use std::collections::HashMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

use crate::error::{PatternError, RenderError};
use crate::parse::{DEFAULT_DELIMITER, ParseOptions, parse};
use crate::token::{Key, KeyName, Token};

/// Characters percent-encoded by the default segment encoder: everything but
/// ASCII alphanumerics and `- _ . ! ~ * ' ( )`.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')');

/// Percent-encodes a value for use as a URL path segment.
///
/// This is the default encoder applied by [`PathFunction::render`]; the
/// delimiter character is encoded too, so an encoded value always fits in a
/// single segment.
pub fn encode_segment(value: &str) -> String {
	utf8_percent_encode(value, SEGMENT).to_string()
}

/// A value supplied for one parameter: a single segment, or a list of
/// segments for repeating parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	/// One path segment.
	Single(String),
	/// One segment per occurrence of a repeating parameter.
	List(Vec<String>),
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Single(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Single(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Single(value.to_string())
	}
}

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		Self::Single(value.to_string())
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Single(value.to_string())
	}
}

impl From<Vec<String>> for Value {
	fn from(values: Vec<String>) -> Self {
		Self::List(values)
	}
}

impl From<Vec<&str>> for Value {
	fn from(values: Vec<&str>) -> Self {
		Self::List(values.iter().map(|v| v.to_string()).collect())
	}
}

/// Data record passed to [`PathFunction::render`]. Named parameters are
/// looked up by name; positional parameters by their decimal index (`"0"`,
/// `"1"`, ...).
pub type Params = HashMap<String, Value>;

/// Per-call rendering options.
#[derive(Default)]
pub struct RenderOptions<'a> {
	/// Segment encoder override. Receives the raw value and its key;
	/// defaults to [`encode_segment`].
	pub encode: Option<&'a dyn Fn(&str, &Key) -> String>,
}

/// One token paired with its pre-compiled validation regex.
enum Part {
	Static(String),
	Key(Key, Regex),
}

/// A compiled render function: the token sequence plus one anchored
/// validation regex per parameter, built once and reusable across calls.
pub struct PathFunction {
	parts: Vec<Part>,
}

/// Parses a pattern and compiles it into a render function.
///
/// # Examples
///
/// ```
/// use pathexp::{ParseOptions, RenderOptions, Value, compile};
/// use std::collections::HashMap;
///
/// let to_path = compile("/user/:id", &ParseOptions::default()).unwrap();
/// let mut data = HashMap::new();
/// data.insert("id".to_string(), Value::from(123_i64));
/// let path = to_path.render(&data, &RenderOptions::default()).unwrap();
/// assert_eq!(path, "/user/123");
/// ```
pub fn compile(pattern: &str, options: &ParseOptions) -> Result<PathFunction, PatternError> {
	tokens_to_function(parse(pattern, options))
}

/// Compiles a token sequence into a render function, pre-compiling one
/// validation regex per parameter token. The regex is anchored on both ends,
/// so a candidate value must match the token's pattern in its entirety.
pub fn tokens_to_function(tokens: Vec<Token>) -> Result<PathFunction, PatternError> {
	let parts = tokens
		.into_iter()
		.map(|token| match token {
			Token::Static(text) => Ok(Part::Static(text)),
			Token::Key(key) => {
				let validator = Regex::new(&format!("^(?:{})$", key.pattern))?;
				Ok(Part::Key(key, validator))
			}
		})
		.collect::<Result<Vec<_>, PatternError>>()?;
	Ok(PathFunction { parts })
}

impl PathFunction {
	/// Renders a concrete path from the supplied data record.
	///
	/// Fails with [`RenderError`] when a required parameter is missing, a
	/// value's shape does not match the parameter's `repeat` flag, or an
	/// encoded segment fails its pattern. No partial result is returned on
	/// failure.
	pub fn render(&self, data: &Params, options: &RenderOptions<'_>) -> Result<String, RenderError> {
		let default_encode = |value: &str, _key: &Key| encode_segment(value);
		let encode: &dyn Fn(&str, &Key) -> String = options.encode.unwrap_or(&default_encode);

		let mut path = String::new();
		for part in &self.parts {
			let (key, validator) = match part {
				Part::Static(text) => {
					path.push_str(text);
					continue;
				}
				Part::Key(key, validator) => (key, validator),
			};

			match lookup(data, &key.name) {
				Some(Value::List(values)) => {
					if !key.repeat {
						return Err(RenderError::UnexpectedArray {
							name: key.name.clone(),
						});
					}
					if values.is_empty() {
						if key.optional {
							continue;
						}
						return Err(RenderError::EmptyArray {
							name: key.name.clone(),
						});
					}
					for (i, value) in values.iter().enumerate() {
						let segment = encode(value, key);
						if !validator.is_match(&segment) {
							return Err(RenderError::ElementMismatch {
								name: key.name.clone(),
								pattern: key.pattern.clone(),
							});
						}
						if i == 0 {
							if let Some(prefix) = key.prefix {
								path.push(prefix);
							}
						} else {
							path.push(key.delimiter.unwrap_or(DEFAULT_DELIMITER));
						}
						path.push_str(&segment);
					}
				}
				Some(Value::Single(value)) => {
					let segment = encode(value, key);
					if !validator.is_match(&segment) {
						return Err(RenderError::Mismatch {
							name: key.name.clone(),
							pattern: key.pattern.clone(),
							value: segment,
						});
					}
					if let Some(prefix) = key.prefix {
						path.push(prefix);
					}
					path.push_str(&segment);
				}
				None => {
					if key.optional {
						continue;
					}
					return Err(RenderError::Missing {
						name: key.name.clone(),
						expected: key.expected_shape(),
					});
				}
			}
		}

		Ok(path)
	}
}

fn lookup<'a>(data: &'a Params, name: &KeyName) -> Option<&'a Value> {
	match name {
		KeyName::Name(name) => data.get(name),
		KeyName::Index(index) => data.get(index.to_string().as_str()),
	}
}
