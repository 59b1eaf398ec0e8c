//! # pathexp
//!
//! Express-style path pattern parsing and regex synthesis.
//!
//! A pattern like `/user/:id` is tokenized into literal fragments and
//! parameter descriptors, then compiled in either direction:
//!
//! - **Matching**: [`path_to_regexp`] / [`PathRegexp`] synthesize one regex
//!   whose capture groups align with an ordered list of [`Key`] descriptors.
//! - **Rendering**: [`compile`] / [`tokens_to_function`] build a
//!   [`PathFunction`] that renders a concrete path from named values, with
//!   per-segment validation and percent-encoding.
//!
//! The pattern grammar supports named parameters (`:id`), custom
//! sub-patterns (`:id(\d+)`), anonymous groups (`(\d+)`), optional and
//! repeating modifiers (`?`, `+`, `*`), and backslash escapes.
//!
//! # Examples
//!
//! ## Matching
//!
//! ```
//! use pathexp::{PathRegexp, RegexpOptions};
//!
//! let matcher = PathRegexp::new("/user/:id(\\d+)", &RegexpOptions::default()).unwrap();
//! assert!(matcher.is_match("/user/42"));
//! assert!(!matcher.is_match("/user/alice"));
//!
//! let params = matcher.params("/user/42").unwrap();
//! assert_eq!(params.get("id"), Some(&"42".to_string()));
//! ```
//!
//! ## Rendering
//!
//! ```
//! use pathexp::{ParseOptions, RenderOptions, Value, compile};
//! use std::collections::HashMap;
//!
//! let to_path = compile("/user/:id", &ParseOptions::default()).unwrap();
//! let mut data = HashMap::new();
//! data.insert("id".to_string(), Value::from("42"));
//! assert_eq!(to_path.render(&data, &RenderOptions::default()).unwrap(), "/user/42");
//! ```

pub mod compile;
pub mod error;
mod escape;
pub mod parse;
pub mod regexp;
pub mod token;

pub use compile::{
	Params, PathFunction, RenderOptions, Value, compile, encode_segment, tokens_to_function,
};
pub use error::{PatternError, RenderError};
pub use parse::{DEFAULT_DELIMITER, ParseOptions, parse};
pub use regexp::{Path, PathRegexp, RegexpOptions, path_to_regexp, tokens_to_regexp};
pub use token::{Key, KeyName, Token};
