// Tokenizer tests: the token stream is a stable, serializable contract
// shared by the matcher and the render function.

use pathexp::{Key, KeyName, ParseOptions, Token, parse};

// Test: Literal runs collapse into single static tokens
#[test]
fn test_static_runs_collapse() {
	let tokens = parse("/user/list", &ParseOptions::default());
	assert_eq!(tokens, vec![Token::Static("/user/list".to_string())]);
}

// Test: A named parameter adopts the preceding character as its prefix
#[test]
fn test_named_parameter_token() {
	let tokens = parse("/user/:id", &ParseOptions::default());
	assert_eq!(
		tokens,
		vec![
			Token::Static("/user".to_string()),
			Token::Key(Key {
				name: KeyName::Name("id".to_string()),
				prefix: Some('/'),
				delimiter: Some('/'),
				optional: false,
				repeat: false,
				pattern: "[^\\/]+?".to_string(),
			}),
		]
	);
}

// Test: Anonymous groups are numbered in order of appearance
#[test]
fn test_anonymous_groups_numbered() {
	let tokens = parse("/(\\d+)/:name/(\\w+)", &ParseOptions::default());
	let names: Vec<String> = tokens
		.iter()
		.filter_map(|token| match token {
			Token::Key(key) => Some(key.name.to_string()),
			Token::Static(_) => None,
		})
		.collect();
	assert_eq!(names, vec!["0", "name", "1"]);
}

// Test: Token streams serialize to the documented wire shape
#[test]
fn test_token_serialization_shape() {
	let tokens = parse("/user/:id(\\d+)?", &ParseOptions::default());
	let json = serde_json::to_value(&tokens).unwrap();
	assert_eq!(
		json,
		serde_json::json!([
			"/user",
			{
				"name": "id",
				"prefix": "/",
				"delimiter": "/",
				"optional": true,
				"repeat": false,
				"pattern": "\\d+"
			}
		])
	);
}

// Test: Positional key names serialize as numbers, not strings
#[test]
fn test_positional_name_serializes_as_number() {
	let tokens = parse("/(\\d+)", &ParseOptions::default());
	// The leading slash becomes the group's prefix, so the key is the only
	// token.
	let json = serde_json::to_value(&tokens).unwrap();
	assert_eq!(json[0]["name"], serde_json::json!(0));
	assert_eq!(json[0]["prefix"], serde_json::json!("/"));
}

// Test: Token streams survive a serialize/deserialize cycle
#[test]
fn test_token_deserialization() {
	let tokens = parse("/files/:path+", &ParseOptions::default());
	let json = serde_json::to_string(&tokens).unwrap();
	let restored: Vec<Token> = serde_json::from_str(&json).unwrap();
	assert_eq!(restored, tokens);
}
