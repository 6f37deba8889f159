const ELLIPSIS: &str = "...";

/// First `max_chars` characters of `body`, with an ellipsis when anything was cut.
pub fn preview(body: &str, max_chars: usize) -> String {
	match body.char_indices().nth(max_chars) {
		Some((cut, _)) => format!("{}{ELLIPSIS}", &body[..cut]),
		None => body.to_string(),
	}
}

/// Readable title for a note without one: underscores become spaces.
pub fn title_from_stem(stem: &str) -> String {
	stem.replace('_', " ")
}
