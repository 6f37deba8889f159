use std::collections::BTreeMap;

use serde_yaml::Value;

const OPEN_FENCE: &str = "---";
const CLOSE_FENCES: [&str; 2] = ["---", "..."];

/// Scalar metadata from a note's leading YAML block, rendered as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
	fields: BTreeMap<String, String>,
}
impl FrontMatter {
	/// Returns the value for `key` unless it is absent or blank.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.fields.get(key).map(String::as_str).filter(|value| !value.trim().is_empty())
	}

	/// Returns the first non-blank value among `keys`, in order.
	pub fn first(&self, keys: &[&str]) -> Option<&str> {
		keys.iter().find_map(|key| self.get(key))
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.fields.iter().map(|(key, value)| (key.as_str(), value.as_str()))
	}
}
impl FromIterator<(String, String)> for FrontMatter {
	fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
		Self { fields: iter.into_iter().collect() }
	}
}

/// Splits `content` into its front matter and trimmed body.
///
/// Content without a well-formed block, or whose block is not a YAML mapping, yields empty
/// front matter and the whole content as body.
pub fn parse(content: &str) -> (FrontMatter, String) {
	let text = content.strip_prefix('\u{feff}').unwrap_or(content);

	if let Some((block, body)) = split(text)
		&& let Some(front_matter) = parse_block(block)
	{
		return (front_matter, body.trim().to_string());
	}

	(FrontMatter::default(), text.trim().to_string())
}

fn split(text: &str) -> Option<(&str, &str)> {
	let mut lines = text.split_inclusive('\n');
	let first = lines.next()?;

	if first.trim_end() != OPEN_FENCE {
		return None;
	}

	let start = first.len();
	let mut offset = start;

	for line in lines {
		if CLOSE_FENCES.contains(&line.trim_end()) {
			return Some((&text[start..offset], &text[offset + line.len()..]));
		}

		offset += line.len();
	}

	None
}

fn parse_block(block: &str) -> Option<FrontMatter> {
	match serde_yaml::from_str::<Value>(block) {
		Ok(Value::Mapping(mapping)) => Some(
			mapping
				.into_iter()
				.filter_map(|(key, value)| Some((scalar(key)?, scalar(value)?)))
				.collect(),
		),
		Ok(Value::Null) => Some(FrontMatter::default()),
		Ok(_) => None,
		Err(err) => {
			tracing::debug!(error = %err, "Ignoring unparsable front matter.");

			None
		},
	}
}

fn scalar(value: Value) -> Option<String> {
	match value {
		Value::String(value) => Some(value),
		Value::Number(value) => Some(value.to_string()),
		Value::Bool(value) => Some(value.to_string()),
		Value::Null | Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
	}
}
