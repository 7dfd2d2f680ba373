//! Frontmatter extraction and parsing.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_yaml::Value;

/// Delimiter that opens and closes a frontmatter block.
pub const DELIMITER: &str = "---";

/// Flat key/value metadata parsed from the head of a markdown document.
///
/// Keys are kept sorted so the JSON form is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Frontmatter(BTreeMap<String, String>);

impl Frontmatter {
    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for Frontmatter {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

/// Extract frontmatter from raw markdown bytes.
///
/// Returns `None` when the document does not start with `---`, when the
/// block is not closed, or when its YAML is not a flat mapping. A broken
/// block is treated as "no metadata" and never surfaces as an error.
///
/// Splitting is textual: the content is cut on the first two `---`
/// occurrences, so a value containing `---` ends the block early.
pub fn extract_frontmatter(source: &[u8]) -> Option<Frontmatter> {
    let content = String::from_utf8_lossy(source);

    split_frontmatter(&content).map(|(frontmatter, _)| frontmatter)
}

/// Split a document into its frontmatter and the body that follows it.
///
/// Uses the same rules as [`extract_frontmatter`]. The body is everything
/// after the closing `---`. Returns `None` whenever there is no valid block,
/// in which case the whole document is body.
pub fn split_frontmatter(content: &str) -> Option<(Frontmatter, &str)> {
    let content = content.trim();

    if !content.starts_with(DELIMITER) {
        return None;
    }

    let parts: Vec<&str> = content.splitn(3, DELIMITER).collect();
    if parts.len() < 3 {
        return None;
    }

    parse_flat_yaml(parts[1].trim()).map(|frontmatter| (frontmatter, parts[2]))
}

/// Parse a YAML mapping whose values are all scalars.
fn parse_flat_yaml(yaml: &str) -> Option<Frontmatter> {
    let raw: BTreeMap<String, Value> = serde_yaml::from_str(yaml).ok()?;

    raw.into_iter()
        .map(|(key, value)| scalar_to_string(value).map(|v| (key, v)))
        .collect::<Option<BTreeMap<_, _>>>()
        .map(Frontmatter)
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}
