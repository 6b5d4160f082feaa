//! Data models for project aggregation.
//!
//! A project record is an open-ended JSON object: the aggregator only
//! understands `visible`, `id` and `has_wiki`, everything else passes
//! through in the order it appeared in `info.json`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Key holding the normalized visibility flag.
pub const VISIBLE_KEY: &str = "visible";
/// Key holding the folder-derived project id.
pub const ID_KEY: &str = "id";
/// Key set when the project folder has a `README.md`.
pub const HAS_WIKI_KEY: &str = "has_wiki";

/// Raw shape of the `visible` field before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Visibility {
    /// A native JSON boolean.
    Flag(bool),
    /// A string, compared case-insensitively against `"false"`.
    Text(String),
    /// Any other JSON value (number, null, array, object).
    Other(Value),
    /// Field not present.
    Absent,
}

impl Visibility {
    /// Classify the source value of the `visible` field.
    pub fn from_field(value: Option<&Value>) -> Self {
        match value {
            None => Visibility::Absent,
            Some(Value::Bool(b)) => Visibility::Flag(*b),
            Some(Value::String(s)) => Visibility::Text(s.clone()),
            Some(other) => Visibility::Other(other.clone()),
        }
    }

    /// Only an explicit `false` hides a project.
    pub fn is_visible(&self) -> bool {
        match self {
            Visibility::Flag(b) => *b,
            Visibility::Text(s) => !s.eq_ignore_ascii_case("false"),
            Visibility::Other(_) | Visibility::Absent => true,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Flag(b) => write!(f, "{}", b),
            Visibility::Text(s) => write!(f, "{:?}", s),
            Visibility::Other(v) => write!(f, "{}", v),
            Visibility::Absent => write!(f, "<absent>"),
        }
    }
}

/// One normalized project entry of the generated data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectRecord {
    fields: Map<String, Value>,
}

impl ProjectRecord {
    /// Build a record from the parsed `info.json` object.
    ///
    /// Keys already present keep their position and only get a new value;
    /// missing ones are appended as `visible`, `id`, `has_wiki`.
    pub fn from_metadata(id: &str, mut fields: Map<String, Value>, has_wiki: bool) -> Self {
        let visible = Visibility::from_field(fields.get(VISIBLE_KEY)).is_visible();

        fields.insert(VISIBLE_KEY.to_string(), Value::Bool(visible));
        fields.insert(ID_KEY.to_string(), Value::String(id.to_string()));
        fields.insert(HAS_WIKI_KEY.to_string(), Value::Bool(has_wiki));

        Self { fields }
    }

    /// Folder-derived id.
    pub fn id(&self) -> &str {
        self.fields
            .get(ID_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn visible(&self) -> bool {
        self.fields
            .get(VISIBLE_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    pub fn has_wiki(&self) -> bool {
        self.fields
            .get(HAS_WIKI_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

#[cfg(test)]
impl ProjectRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Human-readable name of a JSON value's type, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
