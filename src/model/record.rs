use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A board, list, card or checklist as returned by the API.
///
/// Only the fields the browser needs are typed; every other key is kept
/// verbatim in `extra` and never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub closed: bool,
    #[serde(rename = "shortUrl", default, skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,
    #[serde(rename = "desc", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Build a record from a single JSON object. Fails if `id` or `name`
    /// is missing or not a string.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Description text, empty when the record has none.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}
