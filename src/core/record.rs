use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const TITLE_KEYS: &[&str] = &["title"];
pub const DATE_KEYS: &[&str] = &["date"];
pub const DESCRIPTION_KEYS: &[&str] = &["description"];
pub const IMAGE_KEYS: &[&str] = &["image", "screenshot", "img", "thumbnail"];
pub const PRIMARY_LINK_KEYS: &[&str] = &["primaryLink", "live", "game"];
pub const SECONDARY_LINK_KEYS: &[&str] = &["secondaryLink", "links", "link", "project", "code"];
pub const CATEGORY_KEYS: &[&str] = &["category", "type"];

pub const DEFAULT_TITLE: &str = "Untitled";
const ABSENT_SENTINEL: &str = "#";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Project,
    Achievement,
}

impl RecordKind {
    /// Parses the plural form used in page paths and API routes.
    pub fn from_plural(name: &str) -> Option<Self> {
        match name {
            "projects" => Some(RecordKind::Project),
            "achievements" => Some(RecordKind::Achievement),
            _ => None,
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            RecordKind::Project => "projects",
            RecordKind::Achievement => "achievements",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// One loosely-typed element of a projects/achievements array.
///
/// Anything that is not a JSON object becomes a record with no fields, so a
/// malformed element still renders with defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Record { fields }
    }

    /// First candidate whose trimmed text is non-empty and not `"#"`, or an
    /// empty string when none qualifies.
    pub fn resolve(&self, candidate_keys: &[&str]) -> String {
        candidate_keys
            .iter()
            .filter_map(|key| self.fields.get(*key).and_then(value_text))
            .map(|text| text.trim().to_string())
            .find(|text| !text.is_empty() && text != ABSENT_SENTINEL)
            .unwrap_or_default()
    }

    pub fn normalize(&self, kind: RecordKind) -> NormalizedRecord {
        let title = self.resolve(TITLE_KEYS);
        NormalizedRecord {
            kind,
            title: if title.is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                title
            },
            date: self.resolve(DATE_KEYS),
            description: self.resolve(DESCRIPTION_KEYS),
            image: non_empty(self.resolve(IMAGE_KEYS)),
            primary_link: non_empty(self.resolve(PRIMARY_LINK_KEYS)),
            secondary_link: non_empty(self.resolve(SECONDARY_LINK_KEYS)),
            category: match kind {
                RecordKind::Achievement => non_empty(self.resolve(CATEGORY_KEYS)),
                RecordKind::Project => None,
            },
        }
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Record::new(fields),
            _ => Record::default(),
        }
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Record::from)
    }
}

/// Display fields of a record after alias resolution. Values are raw text;
/// escaping and href checks happen when the card is built.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    pub kind: RecordKind,
    pub title: String,
    pub date: String,
    pub description: String,
    pub image: Option<String>,
    pub primary_link: Option<String>,
    pub secondary_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
