//! Table display configuration
//!
//! `ConfigValue` is the raw value a configuration source hands over. It is
//! wider than JSON: TOML files can carry datetimes and non-finite floats,
//! which have no JSON representation. Serializing such a value fails
//! instead of silently writing `null`, so `serde_json::to_value` doubles
//! as a serializability check.
//!
//! `TableConfig` is the validated shape handed to listing code: a mapping
//! that always contains a `columns` sequence.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const COLUMNS_KEY: &str = "columns";

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Datetime literal as written in the source (RFC 3339 / TOML form)
    Datetime(String),
    Array(Vec<ConfigValue>),
    Table(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Datetime(_) => "datetime",
            ConfigValue::Array(_) => "array",
            ConfigValue::Table(_) => "table",
        }
    }

    pub fn as_table(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        match self {
            ConfigValue::Table(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Null => serializer.serialize_unit(),
            ConfigValue::Bool(b) => serializer.serialize_bool(*b),
            ConfigValue::Integer(i) => serializer.serialize_i64(*i),
            ConfigValue::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            ConfigValue::Float(f) => Err(S::Error::custom(format!(
                "float {f} has no JSON representation"
            ))),
            ConfigValue::String(s) => serializer.serialize_str(s),
            ConfigValue::Datetime(dt) => Err(S::Error::custom(format!(
                "datetime {dt} is not a JSON type"
            ))),
            ConfigValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ConfigValue::Table(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Into::into)
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => ConfigValue::Null,
            Value::Bool(b) => ConfigValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => n.as_f64().map(ConfigValue::Float).unwrap_or(ConfigValue::Null),
            },
            Value::String(s) => ConfigValue::String(s),
            Value::Array(items) => ConfigValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                ConfigValue::Table(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<toml::Value> for ConfigValue {
    fn from(value: toml::Value) -> Self {
        use toml::Value;
        match value {
            Value::String(s) => ConfigValue::String(s),
            Value::Integer(i) => ConfigValue::Integer(i),
            Value::Float(f) => ConfigValue::Float(f),
            Value::Boolean(b) => ConfigValue::Bool(b),
            Value::Datetime(dt) => ConfigValue::Datetime(dt.to_string()),
            Value::Array(items) => ConfigValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Table(map) => {
                ConfigValue::Table(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// A location in a config value that cannot be written as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializationIssue {
    /// Location inside the checked value, e.g. `/columns/2/width`
    pub path: String,
    pub message: String,
}

impl fmt::Display for SerializationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{}: {}", path, self.message)
    }
}

/// Table display configuration: columns plus other display metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TableConfig {
    entries: BTreeMap<String, ConfigValue>,
}

impl TableConfig {
    /// Minimal valid configuration: `{"columns": []}`
    pub fn fallback() -> Self {
        Self::from_entries(BTreeMap::new())
    }

    /// Builds a config from raw entries, binding `columns` to an empty
    /// sequence when it is absent or not a sequence.
    pub fn from_entries(mut entries: BTreeMap<String, ConfigValue>) -> Self {
        if !matches!(entries.get(COLUMNS_KEY), Some(ConfigValue::Array(_))) {
            entries.insert(COLUMNS_KEY.to_string(), ConfigValue::Array(Vec::new()));
        }
        Self { entries }
    }

    pub fn columns(&self) -> &[ConfigValue] {
        self.entries
            .get(COLUMNS_KEY)
            .and_then(ConfigValue::as_array)
            .unwrap_or(&[])
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    pub fn entries(&self) -> &BTreeMap<String, ConfigValue> {
        &self.entries
    }

    pub fn into_entries(self) -> BTreeMap<String, ConfigValue> {
        self.entries
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::fallback()
    }
}

impl<'de> Deserialize<'de> for TableConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, ConfigValue>::deserialize(deserializer)?;
        Ok(Self::from_entries(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fallback_has_empty_columns() {
        let config = TableConfig::fallback();
        assert!(config.columns().is_empty());
        assert_eq!(serde_json::to_value(&config).unwrap(), json!({"columns": []}));
    }

    #[test]
    fn test_non_finite_float_fails_serialization() {
        let value = ConfigValue::Array(vec![ConfigValue::Float(f64::NAN)]);
        assert!(serde_json::to_value(&value).is_err());
    }

    #[test]
    fn test_datetime_fails_serialization() {
        let value = ConfigValue::Datetime("2024-01-01T00:00:00Z".into());
        assert!(serde_json::to_string(&value).is_err());
    }

    #[test]
    fn test_from_json_keeps_structure() {
        let value: ConfigValue = json!({"columns": [{"field": "name", "width": 120}], "page_size": 50}).into();
        let table = value.as_table().unwrap();
        assert_eq!(table.get("page_size"), Some(&ConfigValue::Integer(50)));
        assert_eq!(table.get("columns").and_then(|c| c.as_array()).map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_from_toml_maps_datetime() {
        let parsed: toml::Value = toml::from_str("created = 1979-05-27T07:32:00Z").unwrap();
        let value: ConfigValue = parsed.into();
        let created = value.as_table().and_then(|t| t.get("created")).unwrap();
        assert_eq!(created.type_name(), "datetime");
    }

    #[test]
    fn test_deserialize_adds_missing_columns() {
        let config: TableConfig = serde_json::from_str(r#"{"other": 1}"#).unwrap();
        assert_eq!(config.get("other"), Some(&ConfigValue::Integer(1)));
        assert!(config.columns().is_empty());
    }

    #[test]
    fn test_issue_display() {
        let issue = SerializationIssue {
            path: "/columns/0/width".into(),
            message: "float NaN has no JSON representation".into(),
        };
        assert_eq!(issue.to_string(), "/columns/0/width: float NaN has no JSON representation");
    }
}
