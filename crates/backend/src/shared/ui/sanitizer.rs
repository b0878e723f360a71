use contracts::shared::table_config::{ConfigValue, SerializationIssue};

/// JSON-compatibility checker and repairer for configuration values
pub trait JsonSanitizer: Send + Sync {
    /// Lists every location that would fail JSON serialization
    fn validate(&self, value: &ConfigValue) -> Vec<SerializationIssue>;

    /// Returns a copy in which every such location has been converted
    fn ensure_serializable(&self, value: ConfigValue) -> ConfigValue;
}

/// Non-finite floats become `null`, datetimes become strings
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultJsonSanitizer;

impl DefaultJsonSanitizer {
    fn collect(value: &ConfigValue, path: &mut String, issues: &mut Vec<SerializationIssue>) {
        match value {
            ConfigValue::Float(f) if !f.is_finite() => issues.push(SerializationIssue {
                path: path.clone(),
                message: format!("float {} has no JSON representation", f),
            }),
            ConfigValue::Datetime(dt) => issues.push(SerializationIssue {
                path: path.clone(),
                message: format!("datetime {} is not a JSON type", dt),
            }),
            ConfigValue::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let len = path.len();
                    path.push_str(&format!("/{}", index));
                    Self::collect(item, path, issues);
                    path.truncate(len);
                }
            }
            ConfigValue::Table(map) => {
                for (key, item) in map {
                    let len = path.len();
                    path.push('/');
                    path.push_str(&escape_pointer_token(key));
                    Self::collect(item, path, issues);
                    path.truncate(len);
                }
            }
            _ => {}
        }
    }
}

impl JsonSanitizer for DefaultJsonSanitizer {
    fn validate(&self, value: &ConfigValue) -> Vec<SerializationIssue> {
        let mut issues = Vec::new();
        Self::collect(value, &mut String::new(), &mut issues);
        issues
    }

    fn ensure_serializable(&self, value: ConfigValue) -> ConfigValue {
        match value {
            ConfigValue::Float(f) if !f.is_finite() => ConfigValue::Null,
            ConfigValue::Datetime(dt) => ConfigValue::String(normalize_datetime(dt)),
            ConfigValue::Array(items) => ConfigValue::Array(
                items
                    .into_iter()
                    .map(|item| self.ensure_serializable(item))
                    .collect(),
            ),
            ConfigValue::Table(map) => ConfigValue::Table(
                map.into_iter()
                    .map(|(key, item)| (key, self.ensure_serializable(item)))
                    .collect(),
            ),
            other => other,
        }
    }
}

/// Escapes a key for use as a JSON pointer reference token (RFC 6901)
pub fn escape_pointer_token(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// Offset datetimes are rendered as RFC 3339; local dates and times keep
/// their literal form.
fn normalize_datetime(raw: String) -> String {
    match chrono::DateTime::parse_from_rfc3339(&raw) {
        Ok(dt) => dt.to_rfc3339(),
        Err(_) => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample() -> ConfigValue {
        let mut column = BTreeMap::new();
        column.insert("field".to_string(), ConfigValue::String("revenue".into()));
        column.insert("width".to_string(), ConfigValue::Float(f64::INFINITY));
        column.insert(
            "since".to_string(),
            ConfigValue::Datetime("2024-03-01T10:00:00Z".into()),
        );
        ConfigValue::Array(vec![
            ConfigValue::Table(column),
            ConfigValue::Integer(3),
        ])
    }

    #[test]
    fn test_validate_reports_paths() {
        let issues = DefaultJsonSanitizer.validate(&sample());
        let paths: Vec<&str> = issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["/0/since", "/0/width"]);
    }

    #[test]
    fn test_clean_value_has_no_issues() {
        let value = ConfigValue::Array(vec![ConfigValue::String("name".into()), ConfigValue::Float(1.5)]);
        assert!(DefaultJsonSanitizer.validate(&value).is_empty());
    }

    #[test]
    fn test_ensure_serializable_repairs_everything() {
        let repaired = DefaultJsonSanitizer.ensure_serializable(sample());
        assert!(DefaultJsonSanitizer.validate(&repaired).is_empty());

        let json = serde_json::to_value(&repaired).unwrap();
        assert_eq!(json[0]["width"], serde_json::Value::Null);
        assert_eq!(json[0]["since"], "2024-03-01T10:00:00+00:00");
        assert_eq!(json[1], 3);
    }

    #[test]
    fn test_local_date_keeps_literal() {
        let repaired =
            DefaultJsonSanitizer.ensure_serializable(ConfigValue::Datetime("2024-03-01".into()));
        assert_eq!(repaired, ConfigValue::String("2024-03-01".into()));
    }

    #[test]
    fn test_paths_escape_pointer_characters() {
        let mut inner = BTreeMap::new();
        inner.insert("a/b~c".to_string(), ConfigValue::Float(f64::NAN));
        let value = ConfigValue::Table(inner);

        let issues = DefaultJsonSanitizer.validate(&value);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "/a~1b~0c");
    }
}
