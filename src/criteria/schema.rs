use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::NormalizeError;

/// A single model attribute as Waterline describes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub primary_key: bool,
    pub column_name: Option<String>,
    pub required: bool,
    pub unique: bool,
}

/// Descriptor of the target collection's attributes.
///
/// Held by the normalizer for membership checks only. Criteria are never
/// validated against it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    attributes: Vec<(String, Attribute)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, NormalizeError> {
        let value: Value = serde_json::from_str(json).map_err(NormalizeError::InvalidSchema)?;
        Self::from_value(value)
    }

    /// Build a schema from a JSON object of `name -> attribute`.
    ///
    /// Attribute values that are not objects (Waterline allows the shorthand
    /// `"name": "string"`) are read as a bare type.
    pub fn from_value(value: Value) -> Result<Self, NormalizeError> {
        let attributes = match value {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(NormalizeError::InvalidSchema(
                    <serde_json::Error as serde::de::Error>::custom(format!(
                        "expected an object of attributes, found {}",
                        json_type(&other)
                    )),
                ))
            }
        };

        let mut parsed = Vec::with_capacity(attributes.len());
        for (name, def) in attributes {
            let attribute = match def {
                Value::String(kind) => Attribute {
                    kind: Some(kind),
                    ..Default::default()
                },
                other => Attribute::deserialize(&other).map_err(NormalizeError::InvalidSchema)?,
            };
            parsed.push((name, attribute));
        }

        Ok(Self { attributes: parsed })
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|(n, _)| n == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|(n, _)| n == name).map(|(_, a)| a)
    }

    /// Name of the first attribute flagged as primary key.
    pub fn primary_key(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(_, a)| a.primary_key)
            .map(|(n, _)| n.as_str())
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Short JSON type name used in diagnostics.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_schema() {
        let schema = Schema::default();
        assert!(schema.is_empty());
        assert!(!schema.has_attribute("id"));
        assert_eq!(schema.primary_key(), None);
    }

    #[test]
    fn test_from_json_str() {
        let schema = Schema::from_json_str(
            r#"{
                "id": {"type": "string", "primaryKey": true},
                "name": {"type": "string", "required": true},
                "email": {"type": "string", "unique": true, "columnName": "mail"}
            }"#,
        )
        .unwrap();

        assert_eq!(schema.len(), 3);
        assert_eq!(schema.attribute_names(), vec!["id", "name", "email"]);
        assert_eq!(schema.primary_key(), Some("id"));
        assert!(schema.attribute("name").unwrap().required);
        assert_eq!(
            schema.attribute("email").unwrap().column_name.as_deref(),
            Some("mail")
        );
    }

    #[test]
    fn test_shorthand_type() {
        let schema = Schema::from_value(json!({"age": "integer"})).unwrap();
        assert_eq!(schema.attribute("age").unwrap().kind.as_deref(), Some("integer"));
    }

    #[test]
    fn test_unknown_properties_ignored() {
        let schema = Schema::from_value(json!({
            "owner": {"model": "user", "via": "pets", "type": "string"}
        }))
        .unwrap();
        assert!(schema.has_attribute("owner"));
        assert_eq!(schema.attribute("owner").unwrap().kind.as_deref(), Some("string"));
    }

    #[test]
    fn test_null_schema_is_empty() {
        let schema = Schema::from_value(Value::Null).unwrap();
        assert!(schema.is_empty());
    }

    #[test]
    fn test_non_object_schema_rejected() {
        assert!(Schema::from_value(json!([1, 2])).is_err());
        assert!(Schema::from_json_str("not json").is_err());
    }

    #[test]
    fn test_json_type() {
        assert_eq!(json_type(&json!(null)), "null");
        assert_eq!(json_type(&json!("x")), "string");
        assert_eq!(json_type(&json!([1])), "array");
        assert_eq!(json_type(&json!({})), "object");
    }
}
