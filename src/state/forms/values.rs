//! Snapshot of form values

use super::path::{FieldPath, PathSegment};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Tree of current field values mirroring the form's group structure.
///
/// Groups become JSON objects, repeated groups become arrays and leaf
/// fields are strings, so a section can be deserialized straight into a
/// typed struct.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormValues(Value);

impl Default for FormValues {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl FormValues {
    pub(crate) fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Value at `path`, if it resolves to a leaf field
    pub fn get(&self, path: &FieldPath) -> Option<&str> {
        self.node(path).and_then(Value::as_str)
    }

    /// Deserialize the subtree at `path` into `T`
    pub fn section<T: DeserializeOwned>(&self, path: &FieldPath) -> serde_json::Result<T> {
        let node = self.node(path).cloned().unwrap_or(Value::Null);
        serde_json::from_value(node)
    }

    fn node(&self, path: &FieldPath) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(&self.0, |node, segment| match segment {
                PathSegment::Key(key) => node.get(key.as_str()),
                PathSegment::Index(index) => node.get(*index),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        name: String,
        email: String,
    }

    fn sample() -> FormValues {
        FormValues::from_value(json!({
            "invite": [
                {"name": "Ada", "email": "ada@example.com"},
                {"name": "", "email": ""}
            ]
        }))
    }

    #[test]
    fn test_get_leaf() {
        let values = sample();
        assert_eq!(
            values.get(&FieldPath::repeated("invite", 0, "email")),
            Some("ada@example.com")
        );
        assert_eq!(values.get(&FieldPath::repeated("invite", 1, "name")), Some(""));
    }

    #[test]
    fn test_get_non_leaf_or_missing_is_none() {
        let values = sample();
        assert_eq!(values.get(&FieldPath::root().key("invite")), None);
        assert_eq!(values.get(&FieldPath::repeated("invite", 5, "name")), None);
    }

    #[test]
    fn test_section_deserializes_rows() {
        let rows: Vec<Row> = sample().section(&FieldPath::root().key("invite")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            Row {
                name: "Ada".into(),
                email: "ada@example.com".into()
            }
        );
    }

    #[test]
    fn test_section_of_missing_path_is_error() {
        let result: serde_json::Result<Vec<Row>> =
            sample().section(&FieldPath::root().key("missing"));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_is_empty_object() {
        assert_eq!(FormValues::default().as_value(), &json!({}));
    }
}
