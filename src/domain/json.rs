//! JSON - Building Items Sources from JSON Documents

use std::sync::Arc;

use serde_json::Value as Json;

use super::item::{ItemList, ItemsSource};
use super::record::{Record, TypeDescriptor};
use super::value::{Value, ValueType};
use crate::error::{Error, Result};

const JSON_OBJECT_TYPE: &str = "JsonObject";

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            Json::String(s) => Value::Text(s),
            nested @ (Json::Array(_) | Json::Object(_)) => Value::Text(nested.to_string()),
        }
    }
}

impl ItemsSource {
    /// Build a source from a JSON document
    ///
    /// An array of objects becomes a list of loosely-typed rows, any other
    /// array a scalar list, and an object a single loosely-typed record.
    pub fn from_json(json: Json) -> Result<Self> {
        match json {
            Json::Array(elements) => {
                if !elements.is_empty() && elements.iter().all(Json::is_object) {
                    let ty = Arc::new(TypeDescriptor::dynamic(JSON_OBJECT_TYPE));
                    let records = elements
                        .into_iter()
                        .map(|e| json_record(&ty, e))
                        .collect::<Vec<_>>();
                    Ok(ItemList::records(ty, records).into())
                } else {
                    let values: Vec<Value> = elements.into_iter().map(Value::from).collect();
                    let element_type = values
                        .iter()
                        .filter(|v| !v.is_null())
                        .map(Value::value_type)
                        .reduce(ValueType::common)
                        .unwrap_or(ValueType::Any);
                    Ok(ItemList::scalars(element_type, values).into())
                }
            }
            object @ Json::Object(_) => {
                let ty = Arc::new(TypeDescriptor::dynamic(JSON_OBJECT_TYPE));
                Ok(ItemsSource::object(json_record(&ty, object)))
            }
            other => Err(Error::Invalid {
                message: format!("Cannot bind a grid to a bare JSON scalar: {other}"),
            }),
        }
    }

    /// Parse a JSON string and build a source from it
    pub fn from_json_str(text: &str) -> Result<Self> {
        let json: Json = serde_json::from_str(text)?;
        Self::from_json(json)
    }
}

fn json_record(ty: &Arc<TypeDescriptor>, json: Json) -> Record {
    let mut record = Record::new(Arc::clone(ty));
    if let Json::Object(map) = json {
        for (key, value) in map {
            record = record.with(key, Value::from(value));
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::SourceShape;

    #[test]
    fn test_array_of_objects_is_object_list() {
        let source = ItemsSource::from_json_str(r#"[{"Name":"Ann","Age":30},{"Name":"Bob"}]"#)
            .expect("valid json");
        assert_eq!(source.shape(), SourceShape::ObjectList);
        let list = source.as_list().expect("list");
        assert_eq!(list.len(), 2);
        let first = list.get(0).and_then(|i| i.as_record()).expect("record");
        assert_eq!(first.get("Age"), Some(&Value::Integer(30)));
    }

    #[test]
    fn test_numeric_array_widens_to_float() {
        let source = ItemsSource::from_json_str("[1, 2.5, null]").expect("valid json");
        let list = source.as_list().expect("list");
        assert_eq!(
            list.element_type(),
            &crate::domain::item::ElementType::Scalar(ValueType::Float)
        );
    }

    #[test]
    fn test_object_is_single_object() {
        let source = ItemsSource::from_json_str(r#"{"X":1,"Y":2}"#).expect("valid json");
        assert_eq!(source.shape(), SourceShape::SingleObject);
    }

    #[test]
    fn test_bare_scalar_is_rejected() {
        assert!(ItemsSource::from_json_str("42").is_err());
        assert!(ItemsSource::from_json_str("not json").is_err());
    }
}
