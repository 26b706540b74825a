//! Record - Object Instances and Their Types
//!
//! A `TypeDescriptor` plays the role of an element type: it lists the
//! properties a record exposes and whether new instances can be built.
//! Dynamic types model loosely-typed rows whose property set is open.

use std::sync::Arc;

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};

use super::value::{Value, ValueType};

/// A single declared property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInfo {
    /// Property name
    pub name: String,
    /// Declared value type
    pub value_type: ValueType,
    /// Whether writes are rejected
    pub read_only: bool,
    /// Whether schema discovery should list this property
    pub browsable: bool,
}

impl PropertyInfo {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            read_only: false,
            browsable: true,
        }
    }

    /// Mark the property read-only
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Hide the property from schema discovery
    pub fn hidden(mut self) -> Self {
        self.browsable = false;
        self
    }
}

/// Element type of an object list or single object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: String,
    properties: Vec<PropertyInfo>,
    constructible: bool,
    dynamic: bool,
}

impl TypeDescriptor {
    /// Create a typed descriptor with a default constructor and no properties
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            constructible: true,
            dynamic: false,
        }
    }

    /// Create a descriptor for loosely-typed rows
    pub fn dynamic(name: impl Into<String>) -> Self {
        Self {
            dynamic: true,
            ..Self::new(name)
        }
    }

    pub fn with_property(mut self, property: PropertyInfo) -> Self {
        self.properties.push(property);
        self
    }

    /// Remove the default constructor; `new_instance` then yields `None`
    pub fn without_default_constructor(mut self) -> Self {
        self.constructible = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn browsable_properties(&self) -> impl Iterator<Item = &PropertyInfo> {
        self.properties.iter().filter(|p| p.browsable)
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn is_constructible(&self) -> bool {
        self.constructible
    }

    /// Default-construct an instance, or `None` without a default constructor
    pub fn new_instance(self: &Arc<Self>) -> Option<Record> {
        self.constructible.then(|| Record::new(Arc::clone(self)))
    }
}

/// An object instance
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    ty: Arc<TypeDescriptor>,
    values: LinkedHashMap<String, Value>,
}

impl Record {
    /// Create a record with every declared property at its default value
    pub fn new(ty: Arc<TypeDescriptor>) -> Self {
        let values = ty
            .properties
            .iter()
            .map(|p| (p.name.clone(), p.value_type.default_value()))
            .collect();
        Self { ty, values }
    }

    /// Builder-style assignment that bypasses read-only checks
    ///
    /// Typed records ignore names their type does not declare.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        if self.accepts(&name) {
            self.values.insert(name, value.into());
        } else {
            tracing::warn!(property = %name, ty = %self.ty.name, "Ignoring undeclared property");
        }
        self
    }

    pub fn type_descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.ty
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Property names in declaration (or insertion) order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether `name` may be stored on this record
    pub fn accepts(&self, name: &str) -> bool {
        self.ty.dynamic || self.ty.property(name).is_some()
    }

    pub(crate) fn put(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
        } else {
            self.values.insert(name.to_string(), value);
        }
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }
}
