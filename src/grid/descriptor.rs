//! Property Descriptors
//!
//! A descriptor is the resolved accessor for one property of a record type:
//! it reads, converts and writes values. Resolution goes through a side
//! table keyed by the definition's identity and the record type it was
//! resolved against, so definitions stay plain data.

use std::cell::RefCell;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use hashlink::LruCache;
use uuid::Uuid;

use crate::domain::{PropertyInfo, Record, TypeDescriptor, Value, ValueType};
use crate::error::{Error, Result};

/// Resolved accessor for a named property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    name: String,
    value_type: ValueType,
    read_only: bool,
}

impl PropertyDescriptor {
    pub fn from_info(info: &PropertyInfo) -> Self {
        Self {
            name: info.name.clone(),
            value_type: info.value_type,
            read_only: info.read_only,
        }
    }

    /// Resolve `name` on `ty`
    ///
    /// Dynamic types accept any name as a writable `Any` property; typed
    /// descriptors only resolve declared properties.
    pub fn resolve(ty: &TypeDescriptor, name: &str) -> Option<Self> {
        if ty.is_dynamic() {
            return Some(Self {
                name: name.to_string(),
                value_type: ValueType::Any,
                read_only: false,
            });
        }
        ty.property(name).map(Self::from_info)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Read the property; loosely-typed records missing the key read as `Null`
    pub fn get_value(&self, record: &Record) -> Value {
        record.get(&self.name).cloned().unwrap_or_default()
    }

    /// Convert `value` to the declared type and write it
    ///
    /// `hint` only applies to `Any` properties; a typed property always
    /// stores its declared type.
    pub fn set_value(&self, record: &mut Record, value: &Value, hint: Option<ValueType>) -> Result<()> {
        if self.read_only {
            return Err(Error::ReadOnly {
                name: self.name.clone(),
            });
        }
        if !record.accepts(&self.name) {
            return Err(Error::UnknownProperty {
                name: self.name.clone(),
                type_name: record.type_descriptor().name().to_string(),
            });
        }
        let target = match self.value_type {
            ValueType::Any => hint.unwrap_or(ValueType::Any),
            declared => declared,
        };
        let converted = value.convert_to(target)?;
        record.put(&self.name, converted);
        Ok(())
    }
}

/// Cache key: a definition id resolved against one record type
///
/// Clones of a definition share its id, so the type is part of the key.
/// The key holds the type alive, which keeps pointer identity unambiguous.
#[derive(Debug, Clone)]
pub struct DescriptorKey {
    owner: Arc<TypeDescriptor>,
    id: Uuid,
}

impl DescriptorKey {
    pub fn new(owner: &Arc<TypeDescriptor>, id: Uuid) -> Self {
        Self {
            owner: Arc::clone(owner),
            id,
        }
    }
}

impl PartialEq for DescriptorKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.owner, &other.owner)
    }
}

impl Eq for DescriptorKey {}

impl Hash for DescriptorKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.owner).hash(state);
        self.id.hash(state);
    }
}

/// LRU side table from (record type, definition id) to resolved descriptor
///
/// Unresolvable definitions are cached as `None` so repeated lookups of a
/// misconfigured name stay cheap.
#[derive(Debug)]
pub struct DescriptorCache {
    entries: RefCell<LruCache<DescriptorKey, Option<PropertyDescriptor>>>,
}

impl DescriptorCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RefCell::new(LruCache::new(capacity.max(1))),
        }
    }

    /// Cached entry; the outer `None` means "not cached"
    pub fn get(&self, key: &DescriptorKey) -> Option<Option<PropertyDescriptor>> {
        self.entries.borrow_mut().get(key).cloned()
    }

    pub fn insert(&self, key: DescriptorKey, descriptor: Option<PropertyDescriptor>) {
        self.entries.borrow_mut().insert(key, descriptor);
    }

    pub fn get_or_resolve(
        &self,
        key: DescriptorKey,
        resolve: impl FnOnce() -> Option<PropertyDescriptor>,
    ) -> Option<PropertyDescriptor> {
        if let Some(cached) = self.get(&key) {
            return cached;
        }
        let descriptor = resolve();
        self.insert(key, descriptor.clone());
        descriptor
    }

    pub fn invalidate(&self, key: &DescriptorKey) {
        self.entries.borrow_mut().remove(key);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
