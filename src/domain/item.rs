//! Item - Bound Collections
//!
//! What a grid can be bound to: a list of scalars, a list of records, or a
//! single record.

use std::sync::Arc;

use super::record::{Record, TypeDescriptor};
use super::value::{Value, ValueType};

/// One element of a bound collection
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Value(Value),
    Record(Record),
}

impl Item {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Item::Value(v) => Some(v),
            Item::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Item::Record(r) => Some(r),
            Item::Value(_) => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Item::Record(r) => Some(r),
            Item::Value(_) => None,
        }
    }
}

impl From<Value> for Item {
    fn from(value: Value) -> Self {
        Item::Value(value)
    }
}

impl From<Record> for Item {
    fn from(record: Record) -> Self {
        Item::Record(record)
    }
}

/// Element type of an `ItemList`
#[derive(Debug, Clone, PartialEq)]
pub enum ElementType {
    Scalar(ValueType),
    Object(Arc<TypeDescriptor>),
}

impl ElementType {
    /// Default-construct a new element
    pub fn new_instance(&self) -> Option<Item> {
        match self {
            ElementType::Scalar(ty) => Some(Item::Value(ty.default_value())),
            ElementType::Object(ty) => ty.new_instance().map(Item::Record),
        }
    }

    pub fn is_constructible(&self) -> bool {
        match self {
            ElementType::Scalar(_) => true,
            ElementType::Object(ty) => ty.is_constructible(),
        }
    }
}

/// The shape of a bound source, used to pick an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceShape {
    ScalarList,
    ObjectList,
    SingleObject,
}

/// A homogeneous list of items
#[derive(Debug, Clone, PartialEq)]
pub struct ItemList {
    element_type: ElementType,
    items: Vec<Item>,
    fixed_size: bool,
}

impl ItemList {
    /// Create a list of scalar values
    pub fn scalars<V: Into<Value>>(value_type: ValueType, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            element_type: ElementType::Scalar(value_type),
            items: values.into_iter().map(|v| Item::Value(v.into())).collect(),
            fixed_size: false,
        }
    }

    /// Create a list of records of one type
    pub fn records(ty: Arc<TypeDescriptor>, records: impl IntoIterator<Item = Record>) -> Self {
        Self {
            element_type: ElementType::Object(ty),
            items: records.into_iter().map(Item::Record).collect(),
            fixed_size: false,
        }
    }

    /// Array semantics: elements can be edited but never inserted or removed
    pub fn fixed_size(mut self) -> Self {
        self.fixed_size = true;
        self
    }

    pub fn is_fixed_size(&self) -> bool {
        self.fixed_size
    }

    pub fn element_type(&self) -> &ElementType {
        &self.element_type
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.iter_mut()
    }

    /// Records of an object list (empty for scalar lists)
    pub fn records_iter(&self) -> impl Iterator<Item = &Record> {
        self.items.iter().filter_map(Item::as_record)
    }

    /// Splice `items` in at `index`; caller checks bounds
    pub(crate) fn insert_many(&mut self, index: usize, items: Vec<Item>) {
        let tail = self.items.split_off(index);
        self.items.extend(items);
        self.items.extend(tail);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Item {
        self.items.remove(index)
    }
}

/// A bound items source
#[derive(Debug, Clone, PartialEq)]
pub enum ItemsSource {
    List(ItemList),
    /// A single object, displayed one property per row
    Object(Item),
}

impl ItemsSource {
    pub fn object(record: Record) -> Self {
        ItemsSource::Object(Item::Record(record))
    }

    pub fn shape(&self) -> SourceShape {
        match self {
            ItemsSource::List(list) => match list.element_type() {
                ElementType::Scalar(_) => SourceShape::ScalarList,
                ElementType::Object(_) => SourceShape::ObjectList,
            },
            ItemsSource::Object(_) => SourceShape::SingleObject,
        }
    }

    pub fn as_list(&self) -> Option<&ItemList> {
        match self {
            ItemsSource::List(list) => Some(list),
            ItemsSource::Object(_) => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ItemList> {
        match self {
            ItemsSource::List(list) => Some(list),
            ItemsSource::Object(_) => None,
        }
    }
}

impl From<ItemList> for ItemsSource {
    fn from(list: ItemList) -> Self {
        ItemsSource::List(list)
    }
}
