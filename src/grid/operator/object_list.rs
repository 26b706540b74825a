//! Operator for lists of records: one element per row, one column per
//! property. Loosely-typed rows also allow inserting and deleting
//! properties.

use std::sync::Arc;

use ahash::AHashSet;
use hashlink::LinkedHashSet;
use tracing::{debug, warn};

use super::{DataContext, DataGridOperator, list, regenerate_definitions};
use crate::constants::SELF_BINDING_PATH;
use crate::domain::{ElementType, Item, Record, SourceShape, TypeDescriptor, Value, ValueType};
use crate::error::{Error, Result};
use crate::grid::cell_ref::CellRef;
use crate::grid::change::CollectionChange;
use crate::grid::data_grid::DataGrid;
use crate::grid::descriptor::{DescriptorCache, DescriptorKey, PropertyDescriptor};
use crate::grid::property_definition::PropertyDefinition;

#[derive(Debug)]
pub struct ObjectListOperator {
    descriptors: DescriptorCache,
}

impl ObjectListOperator {
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            descriptors: DescriptorCache::new(cache_capacity),
        }
    }

    fn element_type(owner: &DataGrid) -> Option<&Arc<TypeDescriptor>> {
        match owner.items_list()?.element_type() {
            ElementType::Object(ty) => Some(ty),
            ElementType::Scalar(_) => None,
        }
    }

    fn is_dynamic(owner: &DataGrid) -> bool {
        Self::element_type(owner).is_some_and(|ty| ty.is_dynamic())
    }

    fn can_insert_properties(owner: &DataGrid) -> bool {
        owner.settings().can_insert && Self::is_dynamic(owner)
    }

    fn can_delete_properties(owner: &DataGrid) -> bool {
        owner.settings().can_delete && Self::is_dynamic(owner)
    }

    /// Property names in display order
    fn discover(owner: &DataGrid) -> Vec<Option<String>> {
        let Some(ty) = Self::element_type(owner) else {
            return Vec::new();
        };
        if !ty.is_dynamic() {
            return ty
                .browsable_properties()
                .map(|p| Some(p.name.clone()))
                .collect();
        }
        // loosely-typed rows: union of keys, first appearance wins
        let mut names = LinkedHashSet::new();
        for record in owner.items_list().into_iter().flat_map(|l| l.records_iter()) {
            for key in record.keys() {
                if !names.contains(key) {
                    names.insert(key.to_string());
                }
            }
        }
        names.into_iter().map(Some).collect()
    }

    fn resolve(owner: &DataGrid, pd: &PropertyDefinition) -> Option<PropertyDescriptor> {
        let name = pd.property_name.as_deref()?;
        PropertyDescriptor::resolve(Self::element_type(owner)?, name)
    }

    fn record_at(owner: &DataGrid, source_index: usize) -> Option<&Record> {
        owner.items_list()?.get(source_index)?.as_record()
    }

    /// Insert `n` new properties at definition position `index`
    fn insert_properties(&self, owner: &mut DataGrid, index: usize, n: usize) -> usize {
        let definitions = owner.property_definitions();
        if n == 0 || index > definitions.len() {
            return 0;
        }
        if definitions.get(index).is_some_and(|pd| !pd.can_insert) {
            debug!(index, "Definition does not allow inserts at its position");
            return 0;
        }

        let prefix = owner.settings().new_property_prefix.clone();
        let mut taken: AHashSet<String> = definitions
            .iter()
            .filter_map(|pd| pd.property_name.clone())
            .collect();
        if let Some(list) = owner.items_list() {
            for record in list.records_iter() {
                taken.extend(record.keys().map(str::to_string));
            }
        }

        let mut names = Vec::with_capacity(n);
        let mut suffix = 1usize;
        while names.len() < n {
            let candidate = format!("{prefix}{suffix}");
            suffix += 1;
            if taken.insert(candidate.clone()) {
                names.push(candidate);
            }
        }

        if let Some(list) = owner.items_list_mut() {
            for record in list.iter_mut().filter_map(Item::as_record_mut) {
                for name in &names {
                    record.put(name, Value::Null);
                }
            }
        }
        let new_definitions: Vec<PropertyDefinition> =
            names.iter().map(PropertyDefinition::new).collect();
        let definitions = owner.property_definitions_mut();
        for (offset, pd) in new_definitions.into_iter().enumerate() {
            definitions.insert(index + offset, pd);
        }

        self.update_property_definitions(owner);
        owner.commit(CollectionChange::PropertiesChanged);
        debug!(index, count = n, "Inserted properties");
        n
    }

    /// Delete up to `n` deletable definitions starting at `index`
    fn delete_properties(&self, owner: &mut DataGrid, index: usize, n: usize) -> usize {
        let len = owner.property_definitions().len();
        let end = index.saturating_add(n).min(len);
        if index >= end {
            return 0;
        }

        let mut removed = Vec::new();
        let mut position = 0usize;
        owner.property_definitions_mut().retain(|pd| {
            let in_range = (index..end).contains(&position);
            position += 1;
            if in_range && pd.can_delete {
                removed.push(pd.clone());
                false
            } else {
                true
            }
        });
        if removed.is_empty() {
            return 0;
        }

        let still_bound: AHashSet<String> = owner
            .property_definitions()
            .iter()
            .filter_map(|pd| pd.property_name.clone())
            .collect();
        let orphaned: Vec<String> = removed
            .iter()
            .filter_map(|pd| pd.property_name.clone())
            .filter(|name| !still_bound.contains(name))
            .collect();
        if let Some(list) = owner.items_list_mut() {
            for record in list.iter_mut().filter_map(Item::as_record_mut) {
                for name in &orphaned {
                    record.remove(name);
                }
            }
        }
        if let Some(ty) = Self::element_type(owner) {
            for pd in &removed {
                self.descriptors.invalidate(&DescriptorKey::new(ty, pd.id()));
            }
        }

        owner.commit(CollectionChange::PropertiesChanged);
        debug!(index, requested = n, count = removed.len(), "Deleted properties");
        removed.len()
    }
}

impl DataGridOperator for ObjectListOperator {
    fn shape(&self) -> SourceShape {
        SourceShape::ObjectList
    }

    fn auto_generate_columns(&self, owner: &mut DataGrid) {
        let discovered = Self::discover(owner);
        regenerate_definitions(owner, discovered);
        self.update_property_definitions(owner);
    }

    fn update_property_definitions(&self, owner: &mut DataGrid) {
        let Some(ty) = Self::element_type(owner) else {
            return;
        };
        for pd in owner.property_definitions() {
            let descriptor = Self::resolve(owner, pd);
            if descriptor.is_none() {
                warn!(
                    property = pd.property_name.as_deref().unwrap_or("<element>"),
                    "Property not found on element type"
                );
            }
            self.descriptors
                .insert(DescriptorKey::new(ty, pd.id()), descriptor);
        }
    }

    fn get_property_type(&self, owner: &DataGrid, cell: CellRef) -> Option<ValueType> {
        let (_, pd) = list::resolve_cell(owner, cell)?;
        pd.value_type
            .or_else(|| self.get_property_descriptor(owner, pd).map(|d| d.value_type()))
    }

    fn get_property_descriptor(
        &self,
        owner: &DataGrid,
        pd: &PropertyDefinition,
    ) -> Option<PropertyDescriptor> {
        let key = DescriptorKey::new(Self::element_type(owner)?, pd.id());
        self.descriptors
            .get_or_resolve(key, || Self::resolve(owner, pd))
    }

    fn get_binding_path(&self, owner: &DataGrid, cell: CellRef) -> Option<String> {
        let (_, pd) = list::resolve_cell(owner, cell)?;
        Some(
            pd.property_name
                .clone()
                .unwrap_or_else(|| SELF_BINDING_PATH.to_string()),
        )
    }

    fn get_cell_value(&self, owner: &DataGrid, cell: CellRef) -> Option<Value> {
        let (source_index, pd) = list::resolve_cell(owner, cell)?;
        let descriptor = self.get_property_descriptor(owner, pd)?;
        Self::record_at(owner, source_index).map(|record| descriptor.get_value(record))
    }

    fn insert_item(&self, owner: &mut DataGrid, index: usize) -> Option<usize> {
        list::insert_items(owner, index, 1)
    }

    fn get_item<'a>(&self, owner: &'a DataGrid, cell: CellRef) -> Option<&'a Item> {
        let (source_index, _) = list::resolve_cell(owner, cell)?;
        owner.items_list()?.get(source_index)
    }

    fn get_data_context<'a>(&self, owner: &'a DataGrid, cell: CellRef) -> Option<DataContext<'a>> {
        self.get_item(owner, cell).map(DataContext::Item)
    }

    fn write_cell_value(&self, owner: &mut DataGrid, cell: CellRef, value: &Value) -> Result<()> {
        let (source_index, pd) =
            list::resolve_cell(owner, cell).ok_or(Error::OutOfRange { cell })?;
        let name = pd.property_name.clone().unwrap_or_default();
        if pd.is_read_only {
            return Err(Error::ReadOnly { name });
        }
        let target = pd.value_type;
        let descriptor = self.get_property_descriptor(owner, pd).ok_or_else(|| {
            Error::UnknownProperty {
                name,
                type_name: Self::element_type(owner)
                    .map(|ty| ty.name().to_string())
                    .unwrap_or_default(),
            }
        })?;

        let record = owner
            .items_list_mut()
            .and_then(|list| list.get_mut(source_index))
            .and_then(Item::as_record_mut)
            .ok_or(Error::OutOfRange { cell })?;
        descriptor.set_value(record, value, target)?;
        owner.commit(CollectionChange::ItemReplaced {
            index: source_index,
        });
        Ok(())
    }

    fn can_delete_columns(&self, owner: &DataGrid) -> bool {
        if owner.settings().items_in_rows {
            Self::can_delete_properties(owner)
        } else {
            list::can_delete_items(owner)
        }
    }

    fn can_delete_rows(&self, owner: &DataGrid) -> bool {
        if owner.settings().items_in_rows {
            list::can_delete_items(owner)
        } else {
            Self::can_delete_properties(owner)
        }
    }

    fn can_insert_columns(&self, owner: &DataGrid) -> bool {
        if owner.settings().items_in_rows {
            Self::can_insert_properties(owner)
        } else {
            list::can_insert_items(owner)
        }
    }

    fn can_insert_rows(&self, owner: &DataGrid) -> bool {
        if owner.settings().items_in_rows {
            list::can_insert_items(owner)
        } else {
            Self::can_insert_properties(owner)
        }
    }

    fn delete_columns(&self, owner: &mut DataGrid, index: usize, n: usize) -> usize {
        if !self.can_delete_columns(owner) {
            return 0;
        }
        if owner.settings().items_in_rows {
            self.delete_properties(owner, index, n)
        } else {
            list::delete_items(owner, index, n)
        }
    }

    fn delete_rows(&self, owner: &mut DataGrid, index: usize, n: usize) -> usize {
        if !self.can_delete_rows(owner) {
            return 0;
        }
        if owner.settings().items_in_rows {
            list::delete_items(owner, index, n)
        } else {
            self.delete_properties(owner, index, n)
        }
    }

    fn insert_columns(&self, owner: &mut DataGrid, index: usize, n: usize) -> usize {
        if !self.can_insert_columns(owner) {
            return 0;
        }
        if owner.settings().items_in_rows {
            self.insert_properties(owner, index, n)
        } else {
            list::insert_items(owner, index, n).map_or(0, |_| n)
        }
    }

    fn insert_rows(&self, owner: &mut DataGrid, index: usize, n: usize) -> usize {
        if !self.can_insert_rows(owner) {
            return 0;
        }
        if owner.settings().items_in_rows {
            list::insert_items(owner, index, n).map_or(0, |_| n)
        } else {
            self.insert_properties(owner, index, n)
        }
    }

    fn get_row_count(&self, owner: &DataGrid) -> usize {
        list::row_count(owner)
    }

    fn get_column_count(&self, owner: &DataGrid) -> usize {
        list::column_count(owner)
    }

    fn can_sort(&self, owner: &DataGrid, index: usize) -> bool {
        owner
            .property_definitions()
            .get(index)
            .is_some_and(|pd| pd.can_sort && self.get_property_descriptor(owner, pd).is_some())
    }
}
