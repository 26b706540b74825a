//! Operator for a single bound object: one row per property and one value
//! column, or one column per property in a single row when items are not
//! laid out in rows. The shape is fixed, so no structural edit is ever
//! allowed.

use tracing::{debug, warn};

use super::{DataContext, DataGridOperator, regenerate_definitions};
use crate::domain::{Item, Record, SourceShape, Value, ValueType};
use crate::error::{Error, Result};
use crate::grid::cell_ref::CellRef;
use crate::grid::change::CollectionChange;
use crate::grid::data_grid::DataGrid;
use crate::grid::descriptor::{DescriptorCache, DescriptorKey, PropertyDescriptor};
use crate::grid::property_definition::PropertyDefinition;

#[derive(Debug)]
pub struct SingleObjectOperator {
    descriptors: DescriptorCache,
}

impl SingleObjectOperator {
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            descriptors: DescriptorCache::new(cache_capacity),
        }
    }

    fn object(owner: &DataGrid) -> Option<&Item> {
        owner.items_object()
    }

    fn record(owner: &DataGrid) -> Option<&Record> {
        Self::object(owner)?.as_record()
    }

    /// Split a cell into (object position, property index)
    fn split_cell(owner: &DataGrid, cell: CellRef) -> (usize, usize) {
        if owner.settings().items_in_rows {
            (cell.column(), cell.row())
        } else {
            (cell.row(), cell.column())
        }
    }

    /// Definition for a cell; only object position 0 carries values
    fn definition(owner: &DataGrid, cell: CellRef) -> Option<&PropertyDefinition> {
        match Self::split_cell(owner, cell) {
            (0, property) => owner.property_definitions().get(property),
            _ => None,
        }
    }

    fn property_count(owner: &DataGrid) -> usize {
        if Self::object(owner).is_some() {
            owner.property_definitions().len()
        } else {
            0
        }
    }

    fn object_count(owner: &DataGrid) -> usize {
        usize::from(Self::object(owner).is_some())
    }

    fn resolve(owner: &DataGrid, pd: &PropertyDefinition) -> Option<PropertyDescriptor> {
        let name = pd.property_name.as_deref()?;
        PropertyDescriptor::resolve(Self::record(owner)?.type_descriptor(), name)
    }
}

impl DataGridOperator for SingleObjectOperator {
    fn shape(&self) -> SourceShape {
        SourceShape::SingleObject
    }

    fn auto_generate_columns(&self, owner: &mut DataGrid) {
        let discovered = match Self::record(owner) {
            Some(record) if record.type_descriptor().is_dynamic() => {
                record.keys().map(|k| Some(k.to_string())).collect()
            }
            Some(record) => record
                .type_descriptor()
                .browsable_properties()
                .map(|p| Some(p.name.clone()))
                .collect(),
            None => Vec::new(),
        };
        regenerate_definitions(owner, discovered);
        self.update_property_definitions(owner);
    }

    fn update_property_definitions(&self, owner: &mut DataGrid) {
        let Some(ty) = Self::record(owner).map(Record::type_descriptor) else {
            return;
        };
        for pd in owner.property_definitions() {
            let descriptor = Self::resolve(owner, pd);
            if descriptor.is_none() {
                warn!(
                    property = pd.property_name.as_deref().unwrap_or("<element>"),
                    "Property not found on bound object"
                );
            }
            self.descriptors
                .insert(DescriptorKey::new(ty, pd.id()), descriptor);
        }
    }

    fn get_property_type(&self, owner: &DataGrid, cell: CellRef) -> Option<ValueType> {
        let pd = Self::definition(owner, cell)?;
        pd.value_type
            .or_else(|| self.get_property_descriptor(owner, pd).map(|d| d.value_type()))
    }

    fn get_property_descriptor(
        &self,
        owner: &DataGrid,
        pd: &PropertyDefinition,
    ) -> Option<PropertyDescriptor> {
        let key = DescriptorKey::new(Self::record(owner)?.type_descriptor(), pd.id());
        self.descriptors
            .get_or_resolve(key, || Self::resolve(owner, pd))
    }

    fn get_binding_path(&self, owner: &DataGrid, cell: CellRef) -> Option<String> {
        Self::definition(owner, cell)?.property_name.clone()
    }

    fn get_cell_value(&self, owner: &DataGrid, cell: CellRef) -> Option<Value> {
        let pd = Self::definition(owner, cell)?;
        let descriptor = self.get_property_descriptor(owner, pd)?;
        Self::record(owner).map(|record| descriptor.get_value(record))
    }

    /// The object has one position: 0 maps to 0
    fn get_collection_view_index(&self, owner: &DataGrid, index: usize) -> Option<usize> {
        (index == 0 && Self::object(owner).is_some()).then_some(0)
    }

    fn get_items_source_index(&self, owner: &DataGrid, index: usize) -> Option<usize> {
        self.get_collection_view_index(owner, index)
    }

    fn insert_item(&self, _owner: &mut DataGrid, index: usize) -> Option<usize> {
        debug!(index, "Cannot insert items into a single-object grid");
        None
    }

    fn get_item<'a>(&self, owner: &'a DataGrid, cell: CellRef) -> Option<&'a Item> {
        Self::definition(owner, cell)?;
        Self::object(owner)
    }

    fn get_data_context<'a>(&self, owner: &'a DataGrid, cell: CellRef) -> Option<DataContext<'a>> {
        self.get_item(owner, cell).map(DataContext::Item)
    }

    fn write_cell_value(&self, owner: &mut DataGrid, cell: CellRef, value: &Value) -> Result<()> {
        let pd = Self::definition(owner, cell).ok_or(Error::OutOfRange { cell })?;
        if pd.is_read_only {
            return Err(Error::ReadOnly {
                name: pd.property_name.clone().unwrap_or_default(),
            });
        }
        let target = pd.value_type;
        let descriptor =
            self.get_property_descriptor(owner, pd)
                .ok_or_else(|| Error::UnknownProperty {
                    name: pd.property_name.clone().unwrap_or_default(),
                    type_name: Self::record(owner)
                        .map(|r| r.type_descriptor().name().to_string())
                        .unwrap_or_default(),
                })?;

        let record = owner
            .items_object_mut()
            .and_then(Item::as_record_mut)
            .ok_or(Error::Unbound)?;
        descriptor.set_value(record, value, target)?;
        owner.commit(CollectionChange::ItemReplaced { index: 0 });
        Ok(())
    }

    fn can_delete_columns(&self, _owner: &DataGrid) -> bool {
        false
    }

    fn can_delete_rows(&self, _owner: &DataGrid) -> bool {
        false
    }

    fn can_insert_columns(&self, _owner: &DataGrid) -> bool {
        false
    }

    fn can_insert_rows(&self, _owner: &DataGrid) -> bool {
        false
    }

    fn delete_columns(&self, _owner: &mut DataGrid, _index: usize, _n: usize) -> usize {
        0
    }

    fn delete_rows(&self, _owner: &mut DataGrid, _index: usize, _n: usize) -> usize {
        0
    }

    fn insert_columns(&self, _owner: &mut DataGrid, _index: usize, _n: usize) -> usize {
        0
    }

    fn insert_rows(&self, _owner: &mut DataGrid, _index: usize, _n: usize) -> usize {
        0
    }

    fn get_row_count(&self, owner: &DataGrid) -> usize {
        if owner.settings().items_in_rows {
            Self::property_count(owner)
        } else {
            Self::object_count(owner)
        }
    }

    fn get_column_count(&self, owner: &DataGrid) -> usize {
        if owner.settings().items_in_rows {
            Self::object_count(owner)
        } else {
            Self::property_count(owner)
        }
    }

    /// One object has nothing to reorder on either axis
    fn can_sort(&self, _owner: &DataGrid, _index: usize) -> bool {
        false
    }
}
