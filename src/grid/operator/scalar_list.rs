//! Operator for lists of scalar values: one element per row, one column.

use tracing::{debug, warn};

use super::{DataContext, DataGridOperator, list, regenerate_definitions};
use crate::domain::{ElementType, Item, SourceShape, Value, ValueType};
use crate::error::{Error, Result};
use crate::grid::cell_ref::CellRef;
use crate::grid::change::CollectionChange;
use crate::grid::data_grid::DataGrid;
use crate::grid::descriptor::PropertyDescriptor;
use crate::grid::property_definition::PropertyDefinition;

#[derive(Debug, Default)]
pub struct ScalarListOperator;

impl ScalarListOperator {
    pub fn new() -> Self {
        Self
    }

    fn element_type(owner: &DataGrid) -> Option<ValueType> {
        match owner.items_list()?.element_type() {
            ElementType::Scalar(ty) => Some(*ty),
            ElementType::Object(_) => None,
        }
    }
}

impl DataGridOperator for ScalarListOperator {
    fn shape(&self) -> SourceShape {
        SourceShape::ScalarList
    }

    fn auto_generate_columns(&self, owner: &mut DataGrid) {
        regenerate_definitions(owner, vec![None]);
        self.update_property_definitions(owner);
    }

    fn update_property_definitions(&self, owner: &mut DataGrid) {
        // scalars have no properties; a named definition is a configuration error
        for pd in owner.property_definitions() {
            if let Some(name) = &pd.property_name {
                warn!(property = %name, "Scalar list elements have no properties");
            }
        }
    }

    fn get_property_type(&self, owner: &DataGrid, cell: CellRef) -> Option<ValueType> {
        let (_, pd) = list::resolve_cell(owner, cell)?;
        pd.value_type.or_else(|| Self::element_type(owner))
    }

    fn get_property_descriptor(
        &self,
        _owner: &DataGrid,
        _pd: &PropertyDefinition,
    ) -> Option<PropertyDescriptor> {
        None
    }

    fn get_binding_path(&self, owner: &DataGrid, cell: CellRef) -> Option<String> {
        let (source_index, _) = list::resolve_cell(owner, cell)?;
        Some(format!("[{source_index}]"))
    }

    fn get_cell_value(&self, owner: &DataGrid, cell: CellRef) -> Option<Value> {
        self.get_item(owner, cell)?.as_value().cloned()
    }

    fn insert_item(&self, owner: &mut DataGrid, index: usize) -> Option<usize> {
        list::insert_items(owner, index, 1)
    }

    fn get_item<'a>(&self, owner: &'a DataGrid, cell: CellRef) -> Option<&'a Item> {
        let (source_index, _) = list::resolve_cell(owner, cell)?;
        owner.items_list()?.get(source_index)
    }

    fn get_data_context<'a>(&self, owner: &'a DataGrid, cell: CellRef) -> Option<DataContext<'a>> {
        list::resolve_cell(owner, cell)?;
        owner.items_list().map(DataContext::List)
    }

    fn write_cell_value(&self, owner: &mut DataGrid, cell: CellRef, value: &Value) -> Result<()> {
        let (source_index, pd) =
            list::resolve_cell(owner, cell).ok_or(Error::OutOfRange { cell })?;
        if pd.is_read_only {
            return Err(Error::ReadOnly {
                name: format!("[{source_index}]"),
            });
        }
        // the definition type only narrows loosely-typed lists
        let target = match Self::element_type(owner) {
            Some(ValueType::Any) | None => pd.value_type.unwrap_or_default(),
            Some(declared) => declared,
        };
        let converted = value.convert_to(target)?;

        let slot = owner
            .items_list_mut()
            .and_then(|list| list.get_mut(source_index))
            .ok_or(Error::OutOfRange { cell })?;
        *slot = Item::Value(converted);
        owner.commit(CollectionChange::ItemReplaced {
            index: source_index,
        });
        Ok(())
    }

    fn can_delete_columns(&self, owner: &DataGrid) -> bool {
        !owner.settings().items_in_rows && list::can_delete_items(owner)
    }

    fn can_delete_rows(&self, owner: &DataGrid) -> bool {
        owner.settings().items_in_rows && list::can_delete_items(owner)
    }

    fn can_insert_columns(&self, owner: &DataGrid) -> bool {
        !owner.settings().items_in_rows && list::can_insert_items(owner)
    }

    fn can_insert_rows(&self, owner: &DataGrid) -> bool {
        owner.settings().items_in_rows && list::can_insert_items(owner)
    }

    fn delete_columns(&self, owner: &mut DataGrid, index: usize, n: usize) -> usize {
        if !self.can_delete_columns(owner) {
            debug!("Scalar list has a single fixed property column");
            return 0;
        }
        list::delete_items(owner, index, n)
    }

    fn delete_rows(&self, owner: &mut DataGrid, index: usize, n: usize) -> usize {
        if !self.can_delete_rows(owner) {
            return 0;
        }
        list::delete_items(owner, index, n)
    }

    fn insert_columns(&self, owner: &mut DataGrid, index: usize, n: usize) -> usize {
        if !self.can_insert_columns(owner) {
            return 0;
        }
        list::insert_items(owner, index, n).map_or(0, |_| n)
    }

    fn insert_rows(&self, owner: &mut DataGrid, index: usize, n: usize) -> usize {
        if !self.can_insert_rows(owner) {
            return 0;
        }
        list::insert_items(owner, index, n).map_or(0, |_| n)
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
            .is_some_and(|pd| pd.can_sort && pd.property_name.is_none())
    }
}
