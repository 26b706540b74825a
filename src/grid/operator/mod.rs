//! Data Grid Operators
//!
//! The operator is the one seam through which a `DataGrid` reaches its
//! items source. It translates display coordinates into source positions,
//! discovers the schema, reads and writes cells and performs structural
//! edits. One implementation exists per source shape; the grid picks one
//! when a source is bound.
//!
//! Operators hold no reference to the collection. Every call receives the
//! owning grid, so an operator can be shared between grids bound to sources
//! of the same shape.

mod list;
mod object_list;
mod scalar_list;
mod single_object;

use std::rc::Rc;

use ahash::AHashSet;
use tracing::debug;

use crate::domain::{GridSettings, Item, ItemList, ItemsSource, SourceShape, Value, ValueType};
use crate::error::{Error, Result};
use crate::grid::cell_ref::CellRef;
use crate::grid::data_grid::DataGrid;
use crate::grid::descriptor::PropertyDescriptor;
use crate::grid::property_definition::PropertyDefinition;

pub use object_list::ObjectListOperator;
pub use scalar_list::ScalarListOperator;
pub use single_object::SingleObjectOperator;

/// Object a nested binding context should use for a cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataContext<'a> {
    /// The whole list; the binding path indexes into it
    List(&'a ItemList),
    /// A single element
    Item(&'a Item),
}

/// Grid functionality that depends on the shape of the items source
pub trait DataGridOperator {
    /// Shape of source this operator serves
    fn shape(&self) -> SourceShape;

    /// Replace the auto-generated property definitions with freshly
    /// discovered ones, keeping user-authored definitions.
    fn auto_generate_columns(&self, owner: &mut DataGrid);

    /// Re-resolve the descriptor of every definition without touching the
    /// definitions themselves.
    fn update_property_definitions(&self, owner: &mut DataGrid);

    /// Declared type of the value in `cell`
    fn get_property_type(&self, owner: &DataGrid, cell: CellRef) -> Option<ValueType>;

    /// Resolved accessor for `pd`, `None` if the property does not exist
    fn get_property_descriptor(
        &self,
        owner: &DataGrid,
        pd: &PropertyDefinition,
    ) -> Option<PropertyDescriptor>;

    /// Binding path a UI binding layer would use to reach `cell`
    fn get_binding_path(&self, owner: &DataGrid, cell: CellRef) -> Option<String>;

    fn get_cell_value(&self, owner: &DataGrid, cell: CellRef) -> Option<Value>;

    /// Source index to view index
    fn get_collection_view_index(&self, owner: &DataGrid, index: usize) -> Option<usize> {
        owner.view().view_index(index)
    }

    /// View index to source index
    fn get_items_source_index(&self, owner: &DataGrid, index: usize) -> Option<usize> {
        owner.view().source_index(index)
    }

    /// Insert a default element at display `index`; returns its source index
    fn insert_item(&self, owner: &mut DataGrid, index: usize) -> Option<usize>;

    fn get_item<'a>(&self, owner: &'a DataGrid, cell: CellRef) -> Option<&'a Item>;

    fn get_data_context<'a>(&self, owner: &'a DataGrid, cell: CellRef) -> Option<DataContext<'a>>;

    /// Convert and write `value`, reporting every failure including
    /// read-only targets.
    fn write_cell_value(&self, owner: &mut DataGrid, cell: CellRef, value: &Value) -> Result<()>;

    /// Unchecked write: read-only targets are skipped silently, conversion
    /// and range faults propagate.
    fn set_value(&self, owner: &mut DataGrid, cell: CellRef, value: Value) -> Result<()> {
        match self.write_cell_value(owner, cell, &value) {
            Err(Error::ReadOnly { name }) => {
                debug!(%cell, property = %name, "Skipping write to read-only property");
                Ok(())
            }
            other => other,
        }
    }

    /// Safe write: `true` only when the value was stored
    fn try_set_cell_value(&self, owner: &mut DataGrid, cell: CellRef, value: Value) -> bool {
        self.write_cell_value(owner, cell, &value)
            .inspect_err(|e| debug!(%cell, error = %e, "Cell write rejected"))
            .is_ok()
    }

    fn can_delete_columns(&self, owner: &DataGrid) -> bool;

    fn can_delete_rows(&self, owner: &DataGrid) -> bool;

    fn can_insert_columns(&self, owner: &DataGrid) -> bool;

    fn can_insert_rows(&self, owner: &DataGrid) -> bool;

    /// Delete up to `n` columns at `index`; returns how many were removed
    fn delete_columns(&self, owner: &mut DataGrid, index: usize, n: usize) -> usize;

    /// Delete up to `n` rows at `index`; returns how many were removed
    fn delete_rows(&self, owner: &mut DataGrid, index: usize, n: usize) -> usize;

    /// Insert `n` columns at `index`; returns how many were inserted
    fn insert_columns(&self, owner: &mut DataGrid, index: usize, n: usize) -> usize;

    /// Insert `n` rows at `index`; returns how many were inserted
    fn insert_rows(&self, owner: &mut DataGrid, index: usize, n: usize) -> usize;

    fn get_row_count(&self, owner: &DataGrid) -> usize;

    fn get_column_count(&self, owner: &DataGrid) -> usize;

    /// Whether items can be sorted by the definition at `index` (a column
    /// index when items are in rows, otherwise a row index).
    fn can_sort(&self, owner: &DataGrid, index: usize) -> bool;
}

/// Pick the operator for the shape of `source`
pub fn select_operator(source: &ItemsSource, settings: &GridSettings) -> Rc<dyn DataGridOperator> {
    let capacity = settings.descriptor_cache_capacity;
    match source.shape() {
        SourceShape::ScalarList => Rc::new(ScalarListOperator::new()),
        SourceShape::ObjectList => Rc::new(ObjectListOperator::new(capacity)),
        SourceShape::SingleObject => Rc::new(SingleObjectOperator::new(capacity)),
    }
}

/// Drop auto-generated definitions, append `discovered` names not already
/// covered by a user-authored definition.
fn regenerate_definitions(owner: &mut DataGrid, discovered: Vec<Option<String>>) {
    let definitions = owner.property_definitions_mut();
    definitions.retain(|pd| !pd.is_auto_generated());
    let mut covered: AHashSet<Option<String>> = definitions
        .iter()
        .map(|pd| pd.property_name.clone())
        .collect();
    for name in discovered {
        if covered.insert(name.clone()) {
            definitions.push(PropertyDefinition::auto(name));
        }
    }
}

#[cfg(test)]
mod tests;
