//! Shared index handling for list-bound grids.
//!
//! With `items_in_rows` the item axis is rows and the property axis is
//! columns; otherwise the two are swapped.

use tracing::debug;

use crate::domain::{ElementType, Value};
use crate::grid::cell_ref::CellRef;
use crate::grid::change::CollectionChange;
use crate::grid::data_grid::DataGrid;
use crate::grid::property_definition::PropertyDefinition;

/// Split a cell into (item view index, property index)
pub(super) fn split_cell(owner: &DataGrid, cell: CellRef) -> (usize, usize) {
    if owner.settings().items_in_rows {
        (cell.row(), cell.column())
    } else {
        (cell.column(), cell.row())
    }
}

/// Source index and definition addressed by `cell`
pub(super) fn resolve_cell(owner: &DataGrid, cell: CellRef) -> Option<(usize, &PropertyDefinition)> {
    let (item, property) = split_cell(owner, cell);
    let source_index = owner.view().source_index(item)?;
    let pd = owner.property_definitions().get(property)?;
    Some((source_index, pd))
}

pub(super) fn row_count(owner: &DataGrid) -> usize {
    if owner.settings().items_in_rows {
        owner.view().len()
    } else {
        owner.property_definitions().len()
    }
}

pub(super) fn column_count(owner: &DataGrid) -> usize {
    if owner.settings().items_in_rows {
        owner.property_definitions().len()
    } else {
        owner.view().len()
    }
}

pub(super) fn can_insert_items(owner: &DataGrid) -> bool {
    owner.settings().can_insert
        && owner
            .items_list()
            .is_some_and(|list| !list.is_fixed_size() && list.element_type().is_constructible())
}

pub(super) fn can_delete_items(owner: &DataGrid) -> bool {
    owner.settings().can_delete && owner.items_list().is_some_and(|list| !list.is_fixed_size())
}

/// Insert `n` default elements at display `index` in one step
///
/// `index == view length` appends. Returns the source index of the first
/// new element, or `None` without touching the source.
pub(super) fn insert_items(owner: &mut DataGrid, index: usize, n: usize) -> Option<usize> {
    if n == 0 || !can_insert_items(owner) {
        return None;
    }

    let list = owner.items_list()?;
    let source_index = if index == owner.view().len() {
        list.len()
    } else {
        owner.view().source_index(index)?
    };

    let element_type = list.element_type().clone();
    let mut items = (0..n)
        .map(|_| element_type.new_instance())
        .collect::<Option<Vec<_>>>()?;

    // loosely-typed rows get a slot for every defined property
    if matches!(&element_type, ElementType::Object(ty) if ty.is_dynamic()) {
        let names: Vec<String> = owner
            .property_definitions()
            .iter()
            .filter_map(|pd| pd.property_name.clone())
            .collect();
        for record in items.iter_mut().filter_map(|item| item.as_record_mut()) {
            for name in &names {
                if record.get(name).is_none() {
                    record.put(name, Value::Null);
                }
            }
        }
    }

    owner.items_list_mut()?.insert_many(source_index, items);
    owner.commit(CollectionChange::ItemsInserted {
        index: source_index,
        count: n,
    });
    debug!(display_index = index, source_index, count = n, "Inserted items");
    Some(source_index)
}

/// Delete up to `n` elements starting at display `index`
///
/// Every display index is translated before anything is removed; removal
/// runs in descending source order so earlier indices stay valid.
pub(super) fn delete_items(owner: &mut DataGrid, index: usize, n: usize) -> usize {
    if n == 0 || !can_delete_items(owner) {
        return 0;
    }

    let view = owner.view();
    let end = index.saturating_add(n).min(view.len());
    if index >= end {
        return 0;
    }
    let mut indices: Vec<usize> = (index..end).filter_map(|v| view.source_index(v)).collect();
    indices.sort_unstable();
    indices.dedup();

    let Some(list) = owner.items_list_mut() else {
        return 0;
    };
    for &source_index in indices.iter().rev() {
        list.remove(source_index);
    }

    let count = indices.len();
    owner.commit(CollectionChange::ItemsRemoved { indices });
    debug!(display_index = index, requested = n, count, "Deleted items");
    count
}
