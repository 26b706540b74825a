//! DataGrid - Grid Host
//!
//! Owns the bound items source, its collection view and the property
//! definitions, and routes every shape-dependent call through the operator
//! picked at bind time.

use std::fmt;
use std::rc::Rc;

use crossbeam_channel::Receiver;
use tracing::{debug, info};

use super::cell_ref::CellRef;
use super::change::{ChangeNotifier, CollectionChange};
use super::operator::{DataGridOperator, select_operator};
use super::property_definition::PropertyDefinition;
use super::view::{CollectionView, SortDescription, SortDirection};
use crate::domain::{GridSettings, Item, ItemList, ItemsSource, Value};
use crate::error::{Error, Result};

pub struct DataGrid {
    source: Option<ItemsSource>,
    view: CollectionView,
    property_definitions: Vec<PropertyDefinition>,
    settings: GridSettings,
    operator: Option<Rc<dyn DataGridOperator>>,
    notifier: ChangeNotifier,
}

impl DataGrid {
    pub fn new(settings: GridSettings) -> Self {
        Self {
            source: None,
            view: CollectionView::new(),
            property_definitions: Vec::new(),
            settings,
            operator: None,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Bind `source`, picking the operator for its shape
    pub fn set_items_source(&mut self, source: impl Into<ItemsSource>) {
        let source = source.into();
        let operator = select_operator(&source, &self.settings);
        self.bind(source, operator);
    }

    /// Bind `source` through an existing operator, e.g. one shared with
    /// another grid. The operator must serve the source's shape.
    pub fn set_items_source_with(
        &mut self,
        source: impl Into<ItemsSource>,
        operator: Rc<dyn DataGridOperator>,
    ) -> Result<()> {
        let source = source.into();
        if operator.shape() != source.shape() {
            return Err(Error::Invalid {
                message: format!(
                    "operator for {:?} cannot serve a {:?} source",
                    operator.shape(),
                    source.shape()
                ),
            });
        }
        self.bind(source, operator);
        Ok(())
    }

    fn bind(&mut self, source: ItemsSource, operator: Rc<dyn DataGridOperator>) {
        let shape = source.shape();
        self.source = Some(source);
        self.view.reset();
        self.view.refresh(self.source.as_ref().and_then(ItemsSource::as_list));
        self.operator = Some(Rc::clone(&operator));

        if self.settings.auto_generate_columns {
            operator.auto_generate_columns(self);
        } else {
            operator.update_property_definitions(self);
        }

        info!(
            ?shape,
            rows = self.row_count(),
            columns = self.column_count(),
            "Items source bound"
        );
        self.notifier.notify(CollectionChange::Reset);
    }

    /// Unbind the current source, dropping auto-generated definitions
    pub fn clear_items_source(&mut self) {
        if self.source.take().is_none() {
            return;
        }
        self.operator = None;
        self.view.reset();
        self.property_definitions
            .retain(|pd| !pd.is_auto_generated());
        info!("Items source cleared");
        self.notifier.notify(CollectionChange::Reset);
    }

    pub fn items_source(&self) -> Option<&ItemsSource> {
        self.source.as_ref()
    }

    pub fn items_list(&self) -> Option<&ItemList> {
        self.source.as_ref()?.as_list()
    }

    pub(crate) fn items_list_mut(&mut self) -> Option<&mut ItemList> {
        self.source.as_mut()?.as_list_mut()
    }

    /// The bound object when a single object is bound
    pub fn items_object(&self) -> Option<&Item> {
        match self.source.as_ref()? {
            ItemsSource::Object(item) => Some(item),
            ItemsSource::List(_) => None,
        }
    }

    pub(crate) fn items_object_mut(&mut self) -> Option<&mut Item> {
        match self.source.as_mut()? {
            ItemsSource::Object(item) => Some(item),
            ItemsSource::List(_) => None,
        }
    }

    pub fn view(&self) -> &CollectionView {
        &self.view
    }

    pub fn property_definitions(&self) -> &[PropertyDefinition] {
        &self.property_definitions
    }

    /// Direct access to the definitions; call `update_property_definitions`
    /// afterwards so descriptors are re-resolved.
    pub fn property_definitions_mut(&mut self) -> &mut Vec<PropertyDefinition> {
        &mut self.property_definitions
    }

    /// Replace all definitions with user-authored ones
    pub fn set_property_definitions(&mut self, definitions: Vec<PropertyDefinition>) {
        self.property_definitions = definitions;
        self.update_property_definitions();
    }

    /// Re-resolve descriptors after the definitions were edited
    pub fn update_property_definitions(&mut self) {
        if let Some(operator) = self.operator.clone() {
            operator.update_property_definitions(self);
        }
        self.commit(CollectionChange::PropertiesChanged);
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    /// Switch between items-as-rows and items-as-columns
    pub fn set_items_in_rows(&mut self, items_in_rows: bool) {
        if self.settings.items_in_rows == items_in_rows {
            return;
        }
        self.settings.items_in_rows = items_in_rows;
        debug!(items_in_rows, "Grid orientation changed");
        self.commit(CollectionChange::ViewChanged);
    }

    pub fn operator(&self) -> Option<&Rc<dyn DataGridOperator>> {
        self.operator.as_ref()
    }

    /// Receive every change made through this grid from now on
    pub fn subscribe(&mut self) -> Receiver<CollectionChange> {
        self.notifier.subscribe()
    }

    /// Rebuild the view from the source, then announce `change` once
    pub(crate) fn commit(&mut self, change: CollectionChange) {
        self.view
            .refresh(self.source.as_ref().and_then(ItemsSource::as_list));
        self.notifier.notify(change);
    }

    /// Sort items by the definition at `index`; `false` if not sortable
    pub fn sort_by(&mut self, index: usize, direction: SortDirection) -> bool {
        let Some(operator) = self.operator.clone() else {
            return false;
        };
        if !operator.can_sort(self, index) {
            debug!(index, "Definition is not sortable");
            return false;
        }
        let Some(pd) = self.property_definitions.get(index) else {
            return false;
        };
        let description = SortDescription::new(pd.property_name.clone(), direction);
        self.view.set_sort(vec![description]);
        self.commit(CollectionChange::ViewChanged);
        true
    }

    pub fn clear_sort(&mut self) {
        if self.view.sort_descriptions().is_empty() {
            return;
        }
        self.view.set_sort(Vec::new());
        self.commit(CollectionChange::ViewChanged);
    }

    /// Show only items matching `predicate`
    pub fn set_filter(&mut self, predicate: impl Fn(&Item) -> bool + 'static) {
        self.view.set_filter(Some(Box::new(predicate)));
        self.commit(CollectionChange::ViewChanged);
    }

    pub fn clear_filter(&mut self) {
        if !self.view.has_filter() {
            return;
        }
        self.view.set_filter(None);
        self.commit(CollectionChange::ViewChanged);
    }

    pub fn row_count(&self) -> usize {
        self.operator
            .as_ref()
            .map_or(0, |op| op.get_row_count(self))
    }

    pub fn column_count(&self) -> usize {
        self.operator
            .as_ref()
            .map_or(0, |op| op.get_column_count(self))
    }

    pub fn cell_value(&self, cell: CellRef) -> Option<Value> {
        self.operator.as_ref()?.get_cell_value(self, cell)
    }

    pub fn binding_path(&self, cell: CellRef) -> Option<String> {
        self.operator.as_ref()?.get_binding_path(self, cell)
    }

    /// Write `value`, `true` only when it was stored
    pub fn try_set_cell_value(&mut self, cell: CellRef, value: impl Into<Value>) -> bool {
        match self.operator.clone() {
            Some(op) => op.try_set_cell_value(self, cell, value.into()),
            None => false,
        }
    }

    /// Write `value`, skipping read-only targets silently
    pub fn set_value(&mut self, cell: CellRef, value: impl Into<Value>) -> Result<()> {
        let operator = self.operator.clone().ok_or(Error::Unbound)?;
        operator.set_value(self, cell, value.into())
    }

    pub fn insert_item(&mut self, index: usize) -> Option<usize> {
        self.operator.clone()?.insert_item(self, index)
    }

    pub fn insert_rows(&mut self, index: usize, n: usize) -> usize {
        self.operator
            .clone()
            .map_or(0, |op| op.insert_rows(self, index, n))
    }

    pub fn delete_rows(&mut self, index: usize, n: usize) -> usize {
        self.operator
            .clone()
            .map_or(0, |op| op.delete_rows(self, index, n))
    }

    pub fn insert_columns(&mut self, index: usize, n: usize) -> usize {
        self.operator
            .clone()
            .map_or(0, |op| op.insert_columns(self, index, n))
    }

    pub fn delete_columns(&mut self, index: usize, n: usize) -> usize {
        self.operator
            .clone()
            .map_or(0, |op| op.delete_columns(self, index, n))
    }
}

impl Default for DataGrid {
    fn default() -> Self {
        Self::new(GridSettings::default())
    }
}

impl fmt::Debug for DataGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataGrid")
            .field("shape", &self.source.as_ref().map(ItemsSource::shape))
            .field("view", &self.view)
            .field("property_definitions", &self.property_definitions.len())
            .field("settings", &self.settings)
            .finish()
    }
}
