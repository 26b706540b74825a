//! Collection View
//!
//! A sorted/filtered projection over an `ItemList`. The view never owns
//! items; it keeps index maps in both directions and is rebuilt from the
//! source after every mutation.

use std::cmp::Ordering;
use std::fmt;

use crate::domain::{Item, ItemList, Value};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// One sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDescription {
    /// Property to sort by; `None` sorts scalar items by their own value
    pub property_name: Option<String>,
    pub direction: SortDirection,
}

impl SortDescription {
    pub fn new(property_name: Option<String>, direction: SortDirection) -> Self {
        Self {
            property_name,
            direction,
        }
    }

    fn key<'a>(&self, item: &'a Item) -> &'a Value {
        const NULL: &Value = &Value::Null;
        match (item, self.property_name.as_deref()) {
            (Item::Value(v), None) => v,
            (Item::Record(r), Some(name)) => r.get(name).unwrap_or(NULL),
            _ => NULL,
        }
    }

    fn compare(&self, a: &Item, b: &Item) -> Ordering {
        let ordering = self.key(a).total_cmp(self.key(b));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Filter predicate over items
pub type FilterPredicate = Box<dyn Fn(&Item) -> bool>;

/// Sorted/filtered projection of a list
#[derive(Default)]
pub struct CollectionView {
    sort: Vec<SortDescription>,
    filter: Option<FilterPredicate>,
    view_to_source: Vec<usize>,
    source_to_view: Vec<Option<usize>>,
}

impl CollectionView {
    pub fn new() -> Self {
        Self::default()
    }

    /// No sort and no filter: view indices equal source indices
    pub fn is_identity(&self) -> bool {
        self.sort.is_empty() && self.filter.is_none()
    }

    pub fn sort_descriptions(&self) -> &[SortDescription] {
        &self.sort
    }

    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }

    /// Number of visible items
    pub fn len(&self) -> usize {
        self.view_to_source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view_to_source.is_empty()
    }

    /// View position of a source index, `None` when filtered out or out of range
    pub fn view_index(&self, source_index: usize) -> Option<usize> {
        self.source_to_view.get(source_index).copied().flatten()
    }

    /// Source position of a view index, `None` when out of range
    pub fn source_index(&self, view_index: usize) -> Option<usize> {
        self.view_to_source.get(view_index).copied()
    }

    pub(crate) fn set_sort(&mut self, sort: Vec<SortDescription>) {
        self.sort = sort;
    }

    pub(crate) fn set_filter(&mut self, filter: Option<FilterPredicate>) {
        self.filter = filter;
    }

    /// Drop sort, filter and maps
    pub(crate) fn reset(&mut self) {
        self.sort.clear();
        self.filter = None;
        self.view_to_source.clear();
        self.source_to_view.clear();
    }

    /// Rebuild both index maps from `source`
    pub(crate) fn refresh(&mut self, source: Option<&ItemList>) {
        self.view_to_source.clear();
        self.source_to_view.clear();
        let Some(list) = source else {
            return;
        };

        self.view_to_source = (0..list.len())
            .filter(|&i| match (&self.filter, list.get(i)) {
                (Some(predicate), Some(item)) => predicate(item),
                _ => true,
            })
            .collect();

        if !self.sort.is_empty() {
            let sort = &self.sort;
            // stable: equal keys keep source order
            self.view_to_source.sort_by(|&a, &b| match (list.get(a), list.get(b)) {
                (Some(x), Some(y)) => sort
                    .iter()
                    .map(|d| d.compare(x, y))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal),
                _ => a.cmp(&b),
            });
        }

        self.source_to_view = vec![None; list.len()];
        for (view_index, &source_index) in self.view_to_source.iter().enumerate() {
            self.source_to_view[source_index] = Some(view_index);
        }
    }
}

impl fmt::Debug for CollectionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionView")
            .field("sort", &self.sort)
            .field("filtered", &self.filter.is_some())
            .field("len", &self.len())
            .finish()
    }
}
