//! Grid
//!
//! The grid host, its collection view, property definitions and the
//! per-shape operators behind them.

pub mod cell_ref;
pub mod change;
pub mod data_grid;
pub mod data_provider;
pub mod descriptor;
pub mod operator;
pub mod property_definition;
pub mod view;

pub use cell_ref::CellRef;
pub use change::{ChangeNotifier, CollectionChange};
pub use data_grid::DataGrid;
pub use data_provider::DataProvider;
pub use descriptor::{DescriptorCache, DescriptorKey, PropertyDescriptor};
pub use operator::{
    DataContext, DataGridOperator, ObjectListOperator, ScalarListOperator, SingleObjectOperator,
    select_operator,
};
pub use property_definition::{ColumnWidth, PropertyDefinition};
pub use view::{CollectionView, FilterPredicate, SortDescription, SortDirection};
