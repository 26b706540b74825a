//! Data Grid Items Source Library
//!
//! This crate binds a data grid to an items source: a list of scalar values,
//! a list of records, or a single record. Each source shape is served by an
//! operator that maps grid cells onto the source, reads and writes values and
//! performs structural edits.

pub mod constants;
pub mod domain;
pub mod error;
pub mod grid;
pub mod helpers;

pub use domain::{GridConfig, GridSettings, ItemList, ItemsSource, Record, TypeDescriptor, Value, ValueType};
pub use error::{Error, Result};
pub use grid::{CellRef, DataGrid, DataGridOperator, PropertyDefinition};
