//! Domain - Pure Data Structures
//!
//! Values, records and the collections a grid can be bound to. Nothing in
//! here knows about display coordinates.

pub mod config;
pub mod item;
pub mod json;
pub mod record;
pub mod value;

pub use config::{GridConfig, GridSettings};
pub use item::{ElementType, Item, ItemList, ItemsSource, SourceShape};
pub use record::{PropertyInfo, Record, TypeDescriptor};
pub use value::{Value, ValueType};
