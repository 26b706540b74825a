//! Grid Constants
//!
//! Centralized defaults shared by the settings and the operators.

/// Default capacity of each operator's property descriptor cache
pub const DEFAULT_DESCRIPTOR_CACHE_CAPACITY: usize = 256;

/// Default name prefix for properties created by structural inserts
pub const DEFAULT_NEW_PROPERTY_PREFIX: &str = "Column";

/// Default rows per page
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Default column width in pixels for fixed-width definitions
pub const DEFAULT_COLUMN_WIDTH: f32 = 100.0;

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "datagrid.toml";

/// Binding path for a definition bound to the element itself
pub const SELF_BINDING_PATH: &str = ".";

/// Widest cell the inspector prints before truncating
pub const INSPECT_CELL_WIDTH: usize = 24;
