//! Property Definition
//!
//! Describes one logical column (or row, when the grid is transposed or
//! bound to a single object): which property it shows and what the grid may
//! do with it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DEFAULT_COLUMN_WIDTH;
use crate::domain::ValueType;

/// Column width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColumnWidth {
    /// Fixed width in pixels
    Fixed(f32),
    /// Flexible width with optional min/max
    Flex { min: Option<f32>, max: Option<f32> },
    /// Percentage of available space
    Percent(f32),
}

impl Default for ColumnWidth {
    fn default() -> Self {
        ColumnWidth::Flex { min: None, max: None }
    }
}

/// Schema descriptor for one logical column or row
///
/// Cloning keeps the identity, so a clone addresses the same cached
/// descriptor as the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyDefinition {
    #[serde(skip)]
    id: Uuid,
    /// Bound property; `None` binds the element itself
    pub property_name: Option<String>,
    /// Header override
    pub header: Option<String>,
    /// Column width
    pub width: ColumnWidth,
    /// Declared type override; otherwise taken from the descriptor
    pub value_type: Option<ValueType>,
    /// Reject writes through this definition
    pub is_read_only: bool,
    /// Whether items can be sorted by this property
    pub can_sort: bool,
    /// Whether new properties may be inserted at this position
    pub can_insert: bool,
    /// Whether this definition may be removed by a structural delete
    pub can_delete: bool,
    /// Display format hint for renderers
    pub format_string: Option<String>,
    #[serde(skip)]
    auto_generated: bool,
}

impl Default for PropertyDefinition {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            property_name: None,
            header: None,
            width: ColumnWidth::default(),
            value_type: None,
            is_read_only: false,
            can_sort: true,
            can_insert: true,
            can_delete: true,
            format_string: None,
            auto_generated: false,
        }
    }
}

impl PropertyDefinition {
    /// Create a definition bound to a named property
    pub fn new(property_name: impl Into<String>) -> Self {
        Self {
            property_name: Some(property_name.into()),
            ..Self::default()
        }
    }

    /// Create a definition bound to the element itself (scalar lists)
    pub fn for_element() -> Self {
        Self::default()
    }

    pub(crate) fn auto(property_name: Option<String>) -> Self {
        Self {
            property_name,
            auto_generated: true,
            ..Self::default()
        }
    }

    /// Identity used to key the descriptor cache
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_auto_generated(&self) -> bool {
        self.auto_generated
    }

    /// Header override, else the property name
    pub fn display_name(&self) -> &str {
        self.header
            .as_deref()
            .or(self.property_name.as_deref())
            .unwrap_or_default()
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Set fixed width; non-positive widths fall back to the default
    pub fn fixed_width(mut self, width: f32) -> Self {
        let width = if width > 0.0 { width } else { DEFAULT_COLUMN_WIDTH };
        self.width = ColumnWidth::Fixed(width);
        self
    }

    /// Set flexible width with optional constraints
    pub fn flex_width(mut self, min: Option<f32>, max: Option<f32>) -> Self {
        self.width = ColumnWidth::Flex { min, max };
        self
    }

    /// Set percentage width
    pub fn percent_width(mut self, percent: f32) -> Self {
        self.width = ColumnWidth::Percent(percent);
        self
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    pub fn read_only(mut self) -> Self {
        self.is_read_only = true;
        self
    }

    pub fn sortable(mut self, can_sort: bool) -> Self {
        self.can_sort = can_sort;
        self
    }

    pub fn insertable(mut self, can_insert: bool) -> Self {
        self.can_insert = can_insert;
        self
    }

    pub fn deletable(mut self, can_delete: bool) -> Self {
        self.can_delete = can_delete;
        self
    }

    pub fn format_string(mut self, format: impl Into<String>) -> Self {
        self.format_string = Some(format.into());
        self
    }
}
