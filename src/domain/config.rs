//! Config - Grid Configuration
//!
//! Settings that shape how a grid treats its items source, plus optional
//! user-authored property definitions. Loaded from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_DESCRIPTOR_CACHE_CAPACITY, DEFAULT_NEW_PROPERTY_PREFIX,
    DEFAULT_PAGE_SIZE,
};
use crate::error::Result;
use crate::grid::PropertyDefinition;
use crate::helpers::get_or_create_config_dir;

/// Grid behaviour settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Items are laid out as rows (`false` transposes lists: items become columns)
    pub items_in_rows: bool,
    /// Generate property definitions when a source is bound
    pub auto_generate_columns: bool,
    /// Allow structural inserts
    pub can_insert: bool,
    /// Allow structural deletes
    pub can_delete: bool,
    /// Capacity of the per-operator property descriptor cache
    pub descriptor_cache_capacity: usize,
    /// Name prefix for properties created by column/row inserts
    pub new_property_prefix: String,
    /// Rows per page when paging through a grid
    pub page_size: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            items_in_rows: true,
            auto_generate_columns: true,
            can_insert: true,
            can_delete: true,
            descriptor_cache_capacity: DEFAULT_DESCRIPTOR_CACHE_CAPACITY,
            new_property_prefix: DEFAULT_NEW_PROPERTY_PREFIX.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Complete grid configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Behaviour settings
    pub grid: GridSettings,
    /// User-authored property definitions
    pub columns: Vec<PropertyDefinition>,
}

impl GridConfig {
    /// Load from the default location, creating an empty file when missing
    pub fn try_load() -> Result<Self> {
        let path = default_config_path()?;
        if !path.exists() {
            std::fs::write(&path, "")?;
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path; an empty file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        info!(path = ?path, "Loading grid config");
        let value = std::fs::read_to_string(path)?;
        Self::parse(&value).inspect_err(|e| {
            error!(error = %e, path = ?path, "Failed to parse grid config");
        })
    }

    /// Parse TOML text
    pub fn parse(value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(value)?)
    }

    /// Serialize to TOML text
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

fn default_config_path() -> Result<PathBuf> {
    Ok(get_or_create_config_dir()?.join(CONFIG_FILE_NAME))
}
