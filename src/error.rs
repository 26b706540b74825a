//! Error types for datagrid-source
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use snafu::Snafu;

use crate::domain::value::ValueType;
use crate::grid::cell_ref::CellRef;

/// Main error type for the crate
#[derive(Debug, Snafu)]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// A value could not be converted to the declared property type
    #[snafu(display("Cannot convert '{value}' to {target}"))]
    Conversion { value: String, target: ValueType },

    /// Write attempted on a read-only property
    #[snafu(display("Property '{name}' is read-only"))]
    ReadOnly { name: String },

    /// Cell outside the current grid dimensions
    #[snafu(display("Cell {cell} is out of range"))]
    OutOfRange { cell: CellRef },

    /// Property name not declared on the element type
    #[snafu(display("Property '{name}' is not defined on '{type_name}'"))]
    UnknownProperty { name: String, type_name: String },

    /// Operation requires a bound items source
    #[snafu(display("No items source is bound"))]
    Unbound,

    /// IO error (file operations)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
