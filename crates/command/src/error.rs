//! Error types for command extraction.
//!
//! All failures of this layer are represented by the [`Error`] enum.
//! Absent or empty template fields are *not* errors: they leave the field
//! unset and surface only through `is_valid()`.
//!
//! # Categories
//!
//! | Category | Variants | Description |
//! |----------|----------|-------------|
//! | Type | `WrongType` | A present value has the wrong type for its field |
//! | Operation | `MissingOperation`, `UnknownOperation` | The template names no usable operation |
//! | Index | `UnknownField`, `KindMismatch`, `InvalidLayout` | Programming or layout mistakes |
//! | Document | `InvalidJson`, `InvalidCommand` | Rendering a command document failed |
//! | System | `Io` | Layout file could not be read |
//!
//! # Example
//!
//! ```ignore
//! use mongoplug_command::{Command, ConfigurationIndex, Error};
//!
//! match Command::from_action_configuration(&config, ConfigurationIndex::standard()) {
//!     Ok(cmd) if cmd.is_valid() => { /* dispatch */ }
//!     Ok(cmd) => { /* report cmd.missing_fields() */ }
//!     Err(Error::WrongType { field, .. }) => { /* malformed template */ }
//!     Err(e) => { /* ... */ }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::index::{Field, Operation};

/// Command layer errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Type Errors ====================
    /// A present value cannot be read as the type its field requires
    #[error("wrong type for {field}: expected {expected}, got {actual}")]
    WrongType {
        field: Field,
        expected: String,
        actual: String,
    },

    // ==================== Operation Errors ====================
    /// The template carries no operation tag
    #[error("no operation selected in template")]
    MissingOperation,

    /// The operation tag names no known operation
    #[error("unknown operation: {name}")]
    UnknownOperation { name: String },

    // ==================== Index Errors ====================
    /// An operation does not declare the requested field
    #[error("operation {operation} has no field {field}")]
    UnknownField { operation: Operation, field: Field },

    /// A field was read with an accessor that does not match its declared kind
    #[error("field {field} is declared {declared} but was read as {requested}")]
    KindMismatch {
        field: Field,
        declared: String,
        requested: String,
    },

    /// A template layout failed validation
    #[error("invalid template layout: {reason}")]
    InvalidLayout { reason: String },

    // ==================== Document Errors ====================
    /// A JSON input could not be parsed or has the wrong shape
    #[error("invalid JSON in {field}: {reason}")]
    InvalidJson { field: Field, reason: String },

    /// The command does not pass its validity gate
    #[error("{operation} command is missing required fields: {}", join_fields(.missing))]
    InvalidCommand {
        operation: Operation,
        missing: Vec<Field>,
    },

    // ==================== System Errors ====================
    /// I/O error
    #[error("I/O error: {reason}")]
    Io { reason: String },
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}
