//! # mongoplug Command
//!
//! Extraction and validation of MongoDB plugin commands.
//!
//! The template editor stores an action as an ordered, untyped property list.
//! This crate turns that list into a typed command for one database
//! operation and decides whether the command is complete enough to run:
//! - [`ConfigurationIndex`] - where each field lives in the list
//! - [`TemplateLayout`] - the TOML form of an index, validated on load
//! - [`accessor`] - bounds-safe, typed reads from the list
//! - [`Command`] - one variant per [`Operation`], each gated by `is_valid()`
//!
//! ## Quick Start
//!
//! ```text
//! use mongoplug_command::{Command, ConfigurationIndex};
//!
//! let cmd = Command::from_action_configuration(&config, ConfigurationIndex::standard())?;
//! if cmd.is_valid() {
//!     let document = cmd.to_document()?;   // hand to the driver
//! } else {
//!     let missing = cmd.missing_fields();  // report to the user
//! }
//! ```
//!
//! ## Operations
//!
//! | Operation | Required fields |
//! |-----------|-----------------|
//! | Find | query |
//! | Insert | documents |
//! | Update | query, update |
//! | Replace | query, replacement |
//! | Delete | query |
//! | Count | query |
//! | Distinct | query, key |
//! | Aggregate | pipeline |
//! | FindAndModify | query, update |
//! | ListIndexes | (collection only) |
//!
//! Every operation also requires the collection name.

pub mod accessor;
mod base;
mod command;
mod config;
mod document;
mod error;
mod gate;
mod index;
mod operations;

// Test modules
#[cfg(test)]
mod tests;

pub use accessor::{has_value, value_at, FieldValue};
pub use base::BaseCommand;
pub use command::Command;
pub use config::TemplateLayout;
pub use document::{DEFAULT_BATCH_SIZE, DEFAULT_FIND_LIMIT, DEFAULT_FIND_SKIP};
pub use error::Error;
pub use index::{ConfigurationIndex, Field, FieldKind, FieldSpec, Operation, STANDARD_VERSION};
pub use operations::*;

/// Result type for command operations
pub type Result<T> = std::result::Result<T, Error>;
