//! Core types for mongoplug
//!
//! This crate defines the data model shared by every command:
//! - Value: untyped value stored in a template property
//! - Property: one positional entry of a plugin-specified template
//! - ActionConfiguration: the externally supplied configuration of one action
//! - json: plain JSON mapping of values, key order preserved

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod json;
pub mod property;
pub mod value;

pub use property::{ActionConfiguration, Property};
pub use value::Value;
