//! mongoplug - typed commands for a MongoDB query plugin
//!
//! The plugin's template editor saves each action as an ordered, untyped
//! property list. mongoplug turns such a list into a typed command for one
//! database operation, and tells the executor whether the command is complete
//! enough to dispatch.
//!
//! # Quick Start
//!
//! ```
//! use mongoplug::{ActionConfiguration, Command, ConfigurationIndex, Field};
//!
//! let config: ActionConfiguration = serde_json::from_str(r#"{
//!     "pluginSpecifiedTemplates": [{"value": "DISTINCT"}, {"value": "orders"}]
//! }"#).unwrap();
//!
//! let cmd = Command::from_action_configuration(&config, ConfigurationIndex::standard())?;
//! assert!(!cmd.is_valid());
//! assert_eq!(cmd.missing_fields(), vec![Field::Query, Field::Key]);
//! # Ok::<(), mongoplug::Error>(())
//! ```
//!
//! # Architecture
//!
//! Data types live in `mongoplug-core`; extraction, the configuration index
//! and the validity gate live in `mongoplug-command`. Executing the rendered
//! command is left to the caller.

// Re-export the public API from mongoplug-command
pub use mongoplug_command::*;

// Re-export the data model so users don't need mongoplug-core directly
pub use mongoplug_core::{ActionConfiguration, Property, Value};
