//! Command enum covering every operation a template can select.
//!
//! Commands are:
//! - **Single-use**: built per request from a borrowed configuration, then discarded
//! - **Typed**: each variant owns its extracted fields with their real types
//! - **Gated**: `is_valid()` must hold before an executor dispatches them
//!
//! There is no state beyond construction; the validity gate is recomputed on
//! every call.

use mongoplug_core::ActionConfiguration;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::accessor;
use crate::base::BaseCommand;
use crate::error::Error;
use crate::index::{ConfigurationIndex, Field, Operation};
use crate::operations::*;
use crate::Result;

/// A command for one database operation.
///
/// # Example
///
/// ```
/// use mongoplug_command::{Command, ConfigurationIndex, Operation};
/// use mongoplug_core::{ActionConfiguration, Property};
///
/// let config = ActionConfiguration::new(vec![
///     Property::new("LIST_INDEXES"),
///     Property::new("users"),
/// ]);
/// let cmd = Command::from_action_configuration(&config, ConfigurationIndex::standard())?;
/// assert_eq!(cmd.operation(), Operation::ListIndexes);
/// assert!(cmd.is_valid());
/// # Ok::<(), mongoplug_command::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Find(Find),
    Insert(Insert),
    Update(Update),
    Replace(Replace),
    Delete(Delete),
    Count(Count),
    Distinct(Distinct),
    Aggregate(Aggregate),
    FindAndModify(FindAndModify),
    ListIndexes(ListIndexes),
}

macro_rules! dispatch {
    ($command:expr, $inner:ident => $body:expr) => {
        match $command {
            Command::Find($inner) => $body,
            Command::Insert($inner) => $body,
            Command::Update($inner) => $body,
            Command::Replace($inner) => $body,
            Command::Delete($inner) => $body,
            Command::Count($inner) => $body,
            Command::Distinct($inner) => $body,
            Command::Aggregate($inner) => $body,
            Command::FindAndModify($inner) => $body,
            Command::ListIndexes($inner) => $body,
        }
    };
}

impl Command {
    /// Build the command for `operation` from `config`.
    ///
    /// The operation tag stored in the template is not consulted.
    pub fn new(
        operation: Operation,
        config: &ActionConfiguration,
        index: &ConfigurationIndex,
    ) -> Result<Self> {
        let command = match operation {
            Operation::Find => Command::Find(Find::new(config, index)?),
            Operation::Insert => Command::Insert(Insert::new(config, index)?),
            Operation::Update => Command::Update(Update::new(config, index)?),
            Operation::Replace => Command::Replace(Replace::new(config, index)?),
            Operation::Delete => Command::Delete(Delete::new(config, index)?),
            Operation::Count => Command::Count(Count::new(config, index)?),
            Operation::Distinct => Command::Distinct(Distinct::new(config, index)?),
            Operation::Aggregate => Command::Aggregate(Aggregate::new(config, index)?),
            Operation::FindAndModify => {
                Command::FindAndModify(FindAndModify::new(config, index)?)
            }
            Operation::ListIndexes => Command::ListIndexes(ListIndexes::new(config, index)?),
        };
        debug!(
            target: "mongoplug::command",
            operation = %operation,
            collection = ?command.collection(),
            valid = command.is_valid(),
            "Built command"
        );
        Ok(command)
    }

    /// Build the command selected by the template's operation tag.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingOperation`] if the tag is absent or empty
    /// - [`Error::WrongType`] if the tag is not a string
    /// - [`Error::UnknownOperation`] if the tag names no operation
    pub fn from_action_configuration(
        config: &ActionConfiguration,
        index: &ConfigurationIndex,
    ) -> Result<Self> {
        let tag = accessor::value_at(config.templates(), index.command_offset())
            .ok_or(Error::MissingOperation)?;
        let name = tag.as_str().ok_or_else(|| Error::WrongType {
            field: Field::Command,
            expected: "Text".to_string(),
            actual: tag.type_name().to_string(),
        })?;
        let operation: Operation = name.parse()?;
        Command::new(operation, config, index)
    }

    pub fn operation(&self) -> Operation {
        match self {
            Command::Find(_) => Operation::Find,
            Command::Insert(_) => Operation::Insert,
            Command::Update(_) => Operation::Update,
            Command::Replace(_) => Operation::Replace,
            Command::Delete(_) => Operation::Delete,
            Command::Count(_) => Operation::Count,
            Command::Distinct(_) => Operation::Distinct,
            Command::Aggregate(_) => Operation::Aggregate,
            Command::FindAndModify(_) => Operation::FindAndModify,
            Command::ListIndexes(_) => Operation::ListIndexes,
        }
    }

    pub fn base(&self) -> &BaseCommand {
        dispatch!(self, cmd => cmd.base())
    }

    pub fn collection(&self) -> Option<&str> {
        self.base().collection()
    }

    /// The validity gate: base fields and every required operation field
    /// present and non-empty.
    pub fn is_valid(&self) -> bool {
        dispatch!(self, cmd => cmd.is_valid())
    }

    /// Required fields that are absent, base fields first.
    ///
    /// Empty iff [`Command::is_valid`] holds.
    pub fn missing_fields(&self) -> Vec<Field> {
        dispatch!(self, cmd => cmd.missing_fields())
    }

    /// Render the database command document for a valid command.
    pub fn to_document(&self) -> Result<JsonValue> {
        dispatch!(self, cmd => cmd.to_document())
    }
}

macro_rules! impl_from_operation {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Command {
                fn from(cmd: $variant) -> Self {
                    Command::$variant(cmd)
                }
            }
        )*
    };
}

impl_from_operation!(
    Find,
    Insert,
    Update,
    Replace,
    Delete,
    Count,
    Distinct,
    Aggregate,
    FindAndModify,
    ListIndexes,
);
