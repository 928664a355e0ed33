//! Distinct: the distinct values of one key among matching documents.

use mongoplug_core::ActionConfiguration;
use serde_json::{json, Value as JsonValue};

use crate::base::BaseCommand;
use crate::document;
use crate::gate::{self, Extractor, FieldPresence};
use crate::index::{ConfigurationIndex, Field, Operation};
use crate::Result;

/// Distinct command.
///
/// Requires `query` and `key` on top of the base collection.
///
/// # Example
///
/// ```
/// use mongoplug_command::{ConfigurationIndex, Distinct};
/// use mongoplug_core::{ActionConfiguration, Property};
///
/// let mut templates = vec![Property::empty(); 20];
/// templates[1] = Property::new("orders");
/// templates[18] = Property::new("{}");
/// templates[19] = Property::new("status");
///
/// let cmd = Distinct::new(&ActionConfiguration::new(templates), ConfigurationIndex::standard())?;
/// assert!(cmd.is_valid());
/// assert_eq!(cmd.key(), Some("status"));
/// # Ok::<(), mongoplug_command::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distinct {
    base: BaseCommand,
    query: Option<String>,
    key: Option<String>,
}

impl Distinct {
    /// Extract a distinct command from `config`.
    ///
    /// Absent fields stay unset; only mistyped values fail.
    pub fn new(config: &ActionConfiguration, index: &ConfigurationIndex) -> Result<Self> {
        let base = BaseCommand::new(config, index)?;
        let fields = Extractor::new(Operation::Distinct, config, index);
        Ok(Distinct {
            base,
            query: fields.text(Field::Query)?,
            key: fields.text(Field::Key)?,
        })
    }

    pub fn base(&self) -> &BaseCommand {
        &self.base
    }

    /// Filter source text.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Field whose distinct values are returned.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// True iff the base is valid and both `query` and `key` are present.
    pub fn is_valid(&self) -> bool {
        gate::is_valid(self)
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        gate::missing_fields(self)
    }

    /// Render as `{"distinct": <collection>, "key": …, "query": …}`.
    pub fn to_document(&self) -> Result<JsonValue> {
        let collection = gate::require_valid(self)?;
        let query = document::object(Field::Query, self.query.as_deref().unwrap_or_default())?;
        Ok(json!({
            "distinct": collection,
            "key": self.key,
            "query": query,
        }))
    }
}

impl FieldPresence for Distinct {
    const OPERATION: Operation = Operation::Distinct;

    fn base(&self) -> &BaseCommand {
        &self.base
    }

    fn has(&self, field: Field) -> bool {
        match field {
            Field::Query => self.query.is_some(),
            Field::Key => self.key.is_some(),
            _ => false,
        }
    }
}
